#![allow(clippy::unwrap_used)]
// Integration tests for `System` using wiremock: the full connect
// handshake, status derivation end-to-end, device refresh, events, and
// command routing.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use uuid::Uuid;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use visonic_core::{
    ConnectionState, CoreError, DeviceKind, DeviceState, EventAction, PanelClient, PanelConfig,
    System, SystemState, TransportConfig,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn config() -> PanelConfig {
    PanelConfig {
        hostname: "visonic.tycomonitor.com".into(),
        app_id: Uuid::nil(),
        user_code: "1234".into(),
        user_email: "user@example.com".into(),
        user_password: SecretString::from("hunter2".to_string()),
        panel_id: "123456".into(),
        partition: -1,
    }
}

async fn setup() -> (MockServer, System) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client =
        PanelClient::with_base_url(base_url, config(), &TransportConfig::default()).unwrap();
    (server, System::with_client(client))
}

/// Mount the version probe, both login steps, and panel info.
async fn mount_handshake(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/version"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "rest_versions": ["4.0", "8.0"] })),
        )
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/8.0/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user_token": "user-tok" })))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/8.0/panel/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "session_token": "sess-tok" })),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/8.0/panel_info"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "serial": "123456", "model": "PowerMaster 10" })),
        )
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, status: serde_json::Value, alarms: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/8.0/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/8.0/alarms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(alarms))
        .mount(server)
        .await;
}

fn disarmed_status() -> serde_json::Value {
    json!({
        "connected": true,
        "partitions": [{ "ready": true, "state": "DISARM", "status": "NORMAL" }],
    })
}

// ── Connect lifecycle ───────────────────────────────────────────────

#[tokio::test]
async fn test_connect_happy_path() {
    let (server, mut system) = setup().await;
    mount_handshake(&server).await;
    mount_status(&server, disarmed_status(), json!([])).await;

    system.connect().await.unwrap();

    assert_eq!(system.connection_state(), ConnectionState::Ready);
    assert_eq!(system.serial_number(), Some("123456"));
    assert_eq!(system.model(), Some("PowerMaster 10"));
    assert!(system.ready());
    assert!(system.connected());
    assert_eq!(system.state(), Some(&SystemState::Disarm));
    assert!(!system.alarm());
    assert_eq!(system.session_token(), Some("sess-tok"));
}

#[tokio::test]
async fn test_unsupported_version_aborts_before_login() {
    let (server, mut system) = setup().await;

    Mock::given(method("GET"))
        .and(path("/version"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "rest_versions": ["4.0"] })),
        )
        .mount(&server)
        .await;
    // No login attempt may be made against an unsupported server.
    Mock::given(method("POST"))
        .and(path("/8.0/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user_token": "x" })))
        .expect(0)
        .mount(&server)
        .await;

    let result = system.connect().await;
    match result {
        Err(CoreError::UnsupportedVersion { required, ref available }) => {
            assert_eq!(required, "8.0");
            assert_eq!(available, &vec!["4.0".to_string()]);
        }
        other => panic!("expected UnsupportedVersion, got: {other:?}"),
    }
    assert_eq!(system.connection_state(), ConnectionState::Disconnected);
}

#[tokio::test]
async fn test_rejected_login_resets_to_disconnected() {
    let (server, mut system) = setup().await;

    Mock::given(method("GET"))
        .and(path("/version"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "rest_versions": ["8.0"] })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/8.0/auth"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    let result = system.connect().await;
    assert!(
        matches!(result, Err(CoreError::AuthenticationFailed { .. })),
        "expected AuthenticationFailed, got: {result:?}"
    );
    assert_eq!(system.connection_state(), ConnectionState::Disconnected);
    assert!(system.state().is_none());
}

#[tokio::test]
async fn test_operations_require_connect() {
    let (_server, mut system) = setup().await;

    assert!(matches!(
        system.update_status().await,
        Err(CoreError::NotConnected)
    ));
    assert!(matches!(system.arm_away().await, Err(CoreError::NotConnected)));
    assert!(matches!(
        system.get_last_event(0).await,
        Err(CoreError::NotConnected)
    ));
}

// ── Status derivation end-to-end ────────────────────────────────────

#[tokio::test]
async fn test_exit_delay_derives_arming() {
    let (server, mut system) = setup().await;
    mount_handshake(&server).await;
    mount_status(
        &server,
        json!({
            "connected": true,
            "partitions": [{ "ready": false, "state": "AWAY", "status": "EXIT" }],
        }),
        json!([]),
    )
    .await;

    system.connect().await.unwrap();

    assert_eq!(system.state(), Some(&SystemState::Arming));
    assert!(!system.ready());
    assert!(!system.alarm());
}

#[tokio::test]
async fn test_active_alarm_derives_alarm_state() {
    let (server, mut system) = setup().await;
    mount_handshake(&server).await;
    mount_status(
        &server,
        json!({
            "connected": true,
            "partitions": [{ "ready": false, "state": "HOME", "status": "NORMAL" }],
        }),
        json!([{ "partition": 1, "type": "BURGLARY" }]),
    )
    .await;

    system.connect().await.unwrap();

    assert_eq!(system.state(), Some(&SystemState::Alarm));
    assert!(system.alarm());
}

#[tokio::test]
async fn test_repeated_status_refresh_replaces_snapshot() {
    let (server, mut system) = setup().await;
    mount_handshake(&server).await;

    // First status call (during connect) sees DISARM, the next one EXIT.
    Mock::given(method("GET"))
        .and(path("/8.0/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(disarmed_status()))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/8.0/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "connected": true,
            "partitions": [{ "ready": false, "state": "HOME", "status": "EXIT" }],
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/8.0/alarms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    system.connect().await.unwrap();
    assert_eq!(system.state(), Some(&SystemState::Disarm));

    system.update_status().await.unwrap();
    assert_eq!(system.state(), Some(&SystemState::Arming));
}

#[tokio::test]
async fn test_status_without_partitions() {
    let (server, mut system) = setup().await;
    mount_handshake(&server).await;
    mount_status(&server, json!({ "connected": true, "partitions": [] }), json!([])).await;

    let result = system.connect().await;
    assert!(
        matches!(result, Err(CoreError::NoPartitions)),
        "expected NoPartitions, got: {result:?}"
    );
    assert_eq!(system.connection_state(), ConnectionState::Disconnected);
}

// ── Devices ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_devices_classifies_and_replaces() {
    let (server, mut system) = setup().await;
    mount_handshake(&server).await;
    mount_status(&server, disarmed_status(), json!([])).await;

    Mock::given(method("GET"))
        .and(path("/8.0/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1,
                "name": "Front door",
                "zone_type": "PERIMETER",
                "subtype": "CONTACT",
                "warnings": [{ "type": "OPENED" }],
                "partitions": [1],
            },
            { "id": 2, "name": "Hallway", "subtype": "MOTION" },
            { "id": 3, "name": "Kitchen", "subtype": "SMOKE" },
            { "id": 4, "name": "Half-enrolled", "subtype": null },
        ])))
        .mount(&server)
        .await;

    system.connect().await.unwrap();
    system.update_devices().await.unwrap();

    // The null-subtype record is dropped.
    assert_eq!(system.devices().len(), 3);

    let front_door = system.get_device_by_id(1).unwrap();
    assert_eq!(front_door.kind, DeviceKind::Contact);
    assert_eq!(front_door.state(), DeviceState::Opened);

    let hallway = system.get_device_by_id(2).unwrap();
    assert_eq!(hallway.kind, DeviceKind::Motion);
    assert_eq!(hallway.state(), DeviceState::Unknown);

    assert_eq!(system.get_device_by_id(3).unwrap().kind, DeviceKind::Smoke);
    assert!(system.get_device_by_id(4).is_none());
}

// ── Events ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_last_event_maps_and_shifts() {
    let (server, mut system) = setup().await;
    mount_handshake(&server).await;
    mount_status(&server, disarmed_status(), json!([])).await;

    Mock::given(method("GET"))
        .and(path("/8.0/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "event": 100,
                "type_id": 89,
                "appointment": "Alice",
                "datetime": "2020-11-09 08:00:00",
            },
            {
                "event": 101,
                "type_id": 86,
                "appointment": "Bob",
                "datetime": "2020-11-09 09:20:04",
            },
        ])))
        .mount(&server)
        .await;

    system.connect().await.unwrap();

    let record = system.get_last_event(2).await.unwrap().unwrap();
    assert_eq!(record.event_id, 101);
    assert_eq!(record.action, EventAction::ArmAway);
    assert_eq!(record.user, "Bob");
    assert_eq!(record.timestamp.to_string(), "2020-11-09 11:20:04");
}

#[tokio::test]
async fn test_get_last_event_empty_log() {
    let (server, mut system) = setup().await;
    mount_handshake(&server).await;
    mount_status(&server, disarmed_status(), json!([])).await;

    Mock::given(method("GET"))
        .and(path("/8.0/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    system.connect().await.unwrap();
    assert!(system.get_last_event(0).await.unwrap().is_none());
}

// ── Commands ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_arm_home_routes_to_set_state() {
    let (server, mut system) = setup().await;
    mount_handshake(&server).await;
    mount_status(&server, disarmed_status(), json!([])).await;

    Mock::given(method("POST"))
        .and(path("/8.0/set_state"))
        .and(body_json(json!({ "partition": -1, "state": "HOME" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "process_token": "proc-1" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    system.connect().await.unwrap();
    system.arm_home().await.unwrap();

    // Commands do not refresh the snapshot on their own.
    assert_eq!(system.state(), Some(&SystemState::Disarm));
}

#[tokio::test]
async fn test_process_status_passthrough() {
    let (server, mut system) = setup().await;
    mount_handshake(&server).await;
    mount_status(&server, disarmed_status(), json!([])).await;

    Mock::given(method("GET"))
        .and(path("/8.0/process_status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "token": "proc-1", "status": "succeeded" },
        ])))
        .mount(&server)
        .await;

    system.connect().await.unwrap();

    let entry = system.get_process_status("proc-1").await.unwrap().unwrap();
    assert_eq!(entry.status.as_deref(), Some("succeeded"));
}

// ── Troubles ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_troubles_caches_verbatim() {
    let (server, mut system) = setup().await;
    mount_handshake(&server).await;
    mount_status(&server, disarmed_status(), json!([])).await;

    let payload = json!([{ "device": 3, "type": "LOW_BATTERY", "zone": 7 }]);
    Mock::given(method("GET"))
        .and(path("/8.0/troubles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&payload))
        .mount(&server)
        .await;

    system.connect().await.unwrap();
    system.update_troubles().await.unwrap();

    assert_eq!(system.troubles(), &[payload.as_array().unwrap()[0].clone()]);
}
