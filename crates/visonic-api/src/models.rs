// Wire types for the PowerManage REST API
//
// Fields use `#[serde(default)]` liberally because the server is
// inconsistent about field presence across firmware versions, and a
// `#[serde(flatten)]` catch-all keeps undocumented fields available to
// callers without breaking deserialization.

use serde::{Deserialize, Serialize};

// ── Version probe ────────────────────────────────────────────────────

/// Response from `GET /rest_api/version`.
///
/// Lists the REST API versions the server speaks. The client requires
/// `"8.0"`; anything else is a configuration error.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionInfo {
    #[serde(default)]
    pub rest_versions: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Authentication ───────────────────────────────────────────────────

/// Response from `POST /auth` (user login).
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub user_token: Option<String>,
}

/// Response from `POST /panel/login`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PanelLoginResponse {
    #[serde(default)]
    pub session_token: Option<String>,
}

// ── Status ───────────────────────────────────────────────────────────

/// Raw status snapshot from `GET /status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    /// Whether the panel is reachable from the server.
    #[serde(default)]
    pub connected: bool,
    /// Per-partition records. Only the first one is consulted by the
    /// domain layer (single-partition assumption).
    #[serde(default)]
    pub partitions: Vec<PartitionStatus>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One partition record inside [`Status`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionStatus {
    /// Whether the partition can be armed (no open doors/windows).
    #[serde(default)]
    pub ready: bool,
    /// Arm state as reported: `DISARM`, `HOME`, `AWAY`, ...
    #[serde(default)]
    pub state: String,
    /// Transitional status: `EXIT` during the exit delay, otherwise
    /// typically `NORMAL`.
    #[serde(default)]
    pub status: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Alarms ───────────────────────────────────────────────────────────

/// A currently active alarm event from `GET /alarms`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alarm {
    #[serde(default)]
    pub partition: Option<i32>,
    #[serde(default, rename = "type")]
    pub alarm_type: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Panel info ───────────────────────────────────────────────────────

/// Static panel information from `GET /panel_info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelInfo {
    #[serde(default)]
    pub serial: String,
    #[serde(default)]
    pub model: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Events ───────────────────────────────────────────────────────────

/// One entry of the panel event log from `GET /events`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Event id.
    #[serde(default)]
    pub event: i64,
    /// Numeric event type code (89 = disarm, 85 = arm home, 86 = arm away,
    /// 2 = alarm).
    #[serde(default)]
    pub type_id: i64,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// User or device that caused the event.
    #[serde(default)]
    pub appointment: Option<String>,
    /// Panel-local timestamp, e.g. `2020-11-09 09:20:04`.
    #[serde(default)]
    pub datetime: String,
    #[serde(default)]
    pub video: Option<bool>,
    #[serde(default)]
    pub device_type: Option<String>,
    #[serde(default)]
    pub zone: Option<serde_json::Value>,
    #[serde(default)]
    pub partitions: Vec<i32>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Devices ──────────────────────────────────────────────────────────

/// Raw device record from `GET /devices`, before domain classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDevice {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub zone_type: Option<String>,
    #[serde(default)]
    pub device_type: Option<String>,
    /// Drives classification: `CONTACT`, `MOTION_CAMERA`, `MOTION`,
    /// `CURTAIN`, `SMOKE`, ... Entries without a subtype are skipped by
    /// the domain layer.
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub preenroll: bool,
    /// Free-text or structured warnings; contact sensors expose their
    /// open/closed state only through an `OPENED` marker in here.
    #[serde(default)]
    pub warnings: Option<serde_json::Value>,
    #[serde(default)]
    pub partitions: Vec<i32>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Process status ───────────────────────────────────────────────────

/// One entry of `GET /process_status` — the completion state of an async
/// command such as arm/disarm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessStatus {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
