// ── System abstraction ──
//
// Full lifecycle for one panel session: the two-phase authentication
// handshake, the cached derived snapshot, device list refresh, and
// arm/disarm command routing. One `System` owns one session; callers that
// need shared access wrap it themselves — there is no hidden global state.

use chrono::Duration;
use tracing::{debug, info};

use visonic_api::models::ProcessStatus;
use visonic_api::{PanelClient, PanelConfig, REST_VERSION, TransportConfig};

use crate::error::CoreError;
use crate::model::device::Device;
use crate::model::event::{EventRecord, parse_panel_timestamp};
use crate::model::state::{StatusSnapshot, SystemState, derive_snapshot};

/// Connection lifecycle state.
///
/// Advances `Disconnected → Authenticating → PanelAuthenticating → Ready`
/// during `connect()`; any failure along the chain drops straight back to
/// `Disconnected` — a partially authenticated session is never `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Authenticating,
    PanelAuthenticating,
    Ready,
}

/// The main public API for interacting with an alarm panel through the
/// PowerManage cloud.
///
/// Wraps a [`PanelClient`], drives the authentication handshake, and
/// maintains a derived snapshot of system state plus the device list,
/// recomputed on demand from raw responses. Polling only — there is no
/// background refresh; call the `update_*` methods when fresh data is
/// needed, and re-run [`connect()`](Self::connect) after an
/// authentication failure (no automatic retry).
pub struct System {
    api: PanelClient,
    connection_state: ConnectionState,
    serial_number: Option<String>,
    model: Option<String>,
    snapshot: Option<StatusSnapshot>,
    troubles: Vec<serde_json::Value>,
    devices: Vec<Device>,
}

impl System {
    /// Create a system from configuration with default transport settings.
    /// Does NOT connect — call [`connect()`](Self::connect).
    pub fn new(config: PanelConfig) -> Result<Self, CoreError> {
        let client = PanelClient::new(config, &TransportConfig::default())?;
        Ok(Self::with_client(client))
    }

    /// Create a system over a pre-built [`PanelClient`].
    pub fn with_client(api: PanelClient) -> Self {
        Self {
            api,
            connection_state: ConnectionState::Disconnected,
            serial_number: None,
            model: None,
            snapshot: None,
            troubles: Vec::new(),
            devices: Vec::new(),
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// Current connection lifecycle state.
    pub fn connection_state(&self) -> ConnectionState {
        self.connection_state
    }

    /// Serial number of the panel, known once connected.
    pub fn serial_number(&self) -> Option<&str> {
        self.serial_number.as_deref()
    }

    /// Model of the panel, known once connected.
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Whether the system is ready to be armed. Open doors or windows
    /// make it not ready.
    pub fn ready(&self) -> bool {
        self.snapshot.as_ref().is_some_and(|s| s.ready)
    }

    /// Whether the panel is connected to the cloud server.
    pub fn connected(&self) -> bool {
        self.snapshot.as_ref().is_some_and(|s| s.connected)
    }

    /// Derived arm state, once the first status refresh has run.
    pub fn state(&self) -> Option<&SystemState> {
        self.snapshot.as_ref().map(|s| &s.state)
    }

    /// Whether an alarm condition is ongoing.
    pub fn alarm(&self) -> bool {
        self.snapshot.as_ref().is_some_and(|s| s.alarm_active)
    }

    /// The full derived snapshot, once the first status refresh has run.
    pub fn status(&self) -> Option<&StatusSnapshot> {
        self.snapshot.as_ref()
    }

    /// Cached device list from the last `update_devices()`.
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Cached raw troubles from the last `update_troubles()`.
    pub fn troubles(&self) -> &[serde_json::Value] {
        &self.troubles
    }

    /// The session token, once panel login has succeeded.
    pub fn session_token(&self) -> Option<&str> {
        self.api.session_token()
    }

    /// Get a cached device by its id, or `None` when absent.
    pub fn get_device_by_id(&self, id: i64) -> Option<&Device> {
        self.devices.iter().find(|device| device.id == id)
    }

    /// Check against the server whether the token pair is still valid.
    pub async fn is_token_valid(&self) -> bool {
        self.api.is_logged_in().await
    }

    // ── Connection lifecycle ─────────────────────────────────────────

    /// Connect to the alarm system.
    ///
    /// Verifies server API version support, runs the two-step login,
    /// fetches the static panel info, and performs an initial status
    /// refresh. Any failure along the chain aborts with the state reset
    /// to `Disconnected`.
    pub async fn connect(&mut self) -> Result<(), CoreError> {
        if let Err(err) = self.do_connect().await {
            self.connection_state = ConnectionState::Disconnected;
            self.snapshot = None;
            return Err(err);
        }
        Ok(())
    }

    async fn do_connect(&mut self) -> Result<(), CoreError> {
        self.connection_state = ConnectionState::Authenticating;

        // Fail fast on an unsupported server, before any login attempt.
        let versions = self.api.get_version_info().await?;
        if !versions.rest_versions.iter().any(|v| v == REST_VERSION) {
            return Err(CoreError::UnsupportedVersion {
                required: REST_VERSION,
                available: versions.rest_versions,
            });
        }

        self.api.login().await?;
        debug!("user login complete");

        self.connection_state = ConnectionState::PanelAuthenticating;
        self.api.panel_login().await?;
        debug!("panel login complete");

        let panel_info = self.api.get_panel_info().await?;
        self.serial_number = Some(panel_info.serial);
        self.model = Some(panel_info.model);

        self.connection_state = ConnectionState::Ready;
        self.update_status().await?;

        info!(
            serial = self.serial_number.as_deref().unwrap_or(""),
            model = self.model.as_deref().unwrap_or(""),
            "connected to panel"
        );
        Ok(())
    }

    fn ensure_ready(&self) -> Result<(), CoreError> {
        if self.connection_state == ConnectionState::Ready {
            Ok(())
        } else {
            Err(CoreError::NotConnected)
        }
    }

    // ── Refresh operations ───────────────────────────────────────────

    /// Refresh the derived status snapshot from the status and alarms
    /// endpoints. Only the first partition record is consulted.
    pub async fn update_status(&mut self) -> Result<(), CoreError> {
        self.ensure_ready()?;

        let status = self.api.get_status().await?;
        let Some(partition) = status.partitions.first() else {
            return Err(CoreError::NoPartitions);
        };
        let alarms = self.api.get_alarms().await?;

        self.snapshot = Some(derive_snapshot(status.connected, partition, &alarms));
        Ok(())
    }

    /// Refresh the cached device list.
    ///
    /// The list is cleared and rebuilt wholesale — device records carry no
    /// identity guarantee across calls beyond their id, so nothing is
    /// merged. Records without a subtype are dropped.
    pub async fn update_devices(&mut self) -> Result<(), CoreError> {
        self.ensure_ready()?;

        let raw_devices = self.api.get_all_devices().await?;
        self.devices = raw_devices.into_iter().filter_map(Device::classify).collect();
        debug!(count = self.devices.len(), "device list refreshed");
        Ok(())
    }

    /// Refresh the cached troubles payload, kept verbatim.
    pub async fn update_troubles(&mut self) -> Result<(), CoreError> {
        self.ensure_ready()?;
        self.troubles = self.api.get_troubles().await?;
        Ok(())
    }

    /// Get the most recent panel event, or `None` when the log is empty.
    ///
    /// `hour_offset` shifts the panel-local timestamp by whole hours for
    /// callers in a different zone than the panel.
    pub async fn get_last_event(&self, hour_offset: i64) -> Result<Option<EventRecord>, CoreError> {
        self.ensure_ready()?;

        let events = self.api.get_events().await?;
        let Some(last) = events.last() else {
            return Ok(None);
        };

        let parsed =
            parse_panel_timestamp(&last.datetime).ok_or_else(|| CoreError::InvalidTimestamp {
                value: last.datetime.clone(),
            })?;

        Ok(Some(EventRecord {
            event_id: last.event,
            action: last.type_id.into(),
            user: last.appointment.clone().unwrap_or_default(),
            timestamp: parsed + Duration::hours(hour_offset),
        }))
    }

    // ── Commands ─────────────────────────────────────────────────────
    //
    // Thin pass-throughs using the configured partition. None of these
    // refresh the snapshot; call `update_status()` afterwards and expect
    // a transitional ARMING state while the exit delay runs.

    /// Send the Arm Home command.
    pub async fn arm_home(&self) -> Result<(), CoreError> {
        self.ensure_ready()?;
        self.api.arm_home(self.api.partition()).await?;
        Ok(())
    }

    /// Send the Arm Away command.
    pub async fn arm_away(&self) -> Result<(), CoreError> {
        self.ensure_ready()?;
        self.api.arm_away(self.api.partition()).await?;
        Ok(())
    }

    /// Send the Disarm command.
    pub async fn disarm(&self) -> Result<(), CoreError> {
        self.ensure_ready()?;
        self.api.disarm(self.api.partition()).await?;
        Ok(())
    }

    /// Poll a command's completion status by process token. Not polled
    /// automatically — confirming completion is the caller's concern.
    pub async fn get_process_status(
        &self,
        token: &str,
    ) -> Result<Option<ProcessStatus>, CoreError> {
        self.ensure_ready()?;
        Ok(self.api.get_process_status(token).await?)
    }
}
