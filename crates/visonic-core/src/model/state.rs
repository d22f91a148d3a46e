// ── Derived system state ──
//
// The panel reports arming through three raw signals: the partition state,
// the partition status, and the list of currently active alarm events.
// `derive_snapshot` collapses them into one human-meaningful state.

use std::fmt;

use serde::{Deserialize, Serialize};
use visonic_api::models::{Alarm, PartitionStatus};

/// Coarse alarm/arming state of the system.
///
/// Derived, never reported directly by the server: `Arming` is synthesized
/// from an `EXIT` status during the exit delay, `Alarm` from active alarm
/// events while armed. States the panel reports that this client does not
/// recognize pass through as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SystemState {
    Disarm,
    Arming,
    Home,
    Away,
    Alarm,
    Exit,
    Other(String),
}

impl SystemState {
    /// Map a raw partition state onto the enum, keeping unknown spellings.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "DISARM" => Self::Disarm,
            "ARMING" => Self::Arming,
            "HOME" => Self::Home,
            "AWAY" => Self::Away,
            "ALARM" => Self::Alarm,
            "EXIT" => Self::Exit,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Whether the partition is fully armed (home or away).
    pub fn is_armed(&self) -> bool {
        matches!(self, Self::Home | Self::Away)
    }
}

impl fmt::Display for SystemState {
    /// Renders the wire spelling, so `Other` round-trips verbatim.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disarm => f.write_str("DISARM"),
            Self::Arming => f.write_str("ARMING"),
            Self::Home => f.write_str("HOME"),
            Self::Away => f.write_str("AWAY"),
            Self::Alarm => f.write_str("ALARM"),
            Self::Exit => f.write_str("EXIT"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

/// The derived, human-meaningful snapshot recomputed on every status
/// refresh. Replaced wholesale; never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Whether the partition can be armed.
    pub ready: bool,
    /// Whether the panel is reachable from the server.
    pub connected: bool,
    /// Derived arm state.
    pub state: SystemState,
    /// Whether an alarm condition is ongoing.
    pub alarm_active: bool,
}

/// Collapse the raw signals into a [`StatusSnapshot`].
///
/// With no active alarms, an `EXIT` status while the state already reads
/// `HOME`/`AWAY` means the exit delay is running — surfaced as `Arming`.
/// With active alarms, a `HOME`/`AWAY` state becomes `Alarm`; any other
/// state is kept as reported with the alarm flagged (covers an alarm
/// tripping during exit delay or mid-disarm).
pub fn derive_snapshot(
    connected: bool,
    partition: &PartitionStatus,
    alarms: &[Alarm],
) -> StatusSnapshot {
    let raw = SystemState::from_raw(&partition.state);

    let (state, alarm_active) = if alarms.is_empty() {
        if partition.status == "EXIT" && raw.is_armed() {
            (SystemState::Arming, false)
        } else {
            (raw, false)
        }
    } else if raw.is_armed() {
        (SystemState::Alarm, true)
    } else {
        (raw, true)
    };

    StatusSnapshot {
        ready: partition.ready,
        connected,
        state,
        alarm_active,
    }
}
