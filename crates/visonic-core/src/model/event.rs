// ── Event history ──

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// What a panel event did, derived from its numeric type code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventAction {
    Disarm,
    ArmHome,
    ArmAway,
    Alarm,
    /// Any other type code the client does not map, kept for display.
    Other(i64),
}

impl From<i64> for EventAction {
    fn from(type_id: i64) -> Self {
        match type_id {
            89 => Self::Disarm,
            85 => Self::ArmHome,
            86 => Self::ArmAway,
            2 => Self::Alarm,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for EventAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disarm => f.write_str("Disarm"),
            Self::ArmHome => f.write_str("ArmHome"),
            Self::ArmAway => f.write_str("ArmAway"),
            Self::Alarm => f.write_str("Alarm"),
            Self::Other(type_id) => write!(f, "Unknown type_id: {type_id}"),
        }
    }
}

/// The most recent entry of the panel event log, interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub event_id: i64,
    pub action: EventAction,
    /// User or device that caused the event.
    pub user: String,
    /// Panel-local timestamp, shifted by the caller-supplied hour offset.
    pub timestamp: NaiveDateTime,
}

/// Parse a panel timestamp.
///
/// Panels report `2020-11-09 09:20:04`; some server versions emit ISO-8601
/// instead, so those are accepted too.
pub(crate) fn parse_panel_timestamp(value: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 3] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for format in FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed);
        }
    }
    chrono::DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_codes_map_to_actions() {
        assert_eq!(EventAction::from(89), EventAction::Disarm);
        assert_eq!(EventAction::from(85), EventAction::ArmHome);
        assert_eq!(EventAction::from(86), EventAction::ArmAway);
        assert_eq!(EventAction::from(2), EventAction::Alarm);
        assert_eq!(EventAction::from(42), EventAction::Other(42));
    }

    #[test]
    fn unknown_action_label_carries_the_code() {
        let label = EventAction::from(1234).to_string();
        assert!(label.contains("1234"), "label was: {label}");
    }

    #[test]
    fn panel_timestamps_parse() {
        let parsed = parse_panel_timestamp("2020-11-09 09:20:04").expect("panel format");
        assert_eq!(parsed.to_string(), "2020-11-09 09:20:04");

        assert!(parse_panel_timestamp("2020-11-09T09:20:04").is_some());
        assert!(parse_panel_timestamp("2020-11-09T09:20:04.123").is_some());
        assert!(parse_panel_timestamp("2020-11-09T09:20:04+01:00").is_some());
        assert!(parse_panel_timestamp("last tuesday").is_none());
    }
}
