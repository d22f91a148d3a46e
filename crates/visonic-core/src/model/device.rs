// ── Device classification ──
//
// The server reports every enrolled peripheral through one flat record;
// the `subtype` field decides what the device actually is. Classification
// happens once, when the raw record is taken into the cache, and the kind
// is never re-tagged afterwards.

use serde::{Deserialize, Serialize};
use visonic_api::models::RawDevice;

/// What kind of peripheral a device is, chosen from `subtype`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceKind {
    Contact,
    Camera,
    Motion,
    Smoke,
    Generic,
}

/// Machine state of a device.
///
/// Only contact sensors expose a real state (inferred from the warnings
/// text); the upstream data carries no machine state for the other kinds,
/// so they report `Unknown` by design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceState {
    Opened,
    Closed,
    Unknown,
}

/// A classified device in the alarm system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: i64,
    pub name: String,
    pub zone: Option<String>,
    pub device_type: Option<String>,
    pub subtype: String,
    pub pre_enroll: bool,
    /// Raw warnings payload, kept verbatim; contact state is scanned out
    /// of its text form.
    pub warnings: Option<serde_json::Value>,
    pub partitions: Vec<i32>,
    pub kind: DeviceKind,
}

impl Device {
    /// Classify a raw record into a device.
    ///
    /// Returns `None` for records without a subtype — the server emits
    /// them for half-enrolled slots and they carry nothing usable.
    pub fn classify(raw: RawDevice) -> Option<Self> {
        let subtype = raw.subtype?;
        let kind = DeviceKind::from_subtype(&subtype);
        Some(Self {
            id: raw.id,
            name: raw.name,
            zone: raw.zone_type,
            device_type: raw.device_type,
            subtype,
            pre_enroll: raw.preenroll,
            warnings: raw.warnings,
            partitions: raw.partitions,
            kind,
        })
    }

    /// Current machine state of the device.
    ///
    /// Contact sensors are `Opened` when the warnings text carries an
    /// `OPENED` marker and `Closed` otherwise; every other kind is
    /// `Unknown`.
    pub fn state(&self) -> DeviceState {
        if self.kind != DeviceKind::Contact {
            return DeviceState::Unknown;
        }
        match &self.warnings {
            Some(warnings) if warnings.to_string().contains("OPENED") => DeviceState::Opened,
            _ => DeviceState::Closed,
        }
    }
}

impl DeviceKind {
    /// Pure classification by subtype. `CONTACT` matches by substring so
    /// `CONTACT_AUX` lands in the same bucket.
    pub fn from_subtype(subtype: &str) -> Self {
        if subtype.contains("CONTACT") {
            Self::Contact
        } else if subtype == "MOTION_CAMERA" {
            Self::Camera
        } else if subtype == "MOTION" || subtype == "CURTAIN" {
            Self::Motion
        } else if subtype == "SMOKE" {
            Self::Smoke
        } else {
            Self::Generic
        }
    }
}
