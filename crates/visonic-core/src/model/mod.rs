// ── Domain model ──
//
// Typed, derived representations of raw panel responses. Everything here
// is a pure function of the wire payloads; no module in `model` performs
// I/O.

pub mod device;
pub mod event;
pub mod state;

pub use device::{Device, DeviceKind, DeviceState};
pub use event::{EventAction, EventRecord};
pub use state::{StatusSnapshot, SystemState};
