// visonic-core: stateful domain model over the Visonic PowerManage cloud API
//
// `System` wraps the wire-level `visonic_api::PanelClient`, drives the
// two-step authentication handshake, and interprets raw panel responses
// into typed state, devices, and events.

pub mod error;
pub mod model;
pub mod system;

pub use error::CoreError;
pub use model::{Device, DeviceKind, DeviceState, EventAction, EventRecord, StatusSnapshot, SystemState};
pub use system::{ConnectionState, System};

// Re-export the wire layer's entry points so embedders only need one crate.
pub use visonic_api::{PanelClient, PanelConfig, TransportConfig};
