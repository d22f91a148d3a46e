// visonic-api: Async Rust client for the Visonic PowerManage cloud REST API

pub mod auth;
pub mod client;
pub mod commands;
pub mod config;
pub mod devices;
pub mod error;
pub mod events;
pub mod models;
pub mod panel;
pub mod transport;

pub use client::{PanelClient, REST_VERSION, USER_AGENT};
pub use config::PanelConfig;
pub use error::Error;
pub use transport::TransportConfig;
