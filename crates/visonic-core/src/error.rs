// ── Core error types ──
//
// Domain-facing errors from visonic-core. Authentication failures are
// folded into a single variant regardless of which handshake step
// rejected; everything else from the wire layer passes through as `Api`
// so callers keep the status code and body.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The server does not speak the REST API version this client needs.
    /// Raised by `connect()` before any login is attempted.
    #[error("REST API version {required} is not supported by the server (available: {available:?})")]
    UnsupportedVersion {
        required: &'static str,
        available: Vec<String>,
    },

    /// User login or panel login was rejected, or a token went stale.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// An operation that needs a ready session was called before
    /// `connect()` succeeded.
    #[error("Not connected -- call connect() first")]
    NotConnected,

    /// The status response carried no partition records.
    #[error("Status response contained no partition data")]
    NoPartitions,

    /// An event timestamp could not be parsed.
    #[error("Unparseable event timestamp: {value}")]
    InvalidTimestamp { value: String },

    /// Any other wire-layer failure, passed through with full detail.
    #[error(transparent)]
    Api(visonic_api::Error),
}

impl From<visonic_api::Error> for CoreError {
    fn from(err: visonic_api::Error) -> Self {
        match err {
            visonic_api::Error::Authentication { message } => Self::AuthenticationFailed { message },
            other => Self::Api(other),
        }
    }
}
