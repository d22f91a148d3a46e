use thiserror::Error;

/// Top-level error type for the `visonic-api` crate.
///
/// Covers every failure mode of the wire layer: authentication, transport,
/// and malformed server responses. `visonic-core` maps these into
/// domain-facing errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login or panel login rejected, a required token is missing, or the
    /// server answered 401/403 on an authenticated call.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Hostname cannot be used as a `Host` header value.
    #[error("Invalid hostname: {0}")]
    InvalidHostname(String),

    // ── Server ──────────────────────────────────────────────────────
    /// Any other non-2xx response, with the raw body for debugging.
    #[error("Request failed (HTTP {status}): {body}")]
    Request { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error indicates the token pair is no longer
    /// valid and a fresh `login`/`panel_login` round might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Request { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
