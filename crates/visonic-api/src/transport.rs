// Shared transport configuration for building reqwest::Client instances.
//
// The PowerManage cloud only talks to clients that present the headers of
// a known mobile app, so the fixed header set is installed once as default
// headers instead of being rebuilt per call.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};

use crate::client::USER_AGENT;
use crate::error::Error;

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Request timeout. The upstream API imposes none; 30 s keeps a dead
    /// server from blocking the caller indefinitely.
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config with the fixed
    /// mobile-client header set for `hostname` installed as defaults.
    pub fn build_client(&self, hostname: &str) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(default_headers(hostname)?)
            .build()
            .map_err(Error::Transport)
    }
}

/// The fixed headers the server expects on every request (GET and POST).
///
/// `Content-Type`/`Content-Length` are added by reqwest when a JSON body
/// is attached; `Session-Token`/`User-Token` are attached per request by
/// the client according to the endpoint's auth scope.
fn default_headers(hostname: &str) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        reqwest::header::HOST,
        HeaderValue::from_str(hostname)
            .map_err(|_| Error::InvalidHostname(hostname.to_owned()))?,
    );
    headers.insert(reqwest::header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(reqwest::header::ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(reqwest::header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
    headers.insert(
        reqwest::header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-us"),
    );
    headers.insert(
        reqwest::header::ACCEPT_ENCODING,
        HeaderValue::from_static("br, gzip, deflate"),
    );
    Ok(headers)
}
