// PowerManage HTTP client
//
// Wraps `reqwest::Client` with API-version URL construction, token-scope
// header attachment, and unified non-2xx handling. All endpoint families
// (auth, panel, devices, events, commands) are implemented as inherent
// methods via separate files to keep this module focused on transport
// mechanics.

use reqwest::RequestBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::PanelConfig;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Client identifier sent during panel login. The server only accepts
/// logins from known application types.
pub(crate) const APP_TYPE: &str = "com.visonic.PowerMaxApp";

/// User agent of the iOS app the server is known to accept.
pub const USER_AGENT: &str = "Visonic%20GO/2.8.62.91 CFNetwork/901.1 Darwin/17.6.0";

/// REST API version this client speaks.
pub const REST_VERSION: &str = "8.0";

/// Which tokens an endpoint requires.
///
/// Mirrors the server's auth model: the version probe and user login are
/// unauthenticated, panel login is authorized by the user token alone, and
/// every panel-data/command call needs both tokens at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Auth {
    None,
    User,
    Full,
}

/// Raw HTTP client for the PowerManage REST API.
///
/// Owns the connection configuration and the mutable token pair obtained
/// during the two-step authentication handshake. Token validity is not
/// tracked; an expired session surfaces as [`Error::Authentication`] on
/// the next call, and the caller re-runs the handshake.
pub struct PanelClient {
    http: reqwest::Client,
    base_url: Url,
    config: PanelConfig,
    user_token: Option<String>,
    session_token: Option<String>,
}

impl PanelClient {
    /// Create a new client from a `PanelConfig`.
    ///
    /// The base URL is derived from the configured hostname
    /// (`https://{hostname}/rest_api`).
    pub fn new(config: PanelConfig, transport: &TransportConfig) -> Result<Self, Error> {
        let base_url = config.base_url()?;
        Self::with_base_url(base_url, config, transport)
    }

    /// Create a client against an explicit base URL.
    ///
    /// Use this when the server root differs from the standard
    /// `https://{hostname}/rest_api` scheme (test harnesses, proxies).
    pub fn with_base_url(
        base_url: Url,
        config: PanelConfig,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client(&config.hostname)?;
        Ok(Self {
            http,
            base_url,
            config,
            user_token: None,
            session_token: None,
        })
    }

    /// The connection configuration.
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// The partition this client was configured for.
    pub fn partition(&self) -> i32 {
        self.config.partition
    }

    /// The user token, once `login()` has succeeded.
    pub fn user_token(&self) -> Option<&str> {
        self.user_token.as_deref()
    }

    /// The session token, once `panel_login()` has succeeded.
    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    pub(crate) fn set_user_token(&mut self, token: String) {
        self.user_token = Some(token);
    }

    pub(crate) fn set_session_token(&mut self, token: String) {
        self.session_token = Some(token);
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for a versioned API path:
    /// `{base}/{REST_VERSION}/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/{REST_VERSION}/{path}");
        Url::parse(&full).expect("invalid API URL")
    }

    /// The unversioned version-probe URL: `{base}/version`.
    pub(crate) fn version_url(&self) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/version");
        Url::parse(&full).expect("invalid version URL")
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request with the given token scope.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url, auth: Auth) -> Result<T, Error> {
        debug!("GET {}", url);
        let req = self.apply_auth(self.http.get(url), auth)?;
        let resp = req.send().await.map_err(Error::Transport)?;
        Self::parse_response(resp).await
    }

    /// Send a POST request with a JSON body and the given token scope.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
        auth: Auth,
    ) -> Result<T, Error> {
        debug!("POST {}", url);
        let req = self.apply_auth(self.http.post(url), auth)?;
        let resp = req.json(body).send().await.map_err(Error::Transport)?;
        Self::parse_response(resp).await
    }

    /// Attach `User-Token`/`Session-Token` headers per the endpoint's
    /// scope. A missing required token fails before any bytes hit the
    /// wire — the handshake has to run first.
    fn apply_auth(&self, req: RequestBuilder, auth: Auth) -> Result<RequestBuilder, Error> {
        match auth {
            Auth::None => Ok(req),
            Auth::User => {
                let user = self.user_token.as_deref().ok_or(Error::Authentication {
                    message: "user login required first".into(),
                })?;
                Ok(req.header("User-Token", user))
            }
            Auth::Full => {
                let user = self.user_token.as_deref().ok_or(Error::Authentication {
                    message: "user login required first".into(),
                })?;
                let session = self.session_token.as_deref().ok_or(Error::Authentication {
                    message: "panel login required first".into(),
                })?;
                Ok(req.header("User-Token", user).header("Session-Token", session))
            }
        }
    }

    /// Map the response: 2xx is deserialized, 401/403 is an authentication
    /// failure, anything else yields `Request { status, body }` with the
    /// raw body kept for debugging.
    async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(Error::Authentication {
                message: format!("server rejected credentials (HTTP {}): {body}", status.as_u16()),
            });
        }
        if !status.is_success() {
            return Err(Error::Request {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}
