// Authentication endpoints
//
// The handshake is two-step: `login` trades account credentials for a
// user token, then `panel_login` trades the panel master code (authorized
// by that user token) for a session token. Every panel-data call needs
// both tokens at once.

use secrecy::ExposeSecret;
use serde_json::json;
use tracing::debug;

use crate::client::{APP_TYPE, Auth, PanelClient};
use crate::error::Error;
use crate::models::{LoginResponse, PanelLoginResponse, VersionInfo};

/// Rejections during a login step are authentication failures, whatever
/// the HTTP status was.
fn as_auth_failure(err: Error) -> Error {
    match err {
        Error::Request { status, body } => Error::Authentication {
            message: format!("login rejected (HTTP {status}): {body}"),
        },
        other => other,
    }
}

impl PanelClient {
    /// Probe which REST API versions the server supports.
    ///
    /// `GET /rest_api/version` — the only call that runs without any token.
    pub async fn get_version_info(&self) -> Result<VersionInfo, Error> {
        let url = self.version_url();
        self.get(url, Auth::None).await
    }

    /// Log in with the account credentials and store the user token.
    ///
    /// `POST /rest_api/{version}/auth` with `{email, password, app_id}`.
    /// Fails with [`Error::Authentication`] when the server rejects the
    /// credentials or the response carries no `user_token`.
    pub async fn login(&mut self) -> Result<(), Error> {
        let url = self.api_url("auth");
        let body = json!({
            "email": self.config().user_email,
            "password": self.config().user_password.expose_secret(),
            "app_id": self.config().app_id,
        });

        let resp: LoginResponse = self
            .post(url, &body, Auth::None)
            .await
            .map_err(as_auth_failure)?;
        let token = resp.user_token.ok_or_else(|| Error::Authentication {
            message: "login response carried no user_token".into(),
        })?;

        debug!("user login succeeded");
        self.set_user_token(token);
        Ok(())
    }

    /// Log in to the panel and store the session token.
    ///
    /// `POST /rest_api/{version}/panel/login` with `{user_code, app_type,
    /// app_id, panel_serial}`, authorized by the user token — `login()`
    /// must have succeeded first.
    pub async fn panel_login(&mut self) -> Result<(), Error> {
        let url = self.api_url("panel/login");
        let body = json!({
            "user_code": self.config().user_code,
            "app_type": APP_TYPE,
            "app_id": self.config().app_id,
            "panel_serial": self.config().panel_id,
        });

        let resp: PanelLoginResponse = self
            .post(url, &body, Auth::User)
            .await
            .map_err(as_auth_failure)?;
        let token = resp.session_token.ok_or_else(|| Error::Authentication {
            message: "panel login response carried no session_token".into(),
        })?;

        debug!("panel login succeeded");
        self.set_session_token(token);
        Ok(())
    }

    /// Check whether the token pair is still accepted by probing the
    /// status endpoint.
    pub async fn is_logged_in(&self) -> bool {
        self.get_status().await.is_ok()
    }
}
