// ── Panel connection configuration ──
//
// Describes *how* to reach one panel behind a PowerManage server. Carries
// credential data, never touches disk — the embedding application builds a
// `PanelConfig` and hands it in.

use secrecy::SecretString;
use url::Url;
use uuid::Uuid;

use crate::error::Error;

/// Configuration for connecting to a single alarm panel.
///
/// Immutable once handed to the client. `user_email`/`user_password`
/// authenticate the account (user login); `user_code` is the panel master
/// code used for the panel login; `app_id` is an installation UUID the
/// server uses to distinguish client devices.
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// PowerManage server hostname (e.g. `visonic.tycomonitor.com`).
    pub hostname: String,
    /// Installation UUID registered with the server.
    pub app_id: Uuid,
    /// Panel master code.
    pub user_code: String,
    /// Account email address.
    pub user_email: String,
    /// Account password.
    pub user_password: SecretString,
    /// Panel serial ("panel web name").
    pub panel_id: String,
    /// Partition to operate on. The design targets a single partition per
    /// session; `-1` means "all partitions" on the wire.
    pub partition: i32,
}

impl PanelConfig {
    /// Derive the REST API root for this server: `https://{hostname}/rest_api`.
    pub fn base_url(&self) -> Result<Url, Error> {
        Url::parse(&format!("https://{}/rest_api", self.hostname)).map_err(Error::InvalidUrl)
    }
}
