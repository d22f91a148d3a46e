// Arm/disarm commands
//
// Commands are asynchronous on the server side: `set_state` returns
// immediately and the panel applies the change during the exit delay.
// Completion can be confirmed via `get_process_status`; this crate does
// not poll on its own.
//
// The `partition` argument on the arm/disarm methods is accepted but NOT
// forwarded — the wire body always carries `partition: -1` ("all"), which
// is what the reference mobile client sends. Single-partition deployments
// behave identically either way; revisit if multi-partition addressing is
// ever confirmed to work upstream.

use serde_json::json;
use tracing::debug;

use crate::client::{Auth, PanelClient};
use crate::error::Error;
use crate::models::ProcessStatus;

impl PanelClient {
    /// Arm in Home mode, with exit delay.
    ///
    /// `POST /rest_api/{version}/set_state` with
    /// `{"partition": -1, "state": "HOME"}`.
    pub async fn arm_home(&self, partition: i32) -> Result<serde_json::Value, Error> {
        debug!(partition, "arming home");
        self.set_state("HOME").await
    }

    /// Arm in Away mode, with exit delay.
    ///
    /// `POST /rest_api/{version}/set_state` with
    /// `{"partition": -1, "state": "AWAY"}`.
    pub async fn arm_away(&self, partition: i32) -> Result<serde_json::Value, Error> {
        debug!(partition, "arming away");
        self.set_state("AWAY").await
    }

    /// Disarm the alarm system.
    ///
    /// `POST /rest_api/{version}/set_state` with
    /// `{"partition": -1, "state": "DISARM"}`.
    pub async fn disarm(&self, partition: i32) -> Result<serde_json::Value, Error> {
        debug!(partition, "disarming");
        self.set_state("DISARM").await
    }

    async fn set_state(&self, state: &str) -> Result<serde_json::Value, Error> {
        let url = self.api_url("set_state");
        let body = json!({
            "partition": -1,
            "state": state,
        });
        self.post(url, &body, Auth::Full).await
    }

    /// Poll an async command's completion status by process token.
    ///
    /// `GET /rest_api/{version}/process_status?process_tokens={token}`
    ///
    /// Returns the first entry of the result sequence, or `None` when the
    /// server reports nothing for the token.
    pub async fn get_process_status(&self, token: &str) -> Result<Option<ProcessStatus>, Error> {
        let mut url = self.api_url("process_status");
        url.query_pairs_mut().append_pair("process_tokens", token);
        debug!(token, "polling process status");
        let mut entries: Vec<ProcessStatus> = self.get(url, Auth::Full).await?;
        if entries.is_empty() {
            return Ok(None);
        }
        Ok(Some(entries.swap_remove(0)))
    }
}
