// Panel data endpoints
//
// Read-only snapshots of panel state. All of these require the full token
// pair. Troubles, alerts, locations, and wakeup-SMS info are returned as
// loosely-typed JSON because their field sets vary by panel firmware and
// the domain layer caches them verbatim.

use tracing::debug;

use crate::client::{Auth, PanelClient};
use crate::error::Error;
use crate::models::{Alarm, PanelInfo, Status};

impl PanelClient {
    /// Get the current status of the alarm system.
    ///
    /// `GET /rest_api/{version}/status`
    pub async fn get_status(&self) -> Result<Status, Error> {
        let url = self.api_url("status");
        debug!("fetching status");
        self.get(url, Auth::Full).await
    }

    /// Get the currently active alarm events.
    ///
    /// `GET /rest_api/{version}/alarms`
    pub async fn get_alarms(&self) -> Result<Vec<Alarm>, Error> {
        let url = self.api_url("alarms");
        debug!("fetching alarms");
        self.get(url, Auth::Full).await
    }

    /// Get the current troubles (low battery, tamper, ...).
    ///
    /// `GET /rest_api/{version}/troubles`
    pub async fn get_troubles(&self) -> Result<Vec<serde_json::Value>, Error> {
        let url = self.api_url("troubles");
        debug!("fetching troubles");
        self.get(url, Auth::Full).await
    }

    /// Get the current alerts.
    ///
    /// `GET /rest_api/{version}/alerts`
    pub async fn get_alerts(&self) -> Result<Vec<serde_json::Value>, Error> {
        let url = self.api_url("alerts");
        debug!("fetching alerts");
        self.get(url, Auth::Full).await
    }

    /// Get static panel information (serial, model).
    ///
    /// `GET /rest_api/{version}/panel_info`
    pub async fn get_panel_info(&self) -> Result<PanelInfo, Error> {
        let url = self.api_url("panel_info");
        debug!("fetching panel info");
        self.get(url, Auth::Full).await
    }

    /// Get all locations configured in the alarm system.
    ///
    /// `GET /rest_api/{version}/locations`
    pub async fn get_locations(&self) -> Result<Vec<serde_json::Value>, Error> {
        let url = self.api_url("locations");
        debug!("fetching locations");
        self.get(url, Auth::Full).await
    }

    /// Get the information needed to send a wakeup SMS to the panel.
    ///
    /// `GET /rest_api/{version}/wakeup_sms`
    pub async fn get_wakeup_sms(&self) -> Result<serde_json::Value, Error> {
        let url = self.api_url("wakeup_sms");
        debug!("fetching wakeup sms info");
        self.get(url, Auth::Full).await
    }
}
