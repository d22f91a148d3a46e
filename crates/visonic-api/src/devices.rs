// Device endpoints

use tracing::debug;

use crate::client::{Auth, PanelClient};
use crate::error::Error;
use crate::models::RawDevice;

impl PanelClient {
    /// List every device enrolled in the alarm system.
    ///
    /// `GET /rest_api/{version}/devices`
    ///
    /// Returns the raw records; classification into device kinds is the
    /// domain layer's job.
    pub async fn get_all_devices(&self) -> Result<Vec<RawDevice>, Error> {
        let url = self.api_url("devices");
        debug!("listing devices");
        self.get(url, Auth::Full).await
    }
}
