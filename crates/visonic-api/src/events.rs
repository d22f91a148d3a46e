// Event log endpoint

use tracing::debug;

use crate::client::{Auth, PanelClient};
use crate::error::Error;
use crate::models::Event;

impl PanelClient {
    /// Get the panel event log, oldest first.
    ///
    /// `GET /rest_api/{version}/events`
    pub async fn get_events(&self) -> Result<Vec<Event>, Error> {
        let url = self.api_url("events");
        debug!("fetching events");
        self.get(url, Auth::Full).await
    }
}
