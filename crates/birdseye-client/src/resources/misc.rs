//! Health, API metadata, favorites, and the activity log.

use serde_json::{Value, json};
use tracing::{debug, instrument};

use birdseye_core::Result;

use crate::client::Client;
use crate::endpoints::{ActivityEntry, LOG, ME_FAVORITES, OPENAPI};
use crate::request::RequestSpec;

impl Client {
    /// Check the server's health endpoint. The body is plain text
    /// (conventionally `OK`), outside the API prefix.
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<String> {
        self.dispatch_text(RequestSpec::health()).await
    }

    /// True iff the health endpoint answered successfully.
    pub async fn check_connection(&self) -> bool {
        self.health().await.is_ok()
    }

    /// The server's OpenAPI description.
    #[instrument(skip(self))]
    pub async fn api_info(&self) -> Result<Value> {
        self.dispatch(RequestSpec::get(OPENAPI)).await
    }

    /// The authenticated user's favorites.
    #[instrument(skip(self))]
    pub async fn favorites(&self) -> Result<Vec<Value>> {
        self.dispatch_result(RequestSpec::get(ME_FAVORITES)).await
    }

    /// Add or remove a favorite for an object.
    #[instrument(skip(self))]
    pub async fn toggle_favorite(&self, object_type: &str, object_id: i64) -> Result<Value> {
        debug!("toggling favorite");
        let payload = json!({
            "object_type": object_type,
            "object_id": object_id,
        });
        self.dispatch(RequestSpec::post(ME_FAVORITES).with_json(&payload))
            .await
    }

    /// Recent activity entries from the server log.
    #[instrument(skip(self))]
    pub async fn recent_activity(&self) -> Result<Vec<ActivityEntry>> {
        self.dispatch_result(RequestSpec::get(LOG)).await
    }
}
