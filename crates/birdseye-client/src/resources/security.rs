//! Security listings: users, roles, permissions.

use serde_json::Value;
use tracing::{debug, instrument};

use birdseye_core::Result;

use crate::client::Client;
use crate::endpoints::{SECURITY_PERMISSIONS, SECURITY_ROLES, SECURITY_USERS};
use crate::request::RequestSpec;

impl Client {
    /// List users.
    #[instrument(skip(self))]
    pub async fn users(&self) -> Result<Vec<Value>> {
        debug!("listing users");
        self.dispatch_result(RequestSpec::get(SECURITY_USERS)).await
    }

    /// List roles.
    #[instrument(skip(self))]
    pub async fn roles(&self) -> Result<Vec<Value>> {
        debug!("listing roles");
        self.dispatch_result(RequestSpec::get(SECURITY_ROLES)).await
    }

    /// List permissions.
    #[instrument(skip(self))]
    pub async fn permissions(&self) -> Result<Vec<Value>> {
        debug!("listing permissions");
        self.dispatch_result(RequestSpec::get(SECURITY_PERMISSIONS))
            .await
    }
}
