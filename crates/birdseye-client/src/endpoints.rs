//! Endpoint paths and request/response types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ============================================================================
// Endpoint Paths (relative to /api/v1/)
// ============================================================================

/// security/login
pub const SECURITY_LOGIN: &str = "security/login";

/// security/refresh
pub const SECURITY_REFRESH: &str = "security/refresh";

/// security/csrf_token/
pub const SECURITY_CSRF_TOKEN: &str = "security/csrf_token/";

/// security/users/
pub const SECURITY_USERS: &str = "security/users/";

/// security/roles/
pub const SECURITY_ROLES: &str = "security/roles/";

/// security/permissions/
pub const SECURITY_PERMISSIONS: &str = "security/permissions/";

/// me/
pub const ME: &str = "me/";

/// me/favorites/
pub const ME_FAVORITES: &str = "me/favorites/";

/// database/
pub const DATABASE: &str = "database/";

/// dataset/
pub const DATASET: &str = "dataset/";

/// chart/
pub const CHART: &str = "chart/";

/// chart/data/
pub const CHART_DATA: &str = "chart/data/";

/// dashboard/
pub const DASHBOARD: &str = "dashboard/";

/// sqllab/execute/
pub const SQLLAB_EXECUTE: &str = "sqllab/execute/";

/// log/
pub const LOG: &str = "log/";

/// openapi.json
pub const OPENAPI: &str = "openapi.json";

/// Authentication provider identifier sent with every login.
pub const AUTH_PROVIDER: &str = "db";

// ============================================================================
// Request/Response Types
// ============================================================================

/// The conventional `{ "result": ... }` envelope most endpoints use.
#[derive(Debug, Deserialize)]
pub(crate) struct ResultEnvelope<T> {
    pub result: T,
}

/// Request body for security/login.
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub provider: &'a str,
    pub refresh: bool,
}

/// Response from security/login.
///
/// The access token is optional at the wire level: a response without one
/// is treated as a failed login regardless of status.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Request body for security/refresh. The refresh token travels in the
/// body, not the Authorization header.
#[derive(Debug, Serialize)]
pub(crate) struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// Response from security/refresh.
#[derive(Debug, Deserialize)]
pub(crate) struct RefreshResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// The authenticated user, from the `me/` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Reference to the database a dataset is defined on.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseRef {
    pub id: i64,
    #[serde(default)]
    pub database_name: Option<String>,
}

/// Dataset detail, from `dataset/{id}`.
///
/// Only the fields the derived operations need are typed; everything the
/// server adds beyond them is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetDetail {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub table_name: Option<String>,
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub database: Option<DatabaseRef>,
    #[serde(default)]
    pub columns: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub metrics: Option<Vec<serde_json::Value>>,
}

/// Physical table introspection, from `database/{id}/table_metadata/`.
/// This endpoint returns the metadata object bare, without the result
/// envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct TableMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub columns: Vec<serde_json::Value>,
}

/// Request body for sqllab/execute/.
#[derive(Debug, Clone, Serialize)]
pub struct SqlExecuteRequest {
    pub database_id: i64,
    pub sql: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_as_cta: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmp_table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl SqlExecuteRequest {
    /// A plain query against one database, no CTA or limit options.
    pub fn new(database_id: i64, sql: impl Into<String>) -> Self {
        Self {
            database_id,
            sql: sql.into(),
            schema: None,
            select_as_cta: None,
            tmp_table_name: None,
            limit: None,
        }
    }
}

/// One entry of the recent-activity log.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityEntry {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub dttm: Option<NaiveDateTime>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub dashboard_id: Option<i64>,
    #[serde(default)]
    pub slice_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_request_shape() {
        let request = LoginRequest {
            username: "admin",
            password: "secret",
            provider: AUTH_PROVIDER,
            refresh: true,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "username": "admin",
                "password": "secret",
                "provider": "db",
                "refresh": true
            })
        );
    }

    #[test]
    fn sql_request_omits_unset_options() {
        let request = SqlExecuteRequest::new(3, "SELECT 1");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"database_id": 3, "sql": "SELECT 1"}));
    }

    #[test]
    fn dataset_detail_tolerates_missing_fields() {
        let detail: DatasetDetail = serde_json::from_value(json!({"id": 42})).unwrap();
        assert_eq!(detail.id, Some(42));
        assert!(detail.columns.is_none());
        assert!(detail.database.is_none());
    }

    #[test]
    fn activity_entry_parses_naive_timestamp() {
        let entry: ActivityEntry =
            serde_json::from_value(json!({"action": "dashboard", "dttm": "2025-11-04T09:30:00"}))
                .unwrap();
        assert!(entry.dttm.is_some());
    }
}
