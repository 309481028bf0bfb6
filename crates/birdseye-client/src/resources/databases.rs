//! Database operations: CRUD and physical-schema introspection.

use serde_json::Value;
use tracing::{debug, instrument};

use birdseye_core::Result;

use crate::client::Client;
use crate::endpoints::{DATABASE, TableMetadata};
use crate::request::RequestSpec;

impl Client {
    /// List configured databases.
    #[instrument(skip(self))]
    pub async fn databases(&self) -> Result<Vec<Value>> {
        debug!("listing databases");
        self.dispatch_result(RequestSpec::get(DATABASE)).await
    }

    /// Fetch one database by id. Returns the full response body (the
    /// detail sits under `result` next to top-level siblings).
    #[instrument(skip(self))]
    pub async fn database(&self, database_id: i64) -> Result<Value> {
        self.dispatch(RequestSpec::get(format!("database/{database_id}")))
            .await
    }

    /// Create a database connection.
    #[instrument(skip(self, payload))]
    pub async fn create_database(&self, payload: &Value) -> Result<Value> {
        debug!("creating database");
        self.dispatch(RequestSpec::post(DATABASE).with_json(payload))
            .await
    }

    /// Update a database connection.
    #[instrument(skip(self, payload))]
    pub async fn update_database(&self, database_id: i64, payload: &Value) -> Result<Value> {
        debug!("updating database");
        self.dispatch(RequestSpec::put(format!("database/{database_id}")).with_json(payload))
            .await
    }

    /// Delete a database connection.
    #[instrument(skip(self))]
    pub async fn delete_database(&self, database_id: i64) -> Result<Value> {
        self.dispatch(RequestSpec::delete(format!("database/{database_id}")))
            .await
    }

    /// Test a connection configuration without saving it.
    #[instrument(skip(self, payload))]
    pub async fn test_database_connection(&self, payload: &Value) -> Result<Value> {
        debug!("testing database connection");
        self.dispatch(RequestSpec::post("database/test_connection/").with_json(payload))
            .await
    }

    /// List the schemas of a database.
    #[instrument(skip(self))]
    pub async fn database_schemas(&self, database_id: i64) -> Result<Vec<String>> {
        self.dispatch_result(RequestSpec::get(format!("database/{database_id}/schemas/")))
            .await
    }

    /// List the tables of a database, optionally filtered to one schema.
    #[instrument(skip(self))]
    pub async fn database_tables(
        &self,
        database_id: i64,
        schema: Option<&str>,
    ) -> Result<Vec<Value>> {
        let mut spec = RequestSpec::get(format!("database/{database_id}/tables/"));
        if let Some(schema) = schema {
            spec = spec.with_query("schema_name", schema);
        }
        self.dispatch_result(spec).await
    }

    /// Introspect the columns of a physical table.
    ///
    /// This endpoint returns the metadata object bare, without the result
    /// envelope.
    #[instrument(skip(self))]
    pub async fn table_metadata(
        &self,
        database_id: i64,
        table_name: &str,
        schema: Option<&str>,
    ) -> Result<TableMetadata> {
        let mut spec = RequestSpec::get(format!("database/{database_id}/table_metadata/"))
            .with_query("table_name", table_name);
        if let Some(schema) = schema {
            spec = spec.with_query("schema_name", schema);
        }
        self.dispatch(spec).await
    }

    /// Preview rows of a physical table.
    #[instrument(skip(self))]
    pub async fn select_star(
        &self,
        database_id: i64,
        table_name: &str,
        schema: Option<&str>,
    ) -> Result<Value> {
        let mut payload = serde_json::json!({ "table_name": table_name });
        if let Some(schema) = schema {
            payload["schema_name"] = Value::String(schema.to_string());
        }
        self.dispatch(
            RequestSpec::post(format!("database/{database_id}/select_star/")).with_json(&payload),
        )
        .await
    }

    /// Validate the stored connection parameters of a database.
    #[instrument(skip(self))]
    pub async fn validate_database_parameters(&self, database_id: i64) -> Result<Value> {
        self.dispatch(RequestSpec::get(format!(
            "database/{database_id}/validate_parameters/"
        )))
        .await
    }

    /// List the SQL function names the database engine exposes.
    #[instrument(skip(self))]
    pub async fn database_function_names(&self, database_id: i64) -> Result<Vec<String>> {
        self.dispatch_result(RequestSpec::get(format!(
            "database/{database_id}/function_names/"
        )))
        .await
    }
}
