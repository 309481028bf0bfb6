//! Dataset operations, including the column-derivation fallback.

use serde_json::Value;
use tracing::{debug, instrument, warn};

use birdseye_core::Result;

use crate::client::Client;
use crate::endpoints::{DATASET, DatasetDetail};
use crate::request::RequestSpec;
use crate::resources::require_fields;

/// Fields a dataset create payload must carry.
const REQUIRED_CREATE_FIELDS: &[&str] = &["database", "table_name"];

impl Client {
    /// List datasets.
    #[instrument(skip(self))]
    pub async fn datasets(&self) -> Result<Vec<Value>> {
        debug!("listing datasets");
        self.dispatch_result(RequestSpec::get(DATASET)).await
    }

    /// Create a dataset.
    ///
    /// # Errors
    ///
    /// [`ValidationError::MissingField`](birdseye_core::ValidationError)
    /// before any network call when `database` or `table_name` is absent.
    #[instrument(skip(self, payload))]
    pub async fn create_dataset(&self, payload: &Value) -> Result<Value> {
        require_fields(payload, REQUIRED_CREATE_FIELDS)?;
        debug!("creating dataset");
        self.dispatch(RequestSpec::post(DATASET).with_json(payload))
            .await
    }

    /// Fetch one dataset's detail.
    #[instrument(skip(self))]
    pub async fn dataset(&self, dataset_id: i64) -> Result<DatasetDetail> {
        self.dispatch_result(RequestSpec::get(format!("dataset/{dataset_id}")))
            .await
    }

    /// Update a dataset.
    #[instrument(skip(self, payload))]
    pub async fn update_dataset(&self, dataset_id: i64, payload: &Value) -> Result<Value> {
        debug!("updating dataset");
        self.dispatch(RequestSpec::put(format!("dataset/{dataset_id}")).with_json(payload))
            .await
    }

    /// Delete a dataset.
    #[instrument(skip(self))]
    pub async fn delete_dataset(&self, dataset_id: i64) -> Result<Value> {
        self.dispatch(RequestSpec::delete(format!("dataset/{dataset_id}")))
            .await
    }

    /// The columns of a dataset.
    ///
    /// When the dataset detail carries no columns, they are re-derived
    /// from the physical table via the database's table-metadata lookup
    /// using the detail's `database.id`/`table_name`/`schema`. A detail
    /// without those references yields whatever the detail held.
    #[instrument(skip(self))]
    pub async fn dataset_columns(&self, dataset_id: i64) -> Result<Vec<Value>> {
        let detail = self.dataset(dataset_id).await?;

        if let Some(columns) = &detail.columns
            && !columns.is_empty()
        {
            return Ok(columns.clone());
        }

        match (&detail.database, &detail.table_name) {
            (Some(database), Some(table_name)) => {
                warn!(
                    dataset_id,
                    "dataset detail has no columns, deriving from table metadata"
                );
                let metadata = self
                    .table_metadata(database.id, table_name, detail.schema.as_deref())
                    .await?;
                Ok(metadata.columns)
            }
            _ => Ok(detail.columns.unwrap_or_default()),
        }
    }

    /// The metrics of a dataset; empty when the detail defines none.
    #[instrument(skip(self))]
    pub async fn dataset_metrics(&self, dataset_id: i64) -> Result<Vec<Value>> {
        let detail = self.dataset(dataset_id).await?;
        Ok(detail.metrics.unwrap_or_default())
    }
}
