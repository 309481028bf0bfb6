//! SQL Lab execution and the SQL-derived dataset preview.

use serde_json::Value;
use tracing::{debug, instrument};

use birdseye_core::error::ValidationError;
use birdseye_core::Result;

use crate::client::Client;
use crate::endpoints::{SQLLAB_EXECUTE, SqlExecuteRequest};
use crate::request::RequestSpec;

/// Aggregation shape for a SQL-derived preview.
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    /// Metric expressions; the literal `count` becomes `COUNT(*)`.
    pub metrics: Vec<String>,
    /// Grouping columns.
    pub groupby: Vec<String>,
    /// Row limit of the generated query.
    pub row_limit: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            metrics: vec!["count".to_string()],
            groupby: Vec::new(),
            row_limit: 1000,
        }
    }
}

impl Client {
    /// Execute a SQL statement through SQL Lab.
    #[instrument(skip(self, request), fields(database_id = request.database_id))]
    pub async fn execute_sql(&self, request: &SqlExecuteRequest) -> Result<Value> {
        debug!("executing SQL");
        self.dispatch(RequestSpec::post(SQLLAB_EXECUTE).with_json(request))
            .await
    }

    /// Preview a dataset by generating and executing an aggregation
    /// query against its physical table.
    ///
    /// # Errors
    ///
    /// [`ValidationError::MissingField`](birdseye_core::ValidationError)
    /// when the dataset detail lacks the database reference or table
    /// name the query needs.
    #[instrument(skip(self, config))]
    pub async fn preview_via_sql(
        &self,
        dataset_id: i64,
        config: &PreviewConfig,
    ) -> Result<Value> {
        let detail = self.dataset(dataset_id).await?;

        let database_id = detail
            .database
            .as_ref()
            .map(|db| db.id)
            .ok_or_else(|| ValidationError::MissingField {
                field: "database".to_string(),
            })?;
        let table_name = detail
            .table_name
            .as_deref()
            .ok_or_else(|| ValidationError::MissingField {
                field: "table_name".to_string(),
            })?;

        let sql = build_preview_sql(detail.schema.as_deref(), table_name, config);
        debug!(%sql, "generated preview query");

        let mut request = SqlExecuteRequest::new(database_id, sql);
        request.schema = detail.schema.clone();
        self.execute_sql(&request).await
    }
}

/// Assemble the preview query: grouping columns, metric expressions, an
/// optional schema-qualified table, GROUP BY, and a row limit.
fn build_preview_sql(schema: Option<&str>, table: &str, config: &PreviewConfig) -> String {
    let mut select_items: Vec<String> = config.groupby.clone();
    for metric in &config.metrics {
        if metric == "count" {
            select_items.push("COUNT(*) AS count".to_string());
        } else {
            select_items.push(metric.clone());
        }
    }
    if select_items.is_empty() {
        select_items.push("*".to_string());
    }

    let qualified = match schema {
        Some(schema) => format!("{schema}.{table}"),
        None => table.to_string(),
    };

    let mut sql = format!("SELECT {} FROM {}", select_items.join(", "), qualified);
    if !config.groupby.is_empty() {
        sql.push_str(&format!(" GROUP BY {}", config.groupby.join(", ")));
    }
    sql.push_str(&format!(" LIMIT {}", config.row_limit));
    sql
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouped_count_query() {
        let config = PreviewConfig {
            metrics: vec!["count".to_string()],
            groupby: vec!["region".to_string(), "status".to_string()],
            row_limit: 100,
        };
        assert_eq!(
            build_preview_sql(Some("sales"), "orders", &config),
            "SELECT region, status, COUNT(*) AS count FROM sales.orders GROUP BY region, status LIMIT 100"
        );
    }

    #[test]
    fn ungrouped_custom_metric() {
        let config = PreviewConfig {
            metrics: vec!["SUM(amount)".to_string()],
            groupby: Vec::new(),
            row_limit: 10,
        };
        assert_eq!(
            build_preview_sql(None, "orders", &config),
            "SELECT SUM(amount) FROM orders LIMIT 10"
        );
    }

    #[test]
    fn empty_config_selects_star() {
        let config = PreviewConfig {
            metrics: Vec::new(),
            groupby: Vec::new(),
            row_limit: 5,
        };
        assert_eq!(
            build_preview_sql(None, "orders", &config),
            "SELECT * FROM orders LIMIT 5"
        );
    }
}
