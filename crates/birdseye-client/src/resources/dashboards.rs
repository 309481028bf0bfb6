//! Dashboard operations, including the position-grid chart placement.

use serde_json::{Map, Value, json};
use tracing::{debug, instrument};

use birdseye_core::Result;

use crate::client::Client;
use crate::endpoints::DASHBOARD;
use crate::request::RequestSpec;
use crate::resources::require_fields;

/// Fields a dashboard create payload must carry.
const REQUIRED_CREATE_FIELDS: &[&str] = &["dashboard_title"];

/// Placement of a chart added to a dashboard grid.
#[derive(Debug, Clone, Default)]
pub struct ChartPosition {
    /// Grid height units; 50 when `None`.
    pub height: Option<u32>,
    /// Grid width units; 4 when `None`.
    pub width: Option<u32>,
    /// Display name of the placed chart.
    pub slice_name: Option<String>,
}

impl Client {
    /// List dashboards.
    #[instrument(skip(self))]
    pub async fn dashboards(&self) -> Result<Vec<Value>> {
        debug!("listing dashboards");
        self.dispatch_result(RequestSpec::get(DASHBOARD)).await
    }

    /// Create a dashboard.
    ///
    /// # Errors
    ///
    /// [`ValidationError::MissingField`](birdseye_core::ValidationError)
    /// before any network call when `dashboard_title` is absent.
    #[instrument(skip(self, payload))]
    pub async fn create_dashboard(&self, payload: &Value) -> Result<Value> {
        require_fields(payload, REQUIRED_CREATE_FIELDS)?;
        debug!("creating dashboard");
        self.dispatch(RequestSpec::post(DASHBOARD).with_json(payload))
            .await
    }

    /// Fetch one dashboard by id.
    #[instrument(skip(self))]
    pub async fn dashboard(&self, dashboard_id: i64) -> Result<Value> {
        self.dispatch(RequestSpec::get(format!("dashboard/{dashboard_id}")))
            .await
    }

    /// Update a dashboard.
    #[instrument(skip(self, payload))]
    pub async fn update_dashboard(&self, dashboard_id: i64, payload: &Value) -> Result<Value> {
        debug!("updating dashboard");
        self.dispatch(RequestSpec::put(format!("dashboard/{dashboard_id}")).with_json(payload))
            .await
    }

    /// Delete a dashboard.
    #[instrument(skip(self))]
    pub async fn delete_dashboard(&self, dashboard_id: i64) -> Result<Value> {
        self.dispatch(RequestSpec::delete(format!("dashboard/{dashboard_id}")))
            .await
    }

    /// Place a chart on a dashboard's position grid.
    ///
    /// Fetches the current grid, inserts a `CHART-{id}` node, and writes
    /// the grid back through the update endpoint.
    #[instrument(skip(self, position))]
    pub async fn add_chart_to_dashboard(
        &self,
        dashboard_id: i64,
        chart_id: i64,
        position: &ChartPosition,
    ) -> Result<Value> {
        let dashboard = self.dashboard(dashboard_id).await?;

        let mut grid = position_grid(&dashboard);
        let node_id = format!("CHART-{chart_id}");
        let slice_name = position
            .slice_name
            .clone()
            .unwrap_or_else(|| format!("Chart {chart_id}"));

        grid.insert(
            node_id.clone(),
            json!({
                "children": [],
                "id": node_id,
                "meta": {
                    "chartId": chart_id,
                    "height": position.height.unwrap_or(50),
                    "sliceName": slice_name,
                    "width": position.width.unwrap_or(4),
                },
                "type": "CHART",
            }),
        );

        let payload = json!({ "position_json": Value::Object(grid) });
        self.update_dashboard(dashboard_id, &payload).await
    }
}

/// Extract the position grid from a dashboard detail. The server
/// serializes it either inline or as a JSON string depending on version;
/// both are accepted, and anything else yields an empty grid.
fn position_grid(dashboard: &Value) -> Map<String, Value> {
    let raw = dashboard.get("result").and_then(|r| r.get("position_json"));
    match raw {
        Some(Value::Object(map)) => map.clone(),
        Some(Value::String(s)) => serde_json::from_str::<Value>(s)
            .ok()
            .and_then(|v| v.as_object().cloned())
            .unwrap_or_default(),
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_from_inline_object() {
        let dashboard = json!({"result": {"position_json": {"ROOT": {"type": "ROOT"}}}});
        let grid = position_grid(&dashboard);
        assert!(grid.contains_key("ROOT"));
    }

    #[test]
    fn grid_from_string_payload() {
        let dashboard = json!({"result": {"position_json": "{\"ROOT\": {\"type\": \"ROOT\"}}"}});
        let grid = position_grid(&dashboard);
        assert!(grid.contains_key("ROOT"));
    }

    #[test]
    fn grid_defaults_to_empty() {
        assert!(position_grid(&json!({"result": {}})).is_empty());
        assert!(position_grid(&json!({"result": {"position_json": "not json"}})).is_empty());
    }
}
