//! Chart operations and the viz-type catalog.

use serde_json::{Value, json};
use tracing::{debug, instrument};

use birdseye_core::Result;

use crate::client::Client;
use crate::endpoints::{CHART, CHART_DATA};
use crate::request::RequestSpec;
use crate::resources::require_fields;

/// Fields a chart create payload must carry.
const REQUIRED_CREATE_FIELDS: &[&str] =
    &["slice_name", "datasource_id", "datasource_type", "viz_type"];

/// Form data for an ad hoc chart preview, rendered against a dataset
/// that has no saved chart yet.
#[derive(Debug, Clone)]
pub struct ChartPreview {
    /// Dataset id the preview is built on.
    pub datasource_id: i64,
    /// Visualization type key (see [`viz_types`](Client::viz_types)).
    pub viz_type: String,
    /// Type-specific form parameters, merged into the form data.
    pub params: Value,
}

/// A visualization type the server understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct VizType {
    /// Wire key used in chart payloads.
    pub key: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Catalog grouping.
    pub category: &'static str,
}

/// The built-in visualization types.
const VIZ_TYPES: &[VizType] = &[
    VizType { key: "table", name: "Table", category: "Table" },
    VizType { key: "big_number", name: "Big Number", category: "Number" },
    VizType { key: "big_number_total", name: "Big Number Total", category: "Number" },
    VizType { key: "line", name: "Line Chart", category: "Evolution" },
    VizType { key: "bar", name: "Bar Chart", category: "Ranking" },
    VizType { key: "area", name: "Area Chart", category: "Evolution" },
    VizType { key: "pie", name: "Pie Chart", category: "Part of a Whole" },
    VizType { key: "dist_bar", name: "Distribution Bar Chart", category: "Distribution" },
    VizType { key: "histogram", name: "Histogram", category: "Distribution" },
    VizType { key: "box_plot", name: "Box Plot", category: "Distribution" },
    VizType { key: "scatter", name: "Scatter Plot", category: "Correlation" },
    VizType { key: "bubble", name: "Bubble Chart", category: "Correlation" },
    VizType { key: "heatmap", name: "Heatmap", category: "Correlation" },
    VizType { key: "world_map", name: "World Map", category: "Map" },
    VizType { key: "country_map", name: "Country Map", category: "Map" },
];

impl Client {
    /// List charts.
    #[instrument(skip(self))]
    pub async fn charts(&self) -> Result<Vec<Value>> {
        debug!("listing charts");
        self.dispatch_result(RequestSpec::get(CHART)).await
    }

    /// Create a chart.
    ///
    /// # Errors
    ///
    /// [`ValidationError::MissingField`](birdseye_core::ValidationError)
    /// before any network call when a required field is absent.
    #[instrument(skip(self, payload))]
    pub async fn create_chart(&self, payload: &Value) -> Result<Value> {
        require_fields(payload, REQUIRED_CREATE_FIELDS)?;
        debug!("creating chart");
        self.dispatch(RequestSpec::post(CHART).with_json(payload))
            .await
    }

    /// Fetch one chart by id.
    #[instrument(skip(self))]
    pub async fn chart(&self, chart_id: i64) -> Result<Value> {
        self.dispatch(RequestSpec::get(format!("chart/{chart_id}")))
            .await
    }

    /// Update a chart.
    #[instrument(skip(self, payload))]
    pub async fn update_chart(&self, chart_id: i64, payload: &Value) -> Result<Value> {
        debug!("updating chart");
        self.dispatch(RequestSpec::put(format!("chart/{chart_id}")).with_json(payload))
            .await
    }

    /// Delete a chart.
    #[instrument(skip(self))]
    pub async fn delete_chart(&self, chart_id: i64) -> Result<Value> {
        self.dispatch(RequestSpec::delete(format!("chart/{chart_id}")))
            .await
    }

    /// Query the data behind a saved chart.
    #[instrument(skip(self, form_data))]
    pub async fn chart_data(&self, chart_id: i64, form_data: &Value) -> Result<Value> {
        let payload = json!({ "form_data": form_data });
        self.dispatch(RequestSpec::post(format!("chart/{chart_id}/data/")).with_json(&payload))
            .await
    }

    /// Force a refresh of a chart's cached data.
    #[instrument(skip(self))]
    pub async fn refresh_chart_cache(&self, chart_id: i64, force: bool) -> Result<Value> {
        let payload = json!({ "force": force });
        self.dispatch(RequestSpec::post(format!("chart/{chart_id}/cache/")).with_json(&payload))
            .await
    }

    /// Render an ad hoc preview through the chart-data endpoint, without
    /// saving a chart.
    #[instrument(skip(self, preview), fields(datasource_id = preview.datasource_id))]
    pub async fn preview_chart(&self, preview: &ChartPreview) -> Result<Value> {
        let datasource = format!("{}__table", preview.datasource_id);

        let mut form_data = json!({
            "datasource": datasource,
            "viz_type": preview.viz_type,
            "slice_id": null,
        });
        if let Some(params) = preview.params.as_object() {
            for (key, value) in params {
                form_data[key] = value.clone();
            }
        }

        let payload = json!({
            "datasource": datasource,
            "viz_type": preview.viz_type,
            "slice_id": null,
            "url_params": {},
            "form_data": form_data,
        });

        debug!("rendering chart preview");
        self.dispatch(RequestSpec::post(CHART_DATA).with_json(&payload))
            .await
    }

    /// The static catalog of visualization types.
    pub fn viz_types(&self) -> &'static [VizType] {
        VIZ_TYPES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_keys_are_unique() {
        let mut keys: Vec<_> = VIZ_TYPES.iter().map(|v| v.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), VIZ_TYPES.len());
    }
}
