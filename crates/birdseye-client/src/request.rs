//! Request descriptors.
//!
//! A [`RequestSpec`] is an immutable record of one logical API call:
//! method, route, query parameters, and JSON body. The dispatch pipeline
//! rebuilds the wire request from the spec on each attempt, so the single
//! 401-triggered retry replays exactly what was sent the first time.

use reqwest::Method;
use serde::Serialize;

use birdseye_core::BaseUrl;

/// Where a request is routed relative to the server base URL.
#[derive(Clone, Debug)]
pub(crate) enum Route {
    /// A path under the versioned `/api/v1/` prefix.
    Api(String),
    /// The bare `/health` endpoint outside the prefix.
    Health,
}

/// An immutable descriptor for one API request.
#[derive(Clone, Debug)]
pub struct RequestSpec {
    pub(crate) method: Method,
    pub(crate) route: Route,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: Option<serde_json::Value>,
}

impl RequestSpec {
    fn new(method: Method, route: Route) -> Self {
        Self {
            method,
            route,
            query: Vec::new(),
            body: None,
        }
    }

    /// GET request for an API path.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, Route::Api(path.into()))
    }

    /// POST request for an API path.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, Route::Api(path.into()))
    }

    /// PUT request for an API path.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, Route::Api(path.into()))
    }

    /// DELETE request for an API path.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, Route::Api(path.into()))
    }

    /// GET request for the health endpoint.
    pub fn health() -> Self {
        Self::new(Method::GET, Route::Health)
    }

    /// Add a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attach a JSON body.
    pub fn with_json<T: Serialize>(mut self, body: &T) -> Self {
        self.body = Some(serde_json::to_value(body).expect("JSON-serializable request body"));
        self
    }

    /// The full URL for this request against a base URL.
    pub(crate) fn url(&self, base: &BaseUrl) -> String {
        match &self.route {
            Route::Api(path) => base.api_url(path),
            Route::Health => base.health_url(),
        }
    }

    /// The route path, for log lines.
    pub(crate) fn path(&self) -> &str {
        match &self.route {
            Route::Api(path) => path,
            Route::Health => "health",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn url_for_api_route() {
        let base = BaseUrl::new("https://bi.example.com").unwrap();
        let spec = RequestSpec::get("dashboard/");
        assert_eq!(spec.url(&base), "https://bi.example.com/api/v1/dashboard/");
    }

    #[test]
    fn url_for_health_route() {
        let base = BaseUrl::new("https://bi.example.com").unwrap();
        assert_eq!(
            RequestSpec::health().url(&base),
            "https://bi.example.com/health"
        );
    }

    #[test]
    fn clone_replays_query_and_body() {
        let spec = RequestSpec::post("dataset/")
            .with_query("q", "1")
            .with_json(&json!({"table_name": "orders"}));
        let replay = spec.clone();

        assert_eq!(replay.query, vec![("q".to_string(), "1".to_string())]);
        assert_eq!(replay.body, spec.body);
    }
}
