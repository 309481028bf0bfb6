//! HTTP transport layer.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::trace;

use birdseye_core::{AccessToken, ApiError, BaseUrl, CsrfToken, Error, TransportError};

/// Header carrying the anti-forgery token on mutating calls.
const CSRF_HEADER: &str = "X-CSRFToken";

/// Every request is bounded by this timeout; expiry surfaces as a
/// transport error.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Thin wrapper over `reqwest` bound to one server base URL.
#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    client: reqwest::Client,
    base: BaseUrl,
}

impl HttpClient {
    /// Create a new transport for the given server.
    pub(crate) fn new(base: BaseUrl) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            "X-Requested-With",
            HeaderValue::from_static("XMLHttpRequest"),
        );

        let client = reqwest::Client::builder()
            .user_agent(concat!("birdseye/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()
            .expect("failed to build HTTP client");

        Self { client, base }
    }

    /// Returns the base URL this transport is configured for.
    pub(crate) fn base(&self) -> &BaseUrl {
        &self.base
    }

    /// Send one attempt of a request, attaching the bearer and CSRF
    /// headers when tokens are present.
    pub(crate) async fn send(
        &self,
        spec: &crate::request::RequestSpec,
        access: Option<&AccessToken>,
        csrf: Option<&CsrfToken>,
    ) -> Result<reqwest::Response, Error> {
        let url = spec.url(&self.base);
        let mut request = self.client.request(spec.method.clone(), &url);

        if !spec.query.is_empty() {
            request = request.query(&spec.query);
        }
        if let Some(body) = &spec.body {
            request = request.json(body);
        }
        if let Some(token) = access {
            request = request.bearer_auth(token.as_str());
        }
        if let Some(token) = csrf {
            request = request.header(CSRF_HEADER, token.as_str());
        }

        let response = request.send().await.map_err(transport_error)?;
        trace!(status = %response.status(), %url, "response received");
        Ok(response)
    }

    /// Deserialize a success response body.
    pub(crate) async fn read_json<R: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<R, Error> {
        response.json::<R>().await.map_err(transport_error)
    }

    /// Read a success response body as plain text.
    pub(crate) async fn read_text(response: reqwest::Response) -> Result<String, Error> {
        response.text().await.map_err(transport_error)
    }

    /// Turn a non-success response into an [`ApiError`], keeping the body
    /// when it parses as JSON.
    pub(crate) async fn error_from(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.json::<serde_json::Value>().await.ok();
        ApiError::new(status, body)
    }
}

/// Classify a `reqwest` failure into the transport taxonomy.
pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout {
            duration_ms: REQUEST_TIMEOUT.as_millis() as u64,
        }
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}
