//! birdseye-client - Authenticated REST client for a Superset-compatible
//! BI server.
//!
//! All operations funnel through one dispatch pipeline that attaches the
//! bearer and CSRF headers, translates failures into the error taxonomy,
//! and recovers from a single HTTP 401 per request by refreshing the
//! session and resending once.

mod client;
mod http;
mod request;
mod session;

pub mod endpoints;
pub mod resources;

pub use client::Client;
pub use endpoints::{
    ActivityEntry, DatabaseRef, DatasetDetail, LoginResponse, SqlExecuteRequest, TableMetadata,
    UserProfile,
};
pub use request::RequestSpec;
pub use resources::charts::{ChartPreview, VizType};
pub use resources::dashboards::ChartPosition;
pub use resources::sql::PreviewConfig;
pub use session::Session;
