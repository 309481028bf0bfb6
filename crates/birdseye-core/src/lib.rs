//! birdseye-core - Core types and errors for the birdseye toolkit.

pub mod credentials;
pub mod error;
pub mod store;
pub mod tokens;
pub mod types;

pub use credentials::Credentials;
pub use error::{ApiError, AuthError, Error, TransportError, ValidationError};
pub use store::{MemoryTokenStore, TokenKey, TokenStore};
pub use tokens::{AccessToken, CsrfToken, RefreshToken};
pub use types::BaseUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
