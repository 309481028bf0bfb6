//! Server base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, ValidationError};

/// A validated BI-server base URL.
///
/// All API calls are issued under the versioned prefix `/api/v1/`; the
/// health endpoint lives outside the prefix at `/health`.
///
/// # Example
///
/// ```
/// use birdseye_core::BaseUrl;
///
/// let base = BaseUrl::new("https://bi.example.com").unwrap();
/// assert_eq!(base.api_url("dashboard/"),
///            "https://bi.example.com/api/v1/dashboard/");
/// assert_eq!(base.health_url(), "https://bi.example.com/health");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Create a new base URL from a string, validating the format.
    ///
    /// Plain HTTP is accepted: the server frequently sits on an internal
    /// network or behind a development proxy.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not absolute, not http(s), or has
    /// no host.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| ValidationError::BaseUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        // Normalize: remove trailing slash
        let normalized = if url.path() == "/" {
            let mut u = url.clone();
            u.set_path("");
            u
        } else {
            url
        };

        Ok(Self(normalized))
    }

    /// Returns the full URL for an API path under the versioned prefix.
    ///
    /// `path` is given relative to `/api/v1/`, keeping any trailing slash
    /// the backend routes require.
    pub fn api_url(&self, path: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/api/v1/{}", base, path.trim_start_matches('/'))
    }

    /// Returns the health-check URL, which lives outside the API prefix.
    pub fn health_url(&self) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/health", base)
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(ValidationError::BaseUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(ValidationError::BaseUrl {
                value: original.to_string(),
                reason: "must use http or https".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(ValidationError::BaseUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BaseUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BaseUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let base = BaseUrl::new("https://bi.example.com").unwrap();
        assert_eq!(base.host(), Some("bi.example.com"));
    }

    #[test]
    fn valid_internal_http_url() {
        let base = BaseUrl::new("http://superset:8088").unwrap();
        assert_eq!(base.host(), Some("superset"));
    }

    #[test]
    fn api_url_construction() {
        let base = BaseUrl::new("https://bi.example.com").unwrap();
        assert_eq!(
            base.api_url("security/login"),
            "https://bi.example.com/api/v1/security/login"
        );
    }

    #[test]
    fn api_url_keeps_trailing_slash() {
        let base = BaseUrl::new("https://bi.example.com").unwrap();
        assert_eq!(
            base.api_url("dataset/"),
            "https://bi.example.com/api/v1/dataset/"
        );
    }

    #[test]
    fn normalizes_trailing_slash_on_base() {
        let base = BaseUrl::new("https://bi.example.com/").unwrap();
        assert_eq!(base.health_url(), "https://bi.example.com/health");
    }

    #[test]
    fn invalid_scheme() {
        assert!(BaseUrl::new("ftp://bi.example.com").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(BaseUrl::new("/api/v1/dashboard/").is_err());
    }
}
