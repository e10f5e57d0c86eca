//! Server base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated PocketBase origin, e.g. `http://127.0.0.1:8090`.
///
/// The URL must be absolute, use `http` or `https`, and have a host. A trailing
/// slash is stripped so API paths can be appended directly.
///
/// # Example
///
/// ```
/// use pocketbase::BaseUrl;
///
/// let url = BaseUrl::new("http://127.0.0.1:8090/").unwrap();
/// assert_eq!(url.api_url("/files/token"), "http://127.0.0.1:8090/api/files/token");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Create a new base URL from a string, validating the format.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::BaseUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the full URL of an API path, e.g. `/backups` → `{base}/api/backups`.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.as_str(), path)
    }

    /// Returns the base URL without a trailing slash.
    pub fn as_str(&self) -> &str {
        self.0.as_str().trim_end_matches('/')
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::BaseUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        if !matches!(url.scheme(), "http" | "https") {
            return Err(InvalidInputError::BaseUrl {
                value: original.to_string(),
                reason: "must use http or https".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::BaseUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(InvalidInputError::BaseUrl {
                value: original.to_string(),
                reason: "must not carry a query or fragment".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
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
        serializer.serialize_str(self.as_str())
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
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_http() {
        let url = BaseUrl::new("http://pocketbase.lan:8090").unwrap();
        assert_eq!(url.host(), Some("pocketbase.lan"));
        assert_eq!(url.as_str(), "http://pocketbase.lan:8090");
    }

    #[test]
    fn strips_trailing_slash() {
        let url = BaseUrl::new("https://pb.example.com/").unwrap();
        assert_eq!(url.as_str(), "https://pb.example.com");
        assert_eq!(url.api_url("/backups"), "https://pb.example.com/api/backups");
    }

    #[test]
    fn keeps_sub_path() {
        let url = BaseUrl::new("https://example.com/pb/").unwrap();
        assert_eq!(url.api_url("/files/token"), "https://example.com/pb/api/files/token");
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(BaseUrl::new("ftp://example.com").is_err());
        assert!(BaseUrl::new("file:///tmp/pb").is_err());
    }

    #[test]
    fn rejects_relative_url() {
        assert!(BaseUrl::new("/api/collections").is_err());
    }

    #[test]
    fn rejects_query() {
        assert!(BaseUrl::new("http://localhost:8090/?x=1").is_err());
    }

    #[test]
    fn round_trips_through_serde() {
        let url: BaseUrl = serde_json::from_str(r#""http://localhost:8090/""#).unwrap();
        assert_eq!(serde_json::to_string(&url).unwrap(), r#""http://localhost:8090""#);
    }
}
