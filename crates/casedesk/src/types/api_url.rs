//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated base URL for the case-management backend.
///
/// The URL must be absolute, use `http` or `https`, and carry a host.
/// It is normalized without a trailing slash so endpoint paths can be
/// appended directly.
///
/// # Example
///
/// ```
/// use casedesk::ApiUrl;
///
/// let api = ApiUrl::new("https://cases.example.org/").unwrap();
/// assert_eq!(api.endpoint("/api/cases"), "https://cases.example.org/api/cases");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Create a new API URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::ApiUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        let mut normalized = url;
        normalized.set_query(None);
        normalized.set_fragment(None);
        let path = normalized.path().trim_end_matches('/').to_string();
        normalized.set_path(&path);

        Ok(Self(normalized))
    }

    /// Returns the absolute URL for an endpoint path such as `/api/cases/7`.
    pub fn endpoint(&self, path: &str) -> String {
        // Url keeps a lone "/" for an empty root path
        let base = self.0.as_str().trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
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
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        if !matches!(url.scheme(), "http" | "https") {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must use http or https".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_http_url() {
        let api = ApiUrl::new("http://localhost:8000").unwrap();
        assert_eq!(api.host(), Some("localhost"));
        assert_eq!(api.endpoint("/api/auth/me"), "http://localhost:8000/api/auth/me");
    }

    #[test]
    fn normalizes_trailing_slash() {
        let api = ApiUrl::new("https://cases.example.org/").unwrap();
        assert_eq!(
            api.endpoint("/api/cases"),
            "https://cases.example.org/api/cases"
        );
    }

    #[test]
    fn keeps_path_prefix() {
        let api = ApiUrl::new("https://intranet.example.org/legal/").unwrap();
        assert_eq!(
            api.endpoint("/api/documents/3/download"),
            "https://intranet.example.org/legal/api/documents/3/download"
        );
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(ApiUrl::new("ftp://cases.example.org").is_err());
        assert!(ApiUrl::new("file:///tmp/cases").is_err());
    }

    #[test]
    fn rejects_relative_url() {
        assert!(ApiUrl::new("/api/cases").is_err());
    }

    #[test]
    fn roundtrips_through_serde() {
        let api = ApiUrl::new("https://cases.example.org").unwrap();
        let json = serde_json::to_string(&api).unwrap();
        let back: ApiUrl = serde_json::from_str(&json).unwrap();
        assert_eq!(api, back);
    }
}
