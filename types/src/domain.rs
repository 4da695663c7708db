//! Home domain attached to an issuing account.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::PiTokenError;

/// A DNS hostname linked to an account for metadata discovery.
///
/// The empty value is valid on the wire and clears the link; use
/// [`HomeDomain::cleared`] to build it. [`HomeDomain::new`] only accepts
/// real hostnames.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HomeDomain(String);

impl HomeDomain {
    /// The set-options string field holds at most 32 bytes.
    pub const MAX_LEN: usize = 32;
    /// Path of the metadata document under the domain.
    pub const WELL_KNOWN_PATH: &'static str = "/.well-known/pi.toml";

    pub fn new(domain: impl Into<String>) -> Result<Self, PiTokenError> {
        let domain = domain.into();
        let invalid = |reason: &str| PiTokenError::InvalidHomeDomain(format!("{domain:?}: {reason}"));

        if domain.is_empty() {
            return Err(invalid("empty"));
        }
        if domain.len() > Self::MAX_LEN {
            return Err(invalid("longer than 32 bytes"));
        }
        if domain.contains("://") {
            return Err(invalid("must not include a scheme"));
        }
        if domain.contains('/') || domain.contains(':') {
            return Err(invalid("must not include a path or port"));
        }
        for label in domain.split('.') {
            if label.is_empty() || label.len() > 63 {
                return Err(invalid("empty or oversized label"));
            }
            if !label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
                return Err(invalid("labels may only contain letters, digits and '-'"));
            }
            if label.starts_with('-') || label.ends_with('-') {
                return Err(invalid("labels must not start or end with '-'"));
            }
        }
        Ok(Self(domain))
    }

    /// The empty domain, which removes an existing link.
    pub fn cleared() -> Self {
        Self(String::new())
    }

    pub fn is_cleared(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `https://<domain>/.well-known/pi.toml`
    pub fn well_known_url(&self) -> String {
        format!("https://{}{}", self.0, Self::WELL_KNOWN_PATH)
    }
}

impl FromStr for HomeDomain {
    type Err = PiTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for HomeDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for HomeDomain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for HomeDomain {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            return Ok(Self::cleared());
        }
        Self::new(s).map_err(serde::de::Error::custom)
    }
}
