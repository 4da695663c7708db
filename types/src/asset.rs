//! Assets: the native currency or an issuer-scoped token.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::account::AccountId;
use crate::error::PiTokenError;

/// A token code: 1 to 12 ASCII alphanumerics, case-sensitive.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetCode(String);

impl AssetCode {
    pub const MAX_LEN: usize = 12;
    /// Codes up to this length use the short (4-byte) wire form.
    pub const SHORT_LEN: usize = 4;

    pub fn new(code: impl Into<String>) -> Result<Self, PiTokenError> {
        let code = code.into();
        if code.is_empty() || code.len() > Self::MAX_LEN {
            return Err(PiTokenError::InvalidAssetCode(format!(
                "{code:?}: length must be 1..={}",
                Self::MAX_LEN
            )));
        }
        if !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(PiTokenError::InvalidAssetCode(format!(
                "{code:?}: only ASCII letters and digits are allowed"
            )));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the code fits the 4-byte wire form.
    pub fn is_short(&self) -> bool {
        self.0.len() <= Self::SHORT_LEN
    }
}

impl FromStr for AssetCode {
    type Err = PiTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for AssetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A unit of value on the ledger.
///
/// Credit assets are identified by the (code, issuer) pair: two assets with
/// the same code but different issuers are unrelated.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Asset {
    Native,
    Credit { code: AssetCode, issuer: AccountId },
}

impl Asset {
    pub fn credit(code: AssetCode, issuer: AccountId) -> Self {
        Self::Credit { code, issuer }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }

    pub fn code(&self) -> Option<&AssetCode> {
        match self {
            Self::Native => None,
            Self::Credit { code, .. } => Some(code),
        }
    }

    pub fn issuer(&self) -> Option<&AccountId> {
        match self {
            Self::Native => None,
            Self::Credit { issuer, .. } => Some(issuer),
        }
    }

    /// Horizon's `asset_type` string.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Credit { code, .. } if code.is_short() => "credit_alphanum4",
            Self::Credit { .. } => "credit_alphanum12",
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => f.write_str("native"),
            Self::Credit { code, issuer } => write!(f, "{code}:{issuer}"),
        }
    }
}

impl FromStr for Asset {
    type Err = PiTokenError;

    /// Parse `native` or `CODE:ISSUER`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "native" {
            return Ok(Self::Native);
        }
        let (code, issuer) = s.split_once(':').ok_or_else(|| {
            PiTokenError::InvalidAssetCode(format!("{s:?}: expected CODE:ISSUER"))
        })?;
        Ok(Self::credit(code.parse()?, issuer.parse()?))
    }
}

impl Serialize for Asset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Asset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
