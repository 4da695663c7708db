//! Account identifier, rendered as a `G...` StrKey.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::PiTokenError;
use crate::keys::PublicKey;
use crate::strkey::{self, VersionByte};

/// The public identity of a ledger account.
///
/// Wraps the account's Ed25519 public key; the text form is the StrKey with
/// version byte `G`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(PublicKey);

impl AccountId {
    pub fn new(public_key: PublicKey) -> Self {
        Self(public_key)
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    /// Render as a `G...` StrKey.
    pub fn to_strkey(&self) -> String {
        strkey::encode(VersionByte::AccountId, self.0.as_bytes())
    }
}

impl FromStr for AccountId {
    type Err = PiTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        strkey::decode(VersionByte::AccountId, s)
            .map(|bytes| Self(PublicKey(bytes)))
            .map_err(|e| PiTokenError::InvalidAccountId(format!("{s}: {e}")))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_strkey())
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.to_strkey();
        write!(f, "AccountId({}..{})", &s[..4], &s[s.len() - 4..])
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_strkey())
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
