//! Network identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PiTokenError;

/// Identifies which network transactions are signed for.
///
/// Signatures commit to the network passphrase, so a transaction signed for
/// one network is rejected by every other.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NetworkId {
    /// The Pi test network.
    #[default]
    PiTestnet,
    /// The Pi production network.
    PiMainnet,
    /// The public Stellar test network.
    StellarTestnet,
    /// Any other network, identified by its passphrase.
    Custom(String),
}

impl NetworkId {
    /// The passphrase hashed into every transaction signature.
    pub fn passphrase(&self) -> &str {
        match self {
            Self::PiTestnet => "Pi Testnet",
            Self::PiMainnet => "Pi Network",
            Self::StellarTestnet => "Test SDF Network ; September 2015",
            Self::Custom(passphrase) => passphrase,
        }
    }

    /// Public Horizon endpoint, if the network has a well-known one.
    pub fn default_horizon_url(&self) -> Option<&'static str> {
        match self {
            Self::PiTestnet => Some("https://api.testnet.minepi.com"),
            Self::PiMainnet => Some("https://api.mainnet.minepi.com"),
            Self::StellarTestnet => Some("https://horizon-testnet.stellar.org"),
            Self::Custom(_) => None,
        }
    }

    /// Short name used on the command line and in config files.
    pub fn as_str(&self) -> &str {
        match self {
            Self::PiTestnet => "pi-testnet",
            Self::PiMainnet => "pi-mainnet",
            Self::StellarTestnet => "stellar-testnet",
            Self::Custom(_) => "custom",
        }
    }
}

impl FromStr for NetworkId {
    type Err = PiTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pi-testnet" | "testnet" => Ok(Self::PiTestnet),
            "pi-mainnet" | "mainnet" => Ok(Self::PiMainnet),
            "stellar-testnet" => Ok(Self::StellarTestnet),
            other => Err(PiTokenError::InvalidNetwork(other.to_string())),
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
