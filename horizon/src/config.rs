//! Horizon connection settings.

use pitoken_types::NetworkId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HorizonConfig {
    /// Server root, without a trailing slash.
    pub base_url: String,

    /// Overall timeout of one request. Submissions block until the
    /// transaction is applied, so this must exceed a ledger close.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl HorizonConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }

    /// The public Horizon server of `network`, if it has one.
    pub fn for_network(network: &NetworkId) -> Option<Self> {
        network.default_horizon_url().map(Self::new)
    }
}
