//! Network-wide asset records.

use pitoken_types::{Amount, Asset};
use serde::{Deserialize, Serialize};

/// What the network knows about an issued asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub asset: Asset,
    /// Accounts holding a trustline to the asset.
    pub num_accounts: u32,
    /// Outstanding supply: the sum of all holder balances.
    pub amount: Amount,
    /// Metadata link derived from the issuer's home domain; empty while the
    /// issuer has none.
    pub toml_href: String,
}

impl AssetRecord {
    pub fn has_metadata_link(&self) -> bool {
        !self.toml_href.is_empty()
    }
}
