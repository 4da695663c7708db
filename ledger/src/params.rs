//! Network parameters the reference ledger enforces.

use pitoken_types::Amount;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerParams {
    /// Minimum fee per operation, in stroops.
    #[serde(default = "default_base_fee")]
    pub base_fee: u32,

    /// Reserve held per account entry. An account must keep
    /// `(2 + subentries) × base_reserve` of the native asset.
    #[serde(default = "default_base_reserve")]
    pub base_reserve: Amount,

    #[serde(default = "default_max_operations")]
    pub max_operations: usize,
}

fn default_base_fee() -> u32 {
    100
}

fn default_base_reserve() -> Amount {
    Amount::from_stroops(5_000_000)
}

fn default_max_operations() -> usize {
    pitoken_transactions::MAX_OPERATIONS
}

impl Default for LedgerParams {
    fn default() -> Self {
        Self {
            base_fee: default_base_fee(),
            base_reserve: default_base_reserve(),
            max_operations: default_max_operations(),
        }
    }
}

impl LedgerParams {
    /// Native balance an account with `subentries` entries must keep.
    pub fn minimum_balance(&self, subentries: u32) -> Amount {
        self.base_reserve
            .checked_mul(2 + i64::from(subentries))
            .unwrap_or(Amount::MAX)
    }
}
