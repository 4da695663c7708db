//! Account snapshots as loaded from the ledger.

use pitoken_types::{AccountId, Amount, Asset, HomeDomain};
use serde::{Deserialize, Serialize};

/// One balance held by an account: the native balance, or a trustline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceLine {
    pub asset: Asset,
    pub balance: Amount,
    /// Trustline limit; `None` for the native balance.
    pub limit: Option<Amount>,
}

impl BalanceLine {
    /// How much more this line can receive before reaching its limit.
    pub fn available_limit(&self) -> Amount {
        match self.limit {
            Some(limit) => limit.saturating_sub(self.balance),
            None => Amount::MAX.saturating_sub(self.balance),
        }
    }
}

/// Account state at the time it was loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub account_id: AccountId,
    /// Sequence number of the last transaction the account submitted.
    pub sequence: i64,
    pub balances: Vec<BalanceLine>,
    pub home_domain: Option<HomeDomain>,
    /// Trustlines and other entries that raise the account's reserve.
    pub subentry_count: u32,
}

impl AccountSnapshot {
    /// The trustline to `asset`, if the account holds one.
    pub fn trustline(&self, asset: &Asset) -> Option<&BalanceLine> {
        if asset.is_native() {
            return None;
        }
        self.balances.iter().find(|line| &line.asset == asset)
    }

    pub fn native_balance(&self) -> Amount {
        self.balances
            .iter()
            .find(|line| line.asset.is_native())
            .map(|line| line.balance)
            .unwrap_or(Amount::ZERO)
    }

    /// Balance of `asset`: zero when there is no line for it.
    pub fn balance_of(&self, asset: &Asset) -> Amount {
        if asset.is_native() {
            return self.native_balance();
        }
        self.trustline(asset)
            .map(|line| line.balance)
            .unwrap_or(Amount::ZERO)
    }

    pub fn next_sequence(&self) -> i64 {
        self.sequence.saturating_add(1)
    }
}
