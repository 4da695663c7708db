//! Ledger entries: accounts and trustlines.

use std::collections::BTreeMap;

use pitoken_client::{AccountSnapshot, AssetRecord, BalanceLine};
use pitoken_types::{AccountId, Amount, Asset, HomeDomain};
use serde::{Deserialize, Serialize};

/// An account entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountEntry {
    pub id: AccountId,
    /// Native balance.
    pub balance: Amount,
    pub sequence: i64,
    pub home_domain: Option<HomeDomain>,
    /// Trustlines owned by the account; each raises its minimum balance.
    pub subentry_count: u32,
}

/// An account's trustline to one credit asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustLineEntry {
    pub balance: Amount,
    pub limit: Amount,
}

impl TrustLineEntry {
    /// Room left below the limit.
    pub fn available(&self) -> Amount {
        self.limit.saturating_sub(self.balance)
    }
}

/// Every entry of the ledger. Cloned to stage a transaction's operations so
/// that a failing operation leaves the committed state untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LedgerState {
    pub(crate) accounts: BTreeMap<AccountId, AccountEntry>,
    pub(crate) trustlines: BTreeMap<(AccountId, Asset), TrustLineEntry>,
}

impl LedgerState {
    pub fn account(&self, id: &AccountId) -> Option<&AccountEntry> {
        self.accounts.get(id)
    }

    pub(crate) fn account_mut(&mut self, id: &AccountId) -> Option<&mut AccountEntry> {
        self.accounts.get_mut(id)
    }

    pub fn trustline(&self, holder: &AccountId, asset: &Asset) -> Option<&TrustLineEntry> {
        self.trustlines.get(&(*holder, asset.clone()))
    }

    pub(crate) fn trustline_mut(
        &mut self,
        holder: &AccountId,
        asset: &Asset,
    ) -> Option<&mut TrustLineEntry> {
        self.trustlines.get_mut(&(*holder, asset.clone()))
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Trustlines referencing `asset`, with their holders.
    pub fn holders_of<'a>(
        &'a self,
        asset: &'a Asset,
    ) -> impl Iterator<Item = (&'a AccountId, &'a TrustLineEntry)> + 'a {
        self.trustlines
            .iter()
            .filter(move |((_, line_asset), _)| line_asset == asset)
            .map(|((holder, _), line)| (holder, line))
    }

    /// The account as a client would load it: native balance first, then
    /// trustlines in asset order.
    pub fn snapshot(&self, id: &AccountId) -> Option<AccountSnapshot> {
        let entry = self.accounts.get(id)?;
        let mut balances = vec![BalanceLine {
            asset: Asset::Native,
            balance: entry.balance,
            limit: None,
        }];
        balances.extend(
            self.trustlines
                .iter()
                .filter(|((holder, _), _)| holder == id)
                .map(|((_, asset), line)| BalanceLine {
                    asset: asset.clone(),
                    balance: line.balance,
                    limit: Some(line.limit),
                }),
        );
        Some(AccountSnapshot {
            account_id: entry.id,
            sequence: entry.sequence,
            balances,
            home_domain: entry.home_domain.clone(),
            subentry_count: entry.subentry_count,
        })
    }

    /// The network's view of a credit asset. An asset exists only while at
    /// least one trustline references its exact (code, issuer) pair.
    pub fn asset_record(&self, asset: &Asset) -> Option<AssetRecord> {
        let issuer = asset.issuer()?;
        let mut num_accounts = 0u32;
        let mut amount = Amount::ZERO;
        for (_, line) in self.holders_of(asset) {
            num_accounts += 1;
            amount = amount.checked_add(line.balance).unwrap_or(Amount::MAX);
        }
        if num_accounts == 0 {
            return None;
        }
        let toml_href = self
            .accounts
            .get(issuer)
            .and_then(|entry| entry.home_domain.as_ref())
            .map(HomeDomain::well_known_url)
            .unwrap_or_default();
        Some(AssetRecord {
            asset: asset.clone(),
            num_accounts,
            amount,
            toml_href,
        })
    }
}
