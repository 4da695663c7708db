//! Wire shapes of the Horizon resources this client reads.

use serde::Deserialize;

use pitoken_client::Rejection;

#[derive(Debug, Deserialize)]
pub(crate) struct Page<T> {
    #[serde(rename = "_embedded")]
    pub embedded: Embedded<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Embedded<T> {
    pub records: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AccountResponse {
    pub account_id: String,
    pub sequence: String,
    #[serde(default)]
    pub subentry_count: u32,
    #[serde(default)]
    pub home_domain: Option<String>,
    pub balances: Vec<BalanceResponse>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BalanceResponse {
    pub balance: String,
    #[serde(default)]
    pub limit: Option<String>,
    pub asset_type: String,
    #[serde(default)]
    pub asset_code: Option<String>,
    #[serde(default)]
    pub asset_issuer: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LedgerResponse {
    pub base_fee_in_stroops: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitSuccess {
    pub hash: String,
    pub ledger: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Problem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub extras: Option<ProblemExtras>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProblemExtras {
    #[serde(default)]
    pub result_codes: Option<Rejection>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssetResponse {
    pub asset_code: String,
    pub asset_issuer: String,
    pub amount: String,
    #[serde(default)]
    pub num_accounts: u32,
    #[serde(rename = "_links")]
    pub links: AssetLinks,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssetLinks {
    pub toml: Link,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Link {
    pub href: String,
}
