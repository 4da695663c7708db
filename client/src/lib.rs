//! Abstract ledger client for pitoken.
//!
//! Everything that talks to a ledger (the Horizon HTTP API, the in-memory
//! reference ledger used in tests) implements [`LedgerClient`]. The issuance
//! flows depend only on the trait.

pub mod account;
pub mod asset;
pub mod error;
pub mod submit;

pub use account::{AccountSnapshot, BalanceLine};
pub use asset::AssetRecord;
pub use error::{ClientError, Rejection};
pub use submit::SubmitResponse;

use std::future::Future;

use pitoken_transactions::TransactionEnvelope;
use pitoken_types::{AccountId, Asset, TimeBounds};

/// Read and write access to a ledger.
pub trait LedgerClient {
    /// Current state of an account; `ClientError::NotFound` if it was never
    /// created.
    fn load_account(
        &self,
        account: &AccountId,
    ) -> impl Future<Output = Result<AccountSnapshot, ClientError>> + Send;

    /// Per-operation base fee of the latest ledger, in stroops.
    fn fetch_base_fee(&self) -> impl Future<Output = Result<u32, ClientError>> + Send;

    /// Time bounds valid from now until `timeout_secs` from now, measured on
    /// the ledger's clock where possible.
    fn fetch_timebounds(
        &self,
        timeout_secs: u64,
    ) -> impl Future<Output = Result<TimeBounds, ClientError>> + Send;

    /// Submit a signed envelope and wait for its outcome.
    fn submit_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> impl Future<Output = Result<SubmitResponse, ClientError>> + Send;

    /// The network's record of a credit asset, or `None` while no trustline
    /// references it.
    fn asset(
        &self,
        asset: &Asset,
    ) -> impl Future<Output = Result<Option<AssetRecord>, ClientError>> + Send;
}
