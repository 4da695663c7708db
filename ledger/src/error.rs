use pitoken_types::{AccountId, Amount};
use thiserror::Error;

/// Errors from setting up ledger state directly (outside of transactions).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("account already exists: {0}")]
    AccountExists(AccountId),

    #[error("account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("starting balance {got} is below the minimum {needed}")]
    BelowMinimumBalance { needed: Amount, got: Amount },

    #[error("balance overflow")]
    Overflow,
}
