//! Top-level error type shared across crates.

use thiserror::Error;

/// Common error type for pitoken value types.
#[derive(Debug, Error)]
pub enum PiTokenError {
    #[error("invalid account id: {0}")]
    InvalidAccountId(String),

    #[error("invalid asset code: {0}")]
    InvalidAssetCode(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] crate::amount::AmountError),

    #[error("invalid home domain: {0}")]
    InvalidHomeDomain(String),

    #[error("unknown network: {0}")]
    InvalidNetwork(String),

    #[error("invalid transaction hash: {0}")]
    InvalidHash(String),

    #[error("{0}")]
    Other(String),
}
