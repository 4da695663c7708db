use pitoken_types::StrKeyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid secret seed: {0}")]
    InvalidSecretSeed(StrKeyError),

    #[error("invalid account id: {0}")]
    InvalidAccountId(StrKeyError),
}
