use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    #[error("transaction has no operations")]
    NoOperations,

    #[error("transaction has {0} operations, at most {max} allowed", max = crate::MAX_OPERATIONS)]
    TooManyOperations(usize),

    #[error("transaction has no time bounds; set a timeout before building")]
    MissingTimeBounds,

    #[error("fee overflows a 32-bit stroop count")]
    FeeOverflow,

    #[error("source account sequence number is exhausted")]
    SequenceOverflow,

    #[error("payment amount must be positive")]
    NonPositiveAmount,

    #[error("trustlines cannot target the native asset")]
    NativeTrustline,

    #[error("trustline limit must not be negative")]
    NegativeLimit,

    #[error("an issuer cannot hold a trustline to its own asset")]
    SelfTrust,

    #[error("memo text is {0} bytes, at most {max} allowed", max = crate::memo::MAX_MEMO_TEXT_LEN)]
    MemoTooLong(usize),

    #[error("envelope already carries {0} signatures")]
    TooManySignatures(usize),
}
