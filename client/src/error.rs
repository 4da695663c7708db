use std::fmt;

use pitoken_types::{ErrorCategory, OperationResultCode, TxResultCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result codes of a transaction the ledger refused.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub transaction: TxResultCode,
    /// One code per operation; empty unless `transaction` is `tx_failed`.
    #[serde(default)]
    pub operations: Vec<OperationResultCode>,
}

impl Rejection {
    pub fn transaction(code: TxResultCode) -> Self {
        Self {
            transaction: code,
            operations: Vec::new(),
        }
    }

    pub fn failed(operations: Vec<OperationResultCode>) -> Self {
        Self {
            transaction: TxResultCode::Failed,
            operations,
        }
    }

    /// The first operation code that is not `op_success`.
    pub fn first_failed_operation(&self) -> Option<&OperationResultCode> {
        self.operations.iter().find(|code| !code.is_success())
    }

    /// What the operator has to fix. A failed transaction is classified by
    /// its first failing operation.
    pub fn category(&self) -> ErrorCategory {
        match (&self.transaction, self.first_failed_operation()) {
            (TxResultCode::Failed, Some(op)) => op.category(),
            (code, _) => code.category(),
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.transaction)?;
        if !self.operations.is_empty() {
            let ops: Vec<&str> = self.operations.iter().map(|op| op.as_str()).collect();
            write!(f, " [{}]", ops.join(", "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("transaction rejected: {0}")]
    Rejected(Rejection),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected response: {0}")]
    Decode(String),

    /// The server gave up waiting; the transaction may still be applied.
    #[error("submission timed out")]
    Timeout,
}

impl ClientError {
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Rejected(rejection) => rejection.category(),
            Self::NotFound(_) => ErrorCategory::PreconditionFailure,
            Self::Timeout => ErrorCategory::StaleState,
            Self::Transport(_) | Self::Decode(_) => ErrorCategory::Other,
        }
    }
}
