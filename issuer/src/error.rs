use pitoken_client::{ClientError, Rejection};
use pitoken_metadata::MetadataError;
use pitoken_transactions::TransactionError;
use pitoken_types::{AccountId, Amount, Asset, ErrorCategory};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IssueError {
    /// The ledger refused the transaction. Nothing it contained took effect.
    #[error("transaction rejected: {0}")]
    Rejected(Rejection),

    #[error("ledger client error: {0}")]
    Client(ClientError),

    #[error("failed to build transaction: {0}")]
    Transaction(#[from] TransactionError),

    #[error("{holder} has no trustline to {asset}")]
    MissingTrustline { holder: AccountId, asset: Asset },

    #[error("trustline can receive {available} more, {requested} requested")]
    LimitExceeded { available: Amount, requested: Amount },

    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Amount),

    #[error("cannot issue the native asset")]
    NativeAsset,

    /// The trust transaction was accepted but the holder's account does not
    /// show the trustline yet.
    #[error("trustline of {holder} to {asset} not observed on the ledger")]
    TrustlineNotObserved { holder: AccountId, asset: Asset },

    #[error("metadata error: {0}")]
    Metadata(#[from] MetadataError),
}

impl From<ClientError> for IssueError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Rejected(rejection) => Self::Rejected(rejection),
            other => Self::Client(other),
        }
    }
}

impl IssueError {
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }

    /// What the operator has to fix before trying again.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Rejected(rejection) => rejection.category(),
            Self::Client(err) => err.category(),
            Self::Transaction(TransactionError::TooManySignatures(_)) => {
                ErrorCategory::SignatureFailure
            }
            Self::Transaction(_) | Self::NonPositiveAmount(_) | Self::NativeAsset => {
                ErrorCategory::MalformedOperation
            }
            Self::MissingTrustline { .. } | Self::LimitExceeded { .. } => {
                ErrorCategory::PreconditionFailure
            }
            Self::TrustlineNotObserved { .. } => ErrorCategory::StaleState,
            Self::Metadata(_) => ErrorCategory::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitoken_types::TxResultCode;

    #[test]
    fn client_rejections_are_lifted() {
        let err: IssueError =
            ClientError::Rejected(Rejection::transaction(TxResultCode::BadSeq)).into();
        assert!(matches!(err, IssueError::Rejected(_)));
        assert_eq!(err.category(), ErrorCategory::StaleState);

        let err: IssueError = ClientError::Timeout.into();
        assert!(err.rejection().is_none());
        assert_eq!(err.category(), ErrorCategory::StaleState);
    }

    #[test]
    fn local_checks_are_classified() {
        assert_eq!(
            IssueError::from(TransactionError::SelfTrust).category(),
            ErrorCategory::MalformedOperation
        );
        assert_eq!(
            IssueError::LimitExceeded {
                available: Amount::ZERO,
                requested: Amount::from_stroops(1),
            }
            .category(),
            ErrorCategory::PreconditionFailure
        );
    }
}
