//! Transaction validation logic.

use crate::error::TransactionError;
use crate::memo::{Memo, MAX_MEMO_TEXT_LEN};
use crate::{OperationBody, Transaction, MAX_OPERATIONS};

/// Validate a transaction's structure: operation count, memo length and the
/// fields of each operation.
///
/// This performs stateless validation only. Stateful checks (sequence
/// numbers, balances, trustlines, reserves) are done by the ledger.
pub fn validate_transaction(tx: &Transaction) -> Result<(), TransactionError> {
    if tx.operations.is_empty() {
        return Err(TransactionError::NoOperations);
    }
    if tx.operations.len() > MAX_OPERATIONS {
        return Err(TransactionError::TooManyOperations(tx.operations.len()));
    }
    if let Memo::Text(text) = &tx.memo {
        if text.len() > MAX_MEMO_TEXT_LEN {
            return Err(TransactionError::MemoTooLong(text.len()));
        }
    }

    for op in &tx.operations {
        let source = op.effective_source(&tx.source);
        match &op.body {
            OperationBody::ChangeTrust(trust) => {
                if trust.asset.is_native() {
                    return Err(TransactionError::NativeTrustline);
                }
                if trust.limit.stroops() < 0 {
                    return Err(TransactionError::NegativeLimit);
                }
                if trust.asset.issuer() == Some(source) {
                    return Err(TransactionError::SelfTrust);
                }
            }
            OperationBody::Payment(payment) => {
                if !payment.amount.is_positive() {
                    return Err(TransactionError::NonPositiveAmount);
                }
            }
            OperationBody::SetOptions(_) => {}
        }
    }
    Ok(())
}
