//! Transaction builder.

use pitoken_types::{AccountId, TimeBounds, Timestamp};

use crate::error::TransactionError;
use crate::memo::Memo;
use crate::transaction::Transaction;
use crate::validation::validate_transaction;
use crate::{Operation, MAX_OPERATIONS, MIN_BASE_FEE};

/// Assembles a [`Transaction`] for a source account whose current sequence
/// number is known.
///
/// The built transaction uses `current_sequence + 1` and a total fee of
/// `base_fee × operations`. Time bounds are mandatory so that a transaction
/// that never lands eventually becomes invalid instead of lingering.
#[derive(Clone, Debug)]
pub struct TransactionBuilder {
    source: AccountId,
    current_sequence: i64,
    base_fee: u32,
    time_bounds: Option<TimeBounds>,
    memo: Memo,
    operations: Vec<Operation>,
}

impl TransactionBuilder {
    pub fn new(source: AccountId, current_sequence: i64) -> Self {
        Self {
            source,
            current_sequence,
            base_fee: MIN_BASE_FEE,
            time_bounds: None,
            memo: Memo::None,
            operations: Vec::new(),
        }
    }

    /// Per-operation fee in stroops.
    pub fn base_fee(mut self, fee: u32) -> Self {
        self.base_fee = fee;
        self
    }

    pub fn time_bounds(mut self, bounds: TimeBounds) -> Self {
        self.time_bounds = Some(bounds);
        self
    }

    /// Valid until `timeout_secs` after `now`.
    pub fn timeout(self, now: Timestamp, timeout_secs: u64) -> Self {
        self.time_bounds(TimeBounds::with_timeout(now, timeout_secs))
    }

    pub fn memo(mut self, memo: Memo) -> Self {
        self.memo = memo;
        self
    }

    pub fn add_operation(mut self, op: impl Into<Operation>) -> Self {
        self.operations.push(op.into());
        self
    }

    pub fn build(self) -> Result<Transaction, TransactionError> {
        if self.operations.is_empty() {
            return Err(TransactionError::NoOperations);
        }
        if self.operations.len() > MAX_OPERATIONS {
            return Err(TransactionError::TooManyOperations(self.operations.len()));
        }
        let time_bounds = self.time_bounds.ok_or(TransactionError::MissingTimeBounds)?;
        let fee = u32::try_from(self.operations.len())
            .ok()
            .and_then(|n| n.checked_mul(self.base_fee))
            .ok_or(TransactionError::FeeOverflow)?;
        let sequence = self
            .current_sequence
            .checked_add(1)
            .ok_or(TransactionError::SequenceOverflow)?;

        let tx = Transaction {
            source: self.source,
            fee,
            sequence,
            time_bounds: Some(time_bounds),
            memo: self.memo,
            operations: self.operations,
        };
        validate_transaction(&tx)?;
        Ok(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChangeTrustOp, PaymentOp, SetOptionsOp};
    use pitoken_types::{Amount, Asset, AssetCode, HomeDomain, PublicKey};

    fn account(byte: u8) -> AccountId {
        AccountId::new(PublicKey([byte; 32]))
    }

    fn tst(issuer: AccountId) -> Asset {
        Asset::credit(AssetCode::new("TST").unwrap(), issuer)
    }

    #[test]
    fn uses_next_sequence_and_scales_fee() {
        let tx = TransactionBuilder::new(account(1), 41)
            .base_fee(100)
            .timeout(Timestamp::new(1_000), 30)
            .add_operation(ChangeTrustOp::unlimited(tst(account(2))))
            .add_operation(SetOptionsOp {
                home_domain: HomeDomain::new("example.com").unwrap(),
            })
            .build()
            .unwrap();

        assert_eq!(tx.sequence, 42);
        assert_eq!(tx.fee, 200);
        assert_eq!(
            tx.time_bounds,
            Some(TimeBounds {
                min_time: 0,
                max_time: 1_030
            })
        );
    }

    #[test]
    fn requires_operations() {
        let err = TransactionBuilder::new(account(1), 0)
            .timeout(Timestamp::new(0), 30)
            .build()
            .unwrap_err();
        assert_eq!(err, TransactionError::NoOperations);
    }

    #[test]
    fn caps_operation_count() {
        let mut builder = TransactionBuilder::new(account(1), 0).timeout(Timestamp::new(0), 30);
        for _ in 0..=MAX_OPERATIONS {
            builder = builder.add_operation(ChangeTrustOp::unlimited(tst(account(2))));
        }
        assert_eq!(
            builder.build().unwrap_err(),
            TransactionError::TooManyOperations(MAX_OPERATIONS + 1)
        );
    }

    #[test]
    fn requires_time_bounds() {
        let err = TransactionBuilder::new(account(1), 0)
            .add_operation(ChangeTrustOp::unlimited(tst(account(2))))
            .build()
            .unwrap_err();
        assert_eq!(err, TransactionError::MissingTimeBounds);
    }

    #[test]
    fn sequence_overflow_is_an_error() {
        let err = TransactionBuilder::new(account(1), i64::MAX)
            .timeout(Timestamp::new(0), 30)
            .add_operation(ChangeTrustOp::unlimited(tst(account(2))))
            .build()
            .unwrap_err();
        assert_eq!(err, TransactionError::SequenceOverflow);
    }

    #[test]
    fn fee_overflow_is_an_error() {
        let err = TransactionBuilder::new(account(1), 0)
            .base_fee(u32::MAX)
            .timeout(Timestamp::new(0), 30)
            .add_operation(ChangeTrustOp::unlimited(tst(account(2))))
            .add_operation(ChangeTrustOp::unlimited(tst(account(3))))
            .build()
            .unwrap_err();
        assert_eq!(err, TransactionError::FeeOverflow);
    }

    #[test]
    fn runs_stateless_validation() {
        let err = TransactionBuilder::new(account(2), 0)
            .timeout(Timestamp::new(0), 30)
            .add_operation(PaymentOp {
                destination: account(1),
                asset: tst(account(2)),
                amount: Amount::ZERO,
            })
            .build()
            .unwrap_err();
        assert_eq!(err, TransactionError::NonPositiveAmount);
    }
}
