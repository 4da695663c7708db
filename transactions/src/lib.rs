//! pitoken operations, transactions and their wire encoding.
//!
//! Operations:
//! - **ChangeTrust**: a holder opts in to (or out of) holding an asset
//! - **Payment**: moves an asset; paid by its issuer, it mints new supply
//! - **SetOptions**: records the home domain of the issuing account
//!
//! A [`Transaction`] groups operations under one source account and sequence
//! number. It is signed into a [`TransactionEnvelope`] whose XDR form is what
//! the network accepts.

pub mod builder;
pub mod change_trust;
pub mod envelope;
pub mod error;
pub mod memo;
pub mod payment;
pub mod set_options;
pub mod transaction;
pub mod validation;
pub mod xdr;

pub use builder::TransactionBuilder;
pub use change_trust::ChangeTrustOp;
pub use envelope::{DecoratedSignature, TransactionEnvelope};
pub use error::TransactionError;
pub use memo::Memo;
pub use payment::PaymentOp;
pub use set_options::SetOptionsOp;
pub use transaction::Transaction;
pub use validation::validate_transaction;

use pitoken_types::AccountId;
use serde::{Deserialize, Serialize};

/// Maximum number of operations in one transaction.
pub const MAX_OPERATIONS: usize = 100;

/// Smallest per-operation fee the network accepts, in stroops.
pub const MIN_BASE_FEE: u32 = 100;

/// The body of an operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationBody {
    ChangeTrust(ChangeTrustOp),
    Payment(PaymentOp),
    SetOptions(SetOptionsOp),
}

/// One operation, optionally run on behalf of an account other than the
/// transaction source (which then also has to sign).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub source_account: Option<AccountId>,
    pub body: OperationBody,
}

impl Operation {
    pub fn new(body: OperationBody) -> Self {
        Self {
            source_account: None,
            body,
        }
    }

    pub fn with_source(mut self, source: AccountId) -> Self {
        self.source_account = Some(source);
        self
    }

    /// The account this operation acts on: its own source, or the
    /// transaction's.
    pub fn effective_source<'a>(&'a self, tx_source: &'a AccountId) -> &'a AccountId {
        self.source_account.as_ref().unwrap_or(tx_source)
    }

    /// Name of the operation type, as Horizon reports it.
    pub fn type_name(&self) -> &'static str {
        match self.body {
            OperationBody::ChangeTrust(_) => "change_trust",
            OperationBody::Payment(_) => "payment",
            OperationBody::SetOptions(_) => "set_options",
        }
    }
}

impl From<ChangeTrustOp> for Operation {
    fn from(op: ChangeTrustOp) -> Self {
        Self::new(OperationBody::ChangeTrust(op))
    }
}

impl From<PaymentOp> for Operation {
    fn from(op: PaymentOp) -> Self {
        Self::new(OperationBody::Payment(op))
    }
}

impl From<SetOptionsOp> for Operation {
    fn from(op: SetOptionsOp) -> Self {
        Self::new(OperationBody::SetOptions(op))
    }
}
