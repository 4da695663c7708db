//! Transaction application.

use pitoken_client::{AccountSnapshot, AssetRecord, Rejection};
use pitoken_transactions::{OperationBody, TransactionEnvelope};
use pitoken_types::{
    AccountId, Amount, Asset, NetworkId, OperationResultCode, Timestamp, TxHash, TxResultCode,
};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::operations;
use crate::params::LedgerParams;
use crate::state::{AccountEntry, LedgerState, TrustLineEntry};

/// Outcome of a transaction the ledger accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedTransaction {
    pub hash: TxHash,
    /// Sequence of the ledger that included the transaction.
    pub ledger: u32,
    pub fee_charged: Amount,
}

/// A single-node ledger that closes one ledger per applied transaction.
#[derive(Clone, Debug)]
pub struct Ledger {
    network: NetworkId,
    params: LedgerParams,
    state: LedgerState,
    ledger_sequence: u32,
}

impl Ledger {
    pub fn new(network: NetworkId, params: LedgerParams) -> Self {
        Self {
            network,
            params,
            state: LedgerState::default(),
            ledger_sequence: 1,
        }
    }

    pub fn network(&self) -> &NetworkId {
        &self.network
    }

    pub fn params(&self) -> &LedgerParams {
        &self.params
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    /// Sequence of the most recently closed ledger.
    pub fn ledger_sequence(&self) -> u32 {
        self.ledger_sequence
    }

    /// Create a funded account directly. New accounts start with a sequence
    /// number derived from the current ledger, as on the network.
    pub fn create_account(
        &mut self,
        id: AccountId,
        starting_balance: Amount,
    ) -> Result<(), LedgerError> {
        if self.state.accounts.contains_key(&id) {
            return Err(LedgerError::AccountExists(id));
        }
        let needed = self.params.minimum_balance(0);
        if starting_balance < needed {
            return Err(LedgerError::BelowMinimumBalance {
                needed,
                got: starting_balance,
            });
        }
        self.state.accounts.insert(
            id,
            AccountEntry {
                id,
                balance: starting_balance,
                sequence: i64::from(self.ledger_sequence) << 32,
                home_domain: None,
                subentry_count: 0,
            },
        );
        self.ledger_sequence += 1;
        tracing::debug!(account = %id, balance = %starting_balance, "account created");
        Ok(())
    }

    /// Add native funds to an existing account.
    pub fn credit_native(&mut self, id: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        let account = self
            .state
            .account_mut(id)
            .ok_or(LedgerError::AccountNotFound(*id))?;
        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    pub fn account(&self, id: &AccountId) -> Option<&AccountEntry> {
        self.state.account(id)
    }

    pub fn snapshot(&self, id: &AccountId) -> Option<AccountSnapshot> {
        self.state.snapshot(id)
    }

    pub fn trustline(&self, holder: &AccountId, asset: &Asset) -> Option<&TrustLineEntry> {
        self.state.trustline(holder, asset)
    }

    pub fn asset_record(&self, asset: &Asset) -> Option<AssetRecord> {
        self.state.asset_record(asset)
    }

    /// Validate and apply a signed envelope at time `now`.
    ///
    /// Transaction-level failures leave the ledger untouched. Once those
    /// checks pass the fee is charged and the sequence number consumed even
    /// if an operation then fails; operation effects are all-or-nothing.
    pub fn apply(
        &mut self,
        envelope: &TransactionEnvelope,
        now: Timestamp,
    ) -> Result<AppliedTransaction, Rejection> {
        let tx = &envelope.tx;
        let hash = envelope.hash(&self.network);

        let reject = |code: TxResultCode| {
            tracing::debug!(%hash, code = %code, "transaction rejected");
            Rejection::transaction(code)
        };

        let Some(source) = self.state.account(&tx.source) else {
            return Err(reject(TxResultCode::NoAccount));
        };
        if tx.operations.is_empty() {
            return Err(reject(TxResultCode::MissingOperation));
        }
        if tx.operations.len() > self.params.max_operations {
            return Err(reject(TxResultCode::Malformed));
        }
        if let Some(bounds) = &tx.time_bounds {
            if bounds.is_too_early(now) {
                return Err(reject(TxResultCode::TooEarly));
            }
            if bounds.is_too_late(now) {
                return Err(reject(TxResultCode::TooLate));
            }
        }
        let min_fee = u64::from(self.params.base_fee) * tx.operations.len() as u64;
        if u64::from(tx.fee) < min_fee {
            return Err(reject(TxResultCode::InsufficientFee));
        }
        if Some(tx.sequence) != source.sequence.checked_add(1) {
            return Err(reject(TxResultCode::BadSeq));
        }
        if !envelope.is_signed_by(&tx.source, &self.network) {
            return Err(reject(TxResultCode::BadAuth));
        }
        let signers = tx.required_signers();
        let extra = envelope.signatures.iter().any(|sig| {
            !signers
                .iter()
                .any(|signer| sig.is_valid_for(signer.public_key(), &hash))
        });
        if extra {
            return Err(reject(TxResultCode::BadAuthExtra));
        }
        let fee = Amount::from_stroops(i64::from(tx.fee));
        if source.balance < fee {
            return Err(reject(TxResultCode::InsufficientBalance));
        }

        // Past this point the transaction is included in a ledger.
        if let Some(source) = self.state.account_mut(&tx.source) {
            source.balance = source.balance.saturating_sub(fee);
            source.sequence = tx.sequence;
        }
        self.ledger_sequence += 1;

        let mut staged = self.state.clone();
        let mut codes = Vec::with_capacity(tx.operations.len());
        let mut failed = false;
        for op in &tx.operations {
            let op_source = op.effective_source(&tx.source);
            let result = if staged.account(op_source).is_none() {
                Err(OperationResultCode::NoSourceAccount)
            } else if !envelope.is_signed_by(op_source, &self.network) {
                Err(OperationResultCode::BadAuth)
            } else {
                match &op.body {
                    OperationBody::ChangeTrust(body) => {
                        operations::change_trust(&mut staged, &self.params, op_source, body)
                    }
                    OperationBody::Payment(body) => {
                        operations::payment(&mut staged, &self.params, op_source, body)
                    }
                    OperationBody::SetOptions(body) => {
                        operations::set_options(&mut staged, op_source, body)
                    }
                }
            };
            match result {
                Ok(()) => codes.push(OperationResultCode::Success),
                Err(code) => {
                    failed = true;
                    codes.push(code);
                }
            }
        }

        if failed {
            let rejection = Rejection::failed(codes);
            tracing::debug!(%hash, result = %rejection, "transaction failed");
            return Err(rejection);
        }

        self.state = staged;
        tracing::debug!(
            %hash,
            ledger = self.ledger_sequence,
            operations = tx.operations.len(),
            "transaction applied"
        );
        Ok(AppliedTransaction {
            hash,
            ledger: self.ledger_sequence,
            fee_charged: fee,
        })
    }
}
