//! Build, sign and submit one transaction.

use pitoken_client::{LedgerClient, SubmitResponse};
use pitoken_transactions::{Memo, Operation, TransactionBuilder, TransactionEnvelope};
use pitoken_types::{KeyPair, NetworkId};
use serde::{Deserialize, Serialize};

use crate::error::IssueError;

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOptions {
    /// Validity window of each transaction, from the ledger's current time.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Per-operation fee to offer instead of the ledger's current base fee.
    #[serde(default)]
    pub base_fee_override: Option<u32>,
    #[serde(default)]
    pub memo: Memo,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            base_fee_override: None,
            memo: Memo::None,
        }
    }
}

/// Submits transactions for one network through a [`LedgerClient`].
///
/// The source account is reloaded immediately before every build, so the
/// sequence number is current at signing time. Nothing is retried: a
/// rejection is returned to the caller, who decides whether to resubmit.
pub struct Submitter<'a, C> {
    client: &'a C,
    network: NetworkId,
    options: SubmitOptions,
}

impl<'a, C: LedgerClient> Submitter<'a, C> {
    pub fn new(client: &'a C, network: NetworkId) -> Self {
        Self {
            client,
            network,
            options: SubmitOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SubmitOptions) -> Self {
        self.options = options;
        self
    }

    pub fn client(&self) -> &'a C {
        self.client
    }

    pub fn network(&self) -> &NetworkId {
        &self.network
    }

    pub fn options(&self) -> &SubmitOptions {
        &self.options
    }

    /// Build a transaction from `operations` with `source` as its source
    /// account and signer, and submit it.
    pub async fn submit(
        &self,
        source: &KeyPair,
        operations: Vec<Operation>,
    ) -> Result<SubmitResponse, IssueError> {
        let envelope = self.prepare(source, operations).await?;
        let hash = envelope.hash(&self.network);
        tracing::info!(%hash, source = %source.account_id(), "submitting transaction");

        match self.client.submit_transaction(&envelope).await {
            Ok(response) => {
                tracing::info!(%hash, ledger = response.ledger, "transaction applied");
                Ok(response)
            }
            Err(err) => {
                tracing::warn!(%hash, error = %err, category = %err.category(), "submission failed");
                Err(err.into())
            }
        }
    }

    /// Load the source account, fetch the fee and time bounds, then build
    /// and sign. Nothing is sent.
    pub async fn prepare(
        &self,
        source: &KeyPair,
        operations: Vec<Operation>,
    ) -> Result<TransactionEnvelope, IssueError> {
        let source_id = source.account_id();
        let account = self.client.load_account(&source_id).await?;
        let base_fee = match self.options.base_fee_override {
            Some(fee) => fee,
            None => self.client.fetch_base_fee().await?,
        };
        let bounds = self
            .client
            .fetch_timebounds(self.options.timeout_secs)
            .await?;
        tracing::debug!(
            source = %source_id,
            sequence = account.sequence,
            base_fee,
            max_time = bounds.max_time,
            "building transaction"
        );

        let builder = operations.into_iter().fold(
            TransactionBuilder::new(source_id, account.sequence)
                .base_fee(base_fee)
                .time_bounds(bounds)
                .memo(self.options.memo.clone()),
            |builder, op| builder.add_operation(op),
        );
        let mut envelope = TransactionEnvelope::new(builder.build()?);
        envelope.sign(source, &self.network)?;
        Ok(envelope)
    }
}
