//! Nullable ledger client: an in-memory ledger behind the client trait.

use std::sync::{Mutex, MutexGuard};

use pitoken_client::{
    AccountSnapshot, AssetRecord, ClientError, LedgerClient, SubmitResponse,
};
use pitoken_ledger::{Ledger, LedgerParams};
use pitoken_transactions::TransactionEnvelope;
use pitoken_types::{AccountId, Amount, Asset, NetworkId, TimeBounds};

use crate::clock::NullClock;

/// A [`LedgerClient`] backed by the reference [`Ledger`].
///
/// Every submitted envelope is recorded, accepted or not. Errors queued with
/// [`NullLedgerClient::fail_next_submission`] are returned instead of
/// applying the next submissions.
/// Thread-safe for use with tokio's multi-threaded runtime.
pub struct NullLedgerClient {
    ledger: Mutex<Ledger>,
    clock: NullClock,
    submitted: Mutex<Vec<TransactionEnvelope>>,
    queued_failures: Mutex<Vec<ClientError>>,
}

impl NullLedgerClient {
    pub fn new(network: NetworkId, params: LedgerParams, clock: NullClock) -> Self {
        Self {
            ledger: Mutex::new(Ledger::new(network, params)),
            clock,
            submitted: Mutex::new(Vec::new()),
            queued_failures: Mutex::new(Vec::new()),
        }
    }

    /// Pi Testnet with default parameters, starting at `now_secs`.
    pub fn testnet(now_secs: u64) -> Self {
        Self::new(
            NetworkId::PiTestnet,
            LedgerParams::default(),
            NullClock::new(now_secs),
        )
    }

    pub fn clock(&self) -> &NullClock {
        &self.clock
    }

    /// Direct access to the ledger, for setup and assertions.
    pub fn ledger(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap()
    }

    /// Create `account` with `amount` of the native asset, or top it up if it
    /// already exists. Stands in for a faucet.
    pub fn fund(&self, account: AccountId, amount: Amount) {
        let mut ledger = self.ledger();
        if ledger.account(&account).is_some() {
            ledger.credit_native(&account, amount).unwrap();
        } else {
            ledger.create_account(account, amount).unwrap();
        }
    }

    /// Every envelope passed to `submit_transaction`, in order.
    pub fn submitted(&self) -> Vec<TransactionEnvelope> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn submission_count(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    /// Make the next submission fail with `error` without touching the
    /// ledger. Queued errors are returned in order.
    pub fn fail_next_submission(&self, error: ClientError) {
        self.queued_failures.lock().unwrap().push(error);
    }
}

impl LedgerClient for NullLedgerClient {
    async fn load_account(&self, account: &AccountId) -> Result<AccountSnapshot, ClientError> {
        self.ledger()
            .snapshot(account)
            .ok_or_else(|| ClientError::NotFound(format!("/accounts/{account}")))
    }

    async fn fetch_base_fee(&self) -> Result<u32, ClientError> {
        Ok(self.ledger().params().base_fee)
    }

    async fn fetch_timebounds(&self, timeout_secs: u64) -> Result<TimeBounds, ClientError> {
        Ok(TimeBounds::with_timeout(self.clock.now(), timeout_secs))
    }

    async fn submit_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SubmitResponse, ClientError> {
        self.submitted.lock().unwrap().push(envelope.clone());

        let queued = {
            let mut failures = self.queued_failures.lock().unwrap();
            if failures.is_empty() {
                None
            } else {
                Some(failures.remove(0))
            }
        };
        if let Some(error) = queued {
            return Err(error);
        }

        let now = self.clock.now();
        self.ledger()
            .apply(envelope, now)
            .map(|applied| SubmitResponse {
                hash: applied.hash,
                ledger: applied.ledger,
            })
            .map_err(ClientError::Rejected)
    }

    async fn asset(&self, asset: &Asset) -> Result<Option<AssetRecord>, ClientError> {
        Ok(self.ledger().asset_record(asset))
    }
}

impl Default for NullLedgerClient {
    fn default() -> Self {
        Self::testnet(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitoken_crypto::keypair_from_seed;
    use pitoken_transactions::{ChangeTrustOp, TransactionBuilder};
    use pitoken_types::{AssetCode, TxResultCode};

    const NOW: u64 = 1_700_000_000;

    async fn trust_envelope(client: &NullLedgerClient) -> TransactionEnvelope {
        let holder = keypair_from_seed(&[7u8; 32]);
        let issuer = keypair_from_seed(&[9u8; 32]);
        let snapshot = client.load_account(&holder.account_id()).await.unwrap();
        let bounds = client.fetch_timebounds(30).await.unwrap();
        let tx = TransactionBuilder::new(holder.account_id(), snapshot.sequence)
            .base_fee(client.fetch_base_fee().await.unwrap())
            .time_bounds(bounds)
            .add_operation(ChangeTrustOp::unlimited(Asset::credit(
                AssetCode::new("TST").unwrap(),
                issuer.account_id(),
            )))
            .build()
            .unwrap();
        let mut env = TransactionEnvelope::new(tx);
        env.sign(&holder, &NetworkId::PiTestnet).unwrap();
        env
    }

    fn funded() -> NullLedgerClient {
        let client = NullLedgerClient::testnet(NOW);
        client.fund(
            keypair_from_seed(&[7u8; 32]).account_id(),
            Amount::from_units(100).unwrap(),
        );
        client.fund(
            keypair_from_seed(&[9u8; 32]).account_id(),
            Amount::from_units(100).unwrap(),
        );
        client
    }

    #[tokio::test]
    async fn submissions_apply_and_are_recorded() {
        let client = funded();
        let env = trust_envelope(&client).await;
        let resp = client.submit_transaction(&env).await.unwrap();
        assert_eq!(resp.hash, env.hash(&NetworkId::PiTestnet));
        assert_eq!(client.submission_count(), 1);

        // Resubmitting the same envelope is a stale sequence.
        let err = client.submit_transaction(&env).await.unwrap_err();
        assert_eq!(
            err.rejection().unwrap().transaction,
            TxResultCode::BadSeq
        );
        assert_eq!(client.submission_count(), 2);
    }

    #[tokio::test]
    async fn queued_failure_skips_the_ledger() {
        let client = funded();
        client.fail_next_submission(ClientError::Timeout);
        let env = trust_envelope(&client).await;
        assert!(matches!(
            client.submit_transaction(&env).await,
            Err(ClientError::Timeout)
        ));
        // The ledger never saw it, so the same envelope still applies.
        client.submit_transaction(&env).await.unwrap();
    }

    #[tokio::test]
    async fn clock_drives_expiry() {
        let client = funded();
        let env = trust_envelope(&client).await;
        client.clock().advance(31);
        let err = client.submit_transaction(&env).await.unwrap_err();
        assert_eq!(err.rejection().unwrap().transaction, TxResultCode::TooLate);
    }

    #[tokio::test]
    async fn unknown_account_is_not_found() {
        let client = NullLedgerClient::testnet(NOW);
        let stranger = keypair_from_seed(&[3u8; 32]).account_id();
        assert!(matches!(
            client.load_account(&stranger).await,
            Err(ClientError::NotFound(_))
        ));
    }

    #[test]
    fn fund_tops_up_existing_accounts() {
        let client = NullLedgerClient::testnet(NOW);
        let id = keypair_from_seed(&[7u8; 32]).account_id();
        client.fund(id, Amount::from_units(10).unwrap());
        client.fund(id, Amount::from_units(5).unwrap());
        assert_eq!(
            client.ledger().account(&id).unwrap().balance,
            Amount::from_units(15).unwrap()
        );
    }
}
