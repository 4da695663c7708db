use pitoken_client::{LedgerClient, SubmitResponse};
use pitoken_transactions::PaymentOp;
use pitoken_types::{AccountId, Amount, Asset, AssetCode, KeyPair};

use crate::error::IssueError;
use crate::submitter::Submitter;

/// Mints by paying from the issuing account.
pub struct Issuer<'s, 'a, C> {
    submitter: &'s Submitter<'a, C>,
    preflight: bool,
}

impl<'s, 'a, C: LedgerClient> Issuer<'s, 'a, C> {
    pub fn new(submitter: &'s Submitter<'a, C>) -> Self {
        Self {
            submitter,
            preflight: true,
        }
    }

    /// Skip the destination trustline check and let the ledger decide.
    pub fn without_preflight(mut self) -> Self {
        self.preflight = false;
        self
    }

    /// Pay `amount` of (`code`, issuer) to `destination`, creating it.
    pub async fn mint(
        &self,
        issuer: &KeyPair,
        destination: &AccountId,
        code: &AssetCode,
        amount: Amount,
    ) -> Result<SubmitResponse, IssueError> {
        if !amount.is_positive() {
            return Err(IssueError::NonPositiveAmount(amount));
        }
        let asset = Asset::credit(code.clone(), issuer.account_id());
        if self.preflight {
            self.check_destination(destination, &asset, amount).await?;
        }

        tracing::info!(%destination, %asset, %amount, "minting");
        let op = PaymentOp {
            destination: *destination,
            asset,
            amount,
        };
        self.submitter.submit(issuer, vec![op.into()]).await
    }

    async fn check_destination(
        &self,
        destination: &AccountId,
        asset: &Asset,
        amount: Amount,
    ) -> Result<(), IssueError> {
        let account = self.submitter.client().load_account(destination).await?;
        let line = account
            .trustline(asset)
            .ok_or_else(|| IssueError::MissingTrustline {
                holder: *destination,
                asset: asset.clone(),
            })?;
        let available = line.available_limit();
        if available < amount {
            return Err(IssueError::LimitExceeded {
                available,
                requested: amount,
            });
        }
        Ok(())
    }
}
