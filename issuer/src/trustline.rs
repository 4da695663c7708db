use pitoken_client::{LedgerClient, SubmitResponse};
use pitoken_transactions::ChangeTrustOp;
use pitoken_types::{Amount, Asset, KeyPair};

use crate::error::IssueError;
use crate::submitter::Submitter;

/// Opts a holder in to an asset.
pub struct TrustlineEstablisher<'s, 'a, C> {
    submitter: &'s Submitter<'a, C>,
}

impl<'s, 'a, C: LedgerClient> TrustlineEstablisher<'s, 'a, C> {
    pub fn new(submitter: &'s Submitter<'a, C>) -> Self {
        Self { submitter }
    }

    /// Submit a change-trust from `holder` for `asset`. Without a `limit`
    /// the trustline is unlimited; an existing trustline gets its limit
    /// replaced.
    pub async fn establish(
        &self,
        holder: &KeyPair,
        asset: &Asset,
        limit: Option<Amount>,
    ) -> Result<SubmitResponse, IssueError> {
        if asset.is_native() {
            return Err(IssueError::NativeAsset);
        }
        let op = match limit {
            Some(limit) => ChangeTrustOp::with_limit(asset.clone(), limit),
            None => ChangeTrustOp::unlimited(asset.clone()),
        };
        tracing::info!(
            holder = %holder.account_id(),
            %asset,
            limit = %op.limit,
            "establishing trustline"
        );
        self.submitter.submit(holder, vec![op.into()]).await
    }
}
