//! The end-to-end issuance sequence.

use pitoken_client::{AssetRecord, LedgerClient, SubmitResponse};
use pitoken_metadata::{CurrencyRecord, PiToml};
use pitoken_types::{Amount, Asset, AssetCode, HomeDomain, KeyPair};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainLinker, LinkOutcome};
use crate::error::IssueError;
use crate::mint::Issuer;
use crate::submitter::Submitter;
use crate::trustline::TrustlineEstablisher;

/// Display fields of the token's pi.toml record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub desc: String,
    pub image: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssuancePlan {
    pub code: AssetCode,
    /// Holder trustline limit; unlimited when `None`.
    pub limit: Option<Amount>,
    pub amount: Amount,
    pub home_domain: Option<HomeDomain>,
    pub metadata: Option<TokenMetadata>,
}

#[derive(Clone, Debug)]
pub struct IssuanceReport {
    pub asset: Asset,
    /// `None` when the holder already trusted the asset with the planned
    /// limit.
    pub trustline: Option<SubmitResponse>,
    pub mint: SubmitResponse,
    pub domain: Option<LinkOutcome>,
    /// The ledger's record of the asset after minting.
    pub asset_record: Option<AssetRecord>,
    /// The rendered pi.toml to publish, when metadata was supplied.
    pub pi_toml: Option<String>,
}

/// Trust, confirm, mint, link, describe.
///
/// Each step starts only after the previous one was accepted. Minting is
/// never attempted until the holder's trustline shows up on the ledger.
pub struct IssuanceFlow<'s, 'a, C> {
    submitter: &'s Submitter<'a, C>,
}

impl<'s, 'a, C: LedgerClient> IssuanceFlow<'s, 'a, C> {
    pub fn new(submitter: &'s Submitter<'a, C>) -> Self {
        Self { submitter }
    }

    pub async fn run(
        &self,
        holder: &KeyPair,
        issuer: &KeyPair,
        plan: &IssuancePlan,
    ) -> Result<IssuanceReport, IssueError> {
        let client = self.submitter.client();
        let holder_id = holder.account_id();
        let issuer_id = issuer.account_id();
        let asset = Asset::credit(plan.code.clone(), issuer_id);
        let wanted_limit = plan.limit.unwrap_or(Amount::MAX);

        // Metadata problems surface before anything is submitted.
        let pi_toml = match &plan.metadata {
            Some(meta) => {
                let mut document = PiToml::for_network(self.submitter.network());
                document.upsert(CurrencyRecord::new(
                    &plan.code,
                    &issuer_id,
                    meta.name.clone(),
                    meta.desc.clone(),
                    meta.image.clone(),
                ));
                document.validate_for(self.submitter.network())?;
                Some(document.render()?)
            }
            None => None,
        };

        let existing = client.load_account(&holder_id).await?;
        let trustline = match existing.trustline(&asset) {
            Some(line) if line.limit == Some(wanted_limit) => {
                tracing::info!(holder = %holder_id, %asset, "trustline already in place");
                None
            }
            _ => Some(
                TrustlineEstablisher::new(self.submitter)
                    .establish(holder, &asset, plan.limit)
                    .await?,
            ),
        };

        let observed = client.load_account(&holder_id).await?;
        if observed.trustline(&asset).is_none() {
            return Err(IssueError::TrustlineNotObserved {
                holder: holder_id,
                asset,
            });
        }

        let mint = Issuer::new(self.submitter)
            .mint(issuer, &holder_id, &plan.code, plan.amount)
            .await?;

        let domain = match &plan.home_domain {
            Some(domain) => Some(DomainLinker::new(self.submitter).link(issuer, domain).await?),
            None => None,
        };

        let asset_record = client.asset(&asset).await?;
        if let Some(record) = &asset_record {
            tracing::info!(
                %asset,
                holders = record.num_accounts,
                supply = %record.amount,
                toml = %record.toml_href,
                "asset issued"
            );
        }

        Ok(IssuanceReport {
            asset,
            trustline,
            mint,
            domain,
            asset_record,
            pi_toml,
        })
    }
}
