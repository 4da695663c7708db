use pitoken_client::{LedgerClient, SubmitResponse};
use pitoken_transactions::SetOptionsOp;
use pitoken_types::{HomeDomain, KeyPair};

use crate::error::IssueError;
use crate::submitter::Submitter;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkOutcome {
    Linked(SubmitResponse),
    /// The account already carried the domain; nothing was submitted.
    Unchanged,
}

/// Records the home domain of an issuing account.
pub struct DomainLinker<'s, 'a, C> {
    submitter: &'s Submitter<'a, C>,
}

impl<'s, 'a, C: LedgerClient> DomainLinker<'s, 'a, C> {
    pub fn new(submitter: &'s Submitter<'a, C>) -> Self {
        Self { submitter }
    }

    /// Set `domain` on `issuer`'s account, replacing any previous domain.
    pub async fn link(
        &self,
        issuer: &KeyPair,
        domain: &HomeDomain,
    ) -> Result<LinkOutcome, IssueError> {
        let issuer_id = issuer.account_id();
        let account = self.submitter.client().load_account(&issuer_id).await?;
        if account.home_domain.as_ref() == Some(domain) {
            tracing::info!(issuer = %issuer_id, %domain, "home domain already set");
            return Ok(LinkOutcome::Unchanged);
        }

        tracing::info!(
            issuer = %issuer_id,
            %domain,
            previous = account.home_domain.as_ref().map(HomeDomain::as_str).unwrap_or(""),
            "linking home domain"
        );
        let op = SetOptionsOp {
            home_domain: domain.clone(),
        };
        let response = self.submitter.submit(issuer, vec![op.into()]).await?;
        Ok(LinkOutcome::Linked(response))
    }
}
