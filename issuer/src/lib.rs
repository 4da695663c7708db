//! Issuing a custom token.
//!
//! Three signed transactions, each built against a freshly loaded account:
//! the holder trusts (code, issuer), the issuer pays the holder (which mints
//! the supply), and the issuer records its home domain so scanners can find
//! the pi.toml document. [`IssuanceFlow`] runs them in that order.

pub mod domain;
pub mod error;
pub mod flow;
pub mod mint;
pub mod submitter;
pub mod trustline;

pub use domain::{DomainLinker, LinkOutcome};
pub use error::IssueError;
pub use flow::{IssuanceFlow, IssuancePlan, IssuanceReport, TokenMetadata};
pub use mint::Issuer;
pub use submitter::{SubmitOptions, Submitter};
pub use trustline::TrustlineEstablisher;
