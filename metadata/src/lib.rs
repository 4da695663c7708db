//! Token metadata published at `https://<home domain>/.well-known/pi.toml`.
//!
//! The document carries one `[[CURRENCIES]]` record per (code, issuer) pair
//! issued by the account that links the domain. Scanners verify every
//! record and the reachability of its image; a token whose record is
//! missing or incomplete is delisted on the next scan.

pub mod document;
pub mod error;
pub mod probe;

pub use document::{well_known_url, CurrencyRecord, PiToml};
pub use error::{MetadataError, ValidationIssue};
pub use probe::{probe, ProbeIssue, ProbeReport, Prober};
