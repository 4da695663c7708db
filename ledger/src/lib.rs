//! In-memory reference ledger.
//!
//! Models the part of the network the issuance flows touch: native balances,
//! sequence numbers, trustlines, credit payments and home domains. Signed
//! envelopes are applied with the same checks and result codes a validator
//! reports, so flows can be exercised end to end without a network.

pub mod error;
pub mod ledger;
pub mod operations;
pub mod params;
pub mod state;

pub use error::LedgerError;
pub use ledger::{AppliedTransaction, Ledger};
pub use params::LedgerParams;
pub use state::{AccountEntry, LedgerState, TrustLineEntry};
