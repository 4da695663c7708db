//! Nullable infrastructure for deterministic testing.
//!
//! External dependencies (the clock, the ledger server) sit behind traits or
//! small wrappers. This crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the network
//!
//! Usage: swap the Horizon client for [`NullLedgerClient`] in tests.

pub mod clock;
pub mod ledger_client;

pub use clock::NullClock;
pub use ledger_client::NullLedgerClient;
