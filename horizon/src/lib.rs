//! Horizon HTTP client for pitoken.
//!
//! [`HorizonClient`] implements [`pitoken_client::LedgerClient`] against a
//! Horizon server such as `https://api.testnet.minepi.com`.

pub mod client;
pub mod config;
mod responses;

pub use client::HorizonClient;
pub use config::HorizonConfig;
