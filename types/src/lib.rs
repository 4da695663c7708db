//! Fundamental types for pitoken.
//!
//! This crate defines the types shared by every other crate in the workspace:
//! keys and account ids, amounts, assets, home domains, time bounds, network
//! identifiers and the ledger's result codes.

pub mod account;
pub mod amount;
pub mod asset;
pub mod domain;
pub mod error;
pub mod hash;
pub mod keys;
pub mod network;
pub mod result;
pub mod strkey;
pub mod time;

pub use account::AccountId;
pub use amount::{Amount, AmountError};
pub use asset::{Asset, AssetCode};
pub use domain::HomeDomain;
pub use error::PiTokenError;
pub use hash::TxHash;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use network::NetworkId;
pub use result::{ErrorCategory, OperationResultCode, TxResultCode};
pub use strkey::StrKeyError;
pub use time::{TimeBounds, Timestamp};
