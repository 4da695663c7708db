//! Change-trust operation: create, adjust or remove a trustline.

use pitoken_types::{Amount, Asset};
use serde::{Deserialize, Serialize};

/// Authorizes the source account to hold `asset` up to `limit`.
///
/// A limit of zero removes the trustline (only possible at zero balance).
/// The first trustline to a (code, issuer) pair is what makes the asset
/// known to the network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeTrustOp {
    pub asset: Asset,
    pub limit: Amount,
}

impl ChangeTrustOp {
    /// Trust `asset` with the maximum limit.
    pub fn unlimited(asset: Asset) -> Self {
        Self {
            asset,
            limit: Amount::MAX,
        }
    }

    pub fn with_limit(asset: Asset, limit: Amount) -> Self {
        Self { asset, limit }
    }

    /// Remove the trustline.
    pub fn remove(asset: Asset) -> Self {
        Self {
            asset,
            limit: Amount::ZERO,
        }
    }
}
