//! Payment operation.

use pitoken_types::{AccountId, Amount, Asset};
use serde::{Deserialize, Serialize};

/// Sends `amount` of `asset` to `destination`.
///
/// When the source is the asset's issuer, the payment creates new supply;
/// this is the only way tokens come into existence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOp {
    pub destination: AccountId,
    pub asset: Asset,
    pub amount: Amount,
}
