//! Result of an accepted submission.

use pitoken_types::TxHash;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub hash: TxHash,
    /// Sequence number of the ledger that included the transaction.
    pub ledger: u32,
}
