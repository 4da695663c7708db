//! Set-options operation, restricted to the home domain.

use pitoken_types::HomeDomain;
use serde::{Deserialize, Serialize};

/// Records `home_domain` on the source account, replacing any previous
/// value. A cleared domain removes the link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetOptionsOp {
    pub home_domain: HomeDomain,
}
