//! Transaction memo.

use serde::{Deserialize, Serialize};

/// Memo text is limited to 28 bytes on the wire.
pub const MAX_MEMO_TEXT_LEN: usize = 28;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Memo {
    #[default]
    None,
    Text(String),
    Id(u64),
}

impl Memo {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
