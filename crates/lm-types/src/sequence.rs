use std::fmt;

use serde::{Deserialize, Serialize};

/// A ledger sequence number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LedgerIndex(u32);

impl LedgerIndex {
    /// Sequence zero. Stands in for "no previous ledger".
    pub const ZERO: LedgerIndex = LedgerIndex(0);

    pub const fn new(seq: u32) -> Self {
        Self(seq)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for LedgerIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for LedgerIndex {
    fn from(seq: u32) -> Self {
        Self(seq)
    }
}
