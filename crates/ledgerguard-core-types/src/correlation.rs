//! Correlation types for transaction tracking
//!
//! Every simulated transaction carries a `TxId`. It is stamped on the
//! transaction's log events and recorded with the block it commits in.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a single ledger transaction
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TxId(String);

impl TxId {
    /// Generate a fresh, time-ordered transaction id (UUIDv7)
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TxId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
