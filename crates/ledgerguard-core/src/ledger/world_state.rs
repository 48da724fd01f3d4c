//! Committed ledger state

use ledgerguard_core_types::TxId;

use crate::errors::Result;
use crate::ledger::rwset::{PrivateEntry, Version, Versioned, WriteSet};

/// Identity of one committed transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub tx_id: TxId,
    pub block_num: u64,
}

impl CommitInfo {
    /// Version stamped on every key this commit writes
    pub fn version(&self) -> Version {
        Version::new(self.block_num, 0)
    }
}

/// Backend holding the committed world state
///
/// Reads see only committed data. `apply` must be atomic: either the whole
/// write set lands at the commit's version or nothing changes.
///
/// Deleting a public key also removes its validation parameter.
pub trait WorldState {
    fn public(&self, key: &str) -> Result<Option<Versioned<Vec<u8>>>>;

    fn private(&self, collection: &str, key: &str) -> Result<Option<Versioned<PrivateEntry>>>;

    /// Publicly committed hash of a private entry
    fn private_hash(&self, collection: &str, key: &str) -> Result<Option<Versioned<Vec<u8>>>> {
        Ok(self
            .private(collection, key)?
            .map(|entry| entry.map(|e| e.hash)))
    }

    fn validation_parameter(&self, key: &str) -> Result<Option<Versioned<Vec<u8>>>>;

    /// Number of the last committed block, 0 before the first commit
    fn height(&self) -> Result<u64>;

    fn apply(&mut self, writes: &WriteSet, commit: &CommitInfo) -> Result<()>;
}
