use std::collections::HashMap;

use crate::errors::Result;
use crate::ledger::rwset::{PrivateEntry, Versioned, WriteSet};
use crate::ledger::world_state::{CommitInfo, WorldState};

/// In-memory world state
///
/// Not thread-safe; single-threaded tests and the CLI's ephemeral mode own it
/// directly.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorldState {
    public: HashMap<String, Versioned<Vec<u8>>>,
    private: HashMap<(String, String), Versioned<PrivateEntry>>,
    validation_parameters: HashMap<String, Versioned<Vec<u8>>>,
    height: u64,
}

impl MemoryWorldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live public keys
    pub fn public_len(&self) -> usize {
        self.public.len()
    }

    /// Number of live private entries across all collections
    pub fn private_len(&self) -> usize {
        self.private.len()
    }
}

impl WorldState for MemoryWorldState {
    fn public(&self, key: &str) -> Result<Option<Versioned<Vec<u8>>>> {
        Ok(self.public.get(key).cloned())
    }

    fn private(&self, collection: &str, key: &str) -> Result<Option<Versioned<PrivateEntry>>> {
        Ok(self
            .private
            .get(&(collection.to_string(), key.to_string()))
            .cloned())
    }

    fn validation_parameter(&self, key: &str) -> Result<Option<Versioned<Vec<u8>>>> {
        Ok(self.validation_parameters.get(key).cloned())
    }

    fn height(&self) -> Result<u64> {
        Ok(self.height)
    }

    fn apply(&mut self, writes: &WriteSet, commit: &CommitInfo) -> Result<()> {
        let version = commit.version();

        for (key, value) in &writes.public {
            match value {
                Some(bytes) => {
                    self.public
                        .insert(key.clone(), Versioned::new(bytes.clone(), version));
                }
                None => {
                    self.public.remove(key);
                    self.validation_parameters.remove(key);
                }
            }
        }

        for (address, entry) in &writes.private {
            match entry {
                Some(entry) => {
                    self.private
                        .insert(address.clone(), Versioned::new(entry.clone(), version));
                }
                None => {
                    self.private.remove(address);
                }
            }
        }

        for (key, policy) in &writes.validation_parameters {
            self.validation_parameters
                .insert(key.clone(), Versioned::new(policy.clone(), version));
        }

        self.height = commit.block_num;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerguard_core_types::TxId;

    fn commit(block_num: u64) -> CommitInfo {
        CommitInfo {
            tx_id: TxId::new(),
            block_num,
        }
    }

    #[test]
    fn test_new_state_is_empty() {
        let world = MemoryWorldState::new();
        assert_eq!(world.height().unwrap(), 0);
        assert!(world.public("z1").unwrap().is_none());
        assert!(world.private_hash("c", "a").unwrap().is_none());
    }

    #[test]
    fn test_apply_stamps_commit_version() {
        let mut world = MemoryWorldState::new();
        let mut writes = WriteSet::default();
        writes.public.insert("z1".to_string(), Some(b"v".to_vec()));
        writes.private.insert(
            ("c".to_string(), "a".to_string()),
            Some(PrivateEntry::new(b"s".to_vec(), vec![1, 2])),
        );
        world.apply(&writes, &commit(7)).unwrap();

        let public = world.public("z1").unwrap().unwrap();
        assert_eq!(public.value, b"v".to_vec());
        assert_eq!(public.version.block_num, 7);
        assert_eq!(world.private_hash("c", "a").unwrap().unwrap().value, vec![1, 2]);
        assert_eq!(world.height().unwrap(), 7);
    }

    #[test]
    fn test_public_delete_drops_validation_parameter() {
        let mut world = MemoryWorldState::new();
        let mut writes = WriteSet::default();
        writes.public.insert("z1".to_string(), Some(b"v".to_vec()));
        writes
            .validation_parameters
            .insert("z1".to_string(), b"policy".to_vec());
        world.apply(&writes, &commit(1)).unwrap();
        assert!(world.validation_parameter("z1").unwrap().is_some());

        let mut delete = WriteSet::default();
        delete.public.insert("z1".to_string(), None);
        world.apply(&delete, &commit(2)).unwrap();
        assert!(world.public("z1").unwrap().is_none());
        assert!(world.validation_parameter("z1").unwrap().is_none());
        assert_eq!(world.public_len(), 0);
    }
}
