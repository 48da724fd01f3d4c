//! Transaction simulation against committed state
//!
//! A `Simulation` is the `LedgerStub` a contract operation runs on. Reads go
//! straight to the committed world state and are recorded with the version
//! they observed; writes are buffered. A transaction therefore does not see
//! its own writes, which matches how endorsing peers simulate proposals.

use crate::digest::DigestAlgorithm;
use crate::errors::Result;
use crate::ledger::rwset::{PrivateEntry, StateKey, TxRwSet};
use crate::ledger::world_state::WorldState;
use crate::stub::LedgerStub;

pub struct Simulation<'w> {
    world: &'w dyn WorldState,
    algorithm: DigestAlgorithm,
    rwset: TxRwSet,
}

impl<'w> Simulation<'w> {
    pub fn new(world: &'w dyn WorldState) -> Self {
        Self {
            world,
            algorithm: DigestAlgorithm::default(),
            rwset: TxRwSet::default(),
        }
    }

    /// Hash function used for private-data commitments
    pub fn with_digest_algorithm(mut self, algorithm: DigestAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn rwset(&self) -> &TxRwSet {
        &self.rwset
    }

    pub fn into_rwset(self) -> TxRwSet {
        self.rwset
    }

    fn private_key(collection: &str, key: &str) -> StateKey {
        StateKey::Private {
            collection: collection.to_string(),
            key: key.to_string(),
        }
    }
}

impl LedgerStub for Simulation<'_> {
    fn get_state(&mut self, key: &str) -> Result<Option<Vec<u8>>> {
        let committed = self.world.public(key)?;
        self.rwset.reads.record(
            StateKey::Public(key.to_string()),
            committed.as_ref().map(|v| v.version),
        );
        Ok(committed.map(|v| v.value))
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        self.rwset.writes.public.insert(key.to_string(), Some(value));
        Ok(())
    }

    fn delete_state(&mut self, key: &str) -> Result<()> {
        self.rwset.writes.public.insert(key.to_string(), None);
        Ok(())
    }

    fn get_private_data(&mut self, collection: &str, key: &str) -> Result<Option<Vec<u8>>> {
        let committed = self.world.private(collection, key)?;
        self.rwset.reads.record(
            Self::private_key(collection, key),
            committed.as_ref().map(|v| v.version),
        );
        Ok(committed.map(|v| v.value.value.into_inner()))
    }

    fn put_private_data(&mut self, collection: &str, key: &str, value: Vec<u8>) -> Result<()> {
        let hash = self.algorithm.digest(&value);
        tracing::debug!(collection, asset_id = key, "private write buffered");
        self.rwset.writes.private.insert(
            (collection.to_string(), key.to_string()),
            Some(PrivateEntry::new(value, hash)),
        );
        Ok(())
    }

    fn delete_private_data(&mut self, collection: &str, key: &str) -> Result<()> {
        self.rwset
            .writes
            .private
            .insert((collection.to_string(), key.to_string()), None);
        Ok(())
    }

    fn get_private_data_hash(&mut self, collection: &str, key: &str) -> Result<Option<Vec<u8>>> {
        let committed = self.world.private_hash(collection, key)?;
        self.rwset.reads.record(
            Self::private_key(collection, key),
            committed.as_ref().map(|v| v.version),
        );
        Ok(committed.map(|v| v.value))
    }

    fn set_state_validation_parameter(&mut self, key: &str, policy: Vec<u8>) -> Result<()> {
        self.rwset
            .writes
            .validation_parameters
            .insert(key.to_string(), policy);
        Ok(())
    }

    fn get_state_validation_parameter(&mut self, key: &str) -> Result<Option<Vec<u8>>> {
        let committed = self.world.validation_parameter(key)?;
        self.rwset.reads.record(
            StateKey::ValidationParameter(key.to_string()),
            committed.as_ref().map(|v| v.version),
        );
        Ok(committed.map(|v| v.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::memory::MemoryWorldState;

    #[test]
    fn test_reads_do_not_see_buffered_writes() {
        let world = MemoryWorldState::new();
        let mut sim = Simulation::new(&world);
        sim.put_state("z1", b"v".to_vec()).unwrap();
        assert_eq!(sim.get_state("z1").unwrap(), None);
        assert_eq!(sim.rwset().writes.public.len(), 1);
    }

    #[test]
    fn test_private_write_records_sha256_hash() {
        let world = MemoryWorldState::new();
        let mut sim = Simulation::new(&world);
        sim.put_private_data("c", "a", b"secret".to_vec()).unwrap();

        let rwset = sim.into_rwset();
        let entry = rwset.writes.private[&("c".to_string(), "a".to_string())]
            .clone()
            .unwrap();
        assert_eq!(entry.hash, DigestAlgorithm::Sha256.digest(b"secret"));
        assert_eq!(entry.value.expose(), b"secret");
    }

    #[test]
    fn test_absent_reads_recorded_without_version() {
        let world = MemoryWorldState::new();
        let mut sim = Simulation::new(&world);
        sim.get_private_data_hash("c", "a").unwrap();
        sim.get_state_validation_parameter("z1").unwrap();

        let reads: Vec<_> = sim.rwset().reads.iter().collect();
        assert_eq!(reads.len(), 2);
        assert!(reads.iter().all(|(_, version)| version.is_none()));
    }
}
