//! Reference ledger substrate
//!
//! Enough of a ledger to run the contract end to end: simulation with
//! read/write sets, commit-time MVCC and key-level endorsement validation,
//! and a pluggable committed `WorldState`. One commit is one block.
//!
//! ```
//! use ledgerguard_core::context::{ClientIdentity, TransientMap};
//! use ledgerguard_core::ledger::{Ledger, MemoryWorldState};
//!
//! let mut ledger = Ledger::new(MemoryWorldState::new());
//! let org1 = ClientIdentity::new("Org1MSP");
//! let committed = ledger
//!     .submit(&org1, TransientMap::new(), &["Org1MSP".to_string()], |ctx| {
//!         ctx.stub().put_state("k", b"v".to_vec())
//!     })
//!     .unwrap();
//! assert_eq!(committed.commit.block_num, 1);
//! ```

pub mod memory;
pub mod rwset;
pub mod simulation;
pub mod validation;
pub mod world_state;

use std::time::Instant;

use ledgerguard_core_types::TxId;

pub use memory::MemoryWorldState;
pub use rwset::{PrivateEntry, ReadSet, StateKey, TxRwSet, Version, Versioned, WriteSet};
pub use simulation::Simulation;
pub use validation::validate;
pub use world_state::{CommitInfo, WorldState};

use crate::context::{ClientIdentity, TransientMap, TxContext};
use crate::digest::DigestAlgorithm;
use crate::errors::Result;
use crate::logging_facility::elapsed_ms;
use crate::{log_op_end, log_op_error, log_op_start};

/// Output of a simulated, not yet committed, transaction
#[derive(Debug, Clone)]
pub struct Proposal<T> {
    pub tx_id: TxId,
    pub output: T,
    pub rwset: TxRwSet,
}

/// Output of a committed transaction
#[derive(Debug, Clone)]
pub struct Committed<T> {
    pub output: T,
    pub commit: CommitInfo,
}

pub struct Ledger<W: WorldState> {
    world: W,
    algorithm: DigestAlgorithm,
}

impl<W: WorldState> Ledger<W> {
    pub fn new(world: W) -> Self {
        Self {
            world,
            algorithm: DigestAlgorithm::default(),
        }
    }

    pub fn with_digest_algorithm(mut self, algorithm: DigestAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn into_world(self) -> W {
        self.world
    }

    /// Run `f` against committed state and capture its read/write set
    ///
    /// Nothing is committed. If `f` fails, the buffered writes are dropped.
    ///
    /// # Errors
    ///
    /// Whatever `f` returns.
    pub fn simulate<T, F>(
        &self,
        identity: &ClientIdentity,
        transient: TransientMap,
        f: F,
    ) -> Result<Proposal<T>>
    where
        F: FnOnce(&mut TxContext<'_>) -> Result<T>,
    {
        let tx_id = TxId::new();
        let mut simulation = Simulation::new(&self.world).with_digest_algorithm(self.algorithm);
        let output = {
            let mut ctx = TxContext::new(&mut simulation, identity.clone())
                .with_transient(transient)
                .with_tx_id(tx_id.clone());
            f(&mut ctx)?
        };
        Ok(Proposal {
            tx_id,
            output,
            rwset: simulation.into_rwset(),
        })
    }

    /// Validate a simulated transaction and append it as the next block
    ///
    /// # Errors
    ///
    /// `MvccConflict` or `EndorsementPolicyNotSatisfied` if validation
    /// rejects the transaction; backend errors from the world state.
    pub fn commit(
        &mut self,
        tx_id: TxId,
        rwset: &TxRwSet,
        endorsers: &[String],
    ) -> Result<CommitInfo> {
        log_op_start!("ledger.commit", tx_id = %tx_id);
        let start = Instant::now();

        let result = validate(&self.world, rwset, endorsers).and_then(|()| {
            let commit = CommitInfo {
                tx_id,
                block_num: self.world.height()? + 1,
            };
            self.world.apply(&rwset.writes, &commit)?;
            Ok(commit)
        });

        match result {
            Ok(commit) => {
                log_op_end!(
                    "ledger.commit",
                    duration_ms = elapsed_ms(start),
                    block_num = commit.block_num
                );
                Ok(commit)
            }
            Err(e) => {
                log_op_error!(
                    "ledger.commit",
                    e.clone(),
                    duration_ms = elapsed_ms(start)
                );
                Err(e)
            }
        }
    }

    /// Simulate, validate and commit in one step
    ///
    /// # Errors
    ///
    /// Errors from `f` (nothing is committed) or from `commit`.
    pub fn submit<T, F>(
        &mut self,
        identity: &ClientIdentity,
        transient: TransientMap,
        endorsers: &[String],
        f: F,
    ) -> Result<Committed<T>>
    where
        F: FnOnce(&mut TxContext<'_>) -> Result<T>,
    {
        let proposal = self.simulate(identity, transient, f)?;
        let commit = self.commit(proposal.tx_id, &proposal.rwset, endorsers)?;
        Ok(Committed {
            output: proposal.output,
            commit,
        })
    }

    /// Simulate a query and discard its read/write set
    ///
    /// # Errors
    ///
    /// Whatever `f` returns.
    pub fn evaluate<T, F>(
        &self,
        identity: &ClientIdentity,
        transient: TransientMap,
        f: F,
    ) -> Result<T>
    where
        F: FnOnce(&mut TxContext<'_>) -> Result<T>,
    {
        Ok(self.simulate(identity, transient, f)?.output)
    }
}
