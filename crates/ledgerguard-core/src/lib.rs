//! LedgerGuard Core - confidential and public asset contract
//!
//! This crate provides the contract and the ledger it runs on, including:
//! - A confidential record store backed by private collections, with the
//!   secret supplied through transient data
//! - A digest verifier that checks a plaintext candidate against the hash the
//!   substrate committed publicly
//! - A public record store that stamps the creator's org and hardens each new
//!   key with a key-level endorsement policy
//! - A reference substrate (simulation, MVCC and endorsement validation, an
//!   in-memory world state) behind the `LedgerStub` and `WorldState` traits

pub mod commands;
pub mod config;
pub mod context;
pub mod digest;
pub mod endorsement;
pub mod errors;
pub mod invoke;
pub mod ledger;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod stub;

// Re-export commonly used types
pub use commands::{Command, CommandResult};
pub use config::{AssignmentMode, CollectionStrategy, ContractConfig};
pub use context::{ClientIdentity, TransientMap, TxContext};
pub use digest::{CandidateEncoding, DigestAlgorithm, DigestVerifier};
pub use endorsement::{KeyEndorsementPolicy, PolicyAssignment, RoleType};
pub use errors::{ExError, ExErrorKind, LedgerGuardError, RecordKind, Result};
pub use invoke::invoke;
pub use ledger::{Ledger, MemoryWorldState, WorldState};
pub use stub::LedgerStub;
