//! Commit-time validation
//!
//! Two checks, in order:
//!
//! 1. MVCC: every version recorded in the read set must still be the
//!    committed version (absent must still be absent).
//! 2. Key-level endorsement: for each public key written, and each key whose
//!    validation parameter is written, the policy committed on that key (if
//!    any) must be satisfied by the endorsing organizations. Keys without a
//!    policy fall back to the chain default, which accepts.

use std::collections::BTreeSet;

use crate::endorsement::KeyEndorsementPolicy;
use crate::errors::{LedgerGuardError, Result};
use crate::ledger::rwset::{StateKey, TxRwSet};
use crate::ledger::world_state::WorldState;
use crate::stub::present;

/// # Errors
///
/// `MvccConflict` for a stale read, `EndorsementPolicyNotSatisfied` for a
/// write the endorsers may not make.
pub fn validate(world: &dyn WorldState, rwset: &TxRwSet, endorsers: &[String]) -> Result<()> {
    check_read_versions(world, rwset)?;

    let guarded: BTreeSet<&str> = rwset
        .writes
        .public
        .keys()
        .chain(rwset.writes.validation_parameters.keys())
        .map(String::as_str)
        .collect();

    for key in guarded {
        check_key_policy(world, key, endorsers)?;
    }
    Ok(())
}

fn check_read_versions(world: &dyn WorldState, rwset: &TxRwSet) -> Result<()> {
    for (state_key, observed) in rwset.reads.iter() {
        let current = match state_key {
            StateKey::Public(key) => world.public(key)?.map(|v| v.version),
            StateKey::Private { collection, key } => {
                world.private_hash(collection, key)?.map(|v| v.version)
            }
            StateKey::ValidationParameter(key) => {
                world.validation_parameter(key)?.map(|v| v.version)
            }
        };
        if current != *observed {
            tracing::debug!(key = %state_key, "stale read");
            return Err(LedgerGuardError::MvccConflict {
                key: state_key.key().to_string(),
            });
        }
    }
    Ok(())
}

fn check_key_policy(world: &dyn WorldState, key: &str, endorsers: &[String]) -> Result<()> {
    let Some(bytes) = present(world.validation_parameter(key)?.map(|v| v.value)) else {
        return Ok(());
    };
    let policy = KeyEndorsementPolicy::from_bytes(&bytes)?;
    if policy.is_satisfied_by(endorsers) {
        return Ok(());
    }
    Err(LedgerGuardError::EndorsementPolicyNotSatisfied {
        key: key.to_string(),
        required: policy.list_orgs(),
        endorsers: endorsers.to_vec(),
    })
}
