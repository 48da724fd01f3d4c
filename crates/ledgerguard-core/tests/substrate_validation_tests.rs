#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::*;
use ledgerguard_core::context::{ClientIdentity, TransientMap};
use ledgerguard_core::endorsement::AssignmentOutcome;
use ledgerguard_core::errors::{ExError, ExErrorKind, LedgerGuardError};
use ledgerguard_core::ledger::{Simulation, WorldState};
use ledgerguard_core::{invoke, AssignmentMode, CommandResult, ContractConfig};
use ledgerguard_core_types::TxId;

fn endorsers(orgs: &[&str]) -> Vec<String> {
    orgs.iter().map(|o| o.to_string()).collect()
}

#[test]
fn test_racing_confidential_creates_second_commit_conflicts() {
    let mut h = Harness::new();
    let config = h.config.clone();
    let org1 = ClientIdentity::new(ORG1);

    let first = h
        .ledger
        .simulate(&org1, secret_transient("a"), |ctx| {
            invoke(ctx, &config, create_confidential("asset1"))
        })
        .unwrap();
    let second = h
        .ledger
        .simulate(&org1, secret_transient("b"), |ctx| {
            invoke(ctx, &config, create_confidential("asset1"))
        })
        .unwrap();

    h.ledger
        .commit(first.tx_id, &first.rwset, &endorsers(&[ORG1]))
        .unwrap();
    let err = h
        .ledger
        .commit(second.tx_id, &second.rwset, &endorsers(&[ORG1]))
        .unwrap_err();
    assert_eq!(
        err,
        LedgerGuardError::MvccConflict {
            key: "asset1".to_string()
        }
    );
    assert!(h.verify(ORG1, ORG1, "asset1", "a").unwrap());
}

#[test]
fn test_racing_public_creates_second_commit_conflicts() {
    let mut h = Harness::new();
    let config = h.config.clone();

    let first = h
        .ledger
        .simulate(&ClientIdentity::new(ORG1), TransientMap::new(), |ctx| {
            invoke(ctx, &config, create_public("z1", "one"))
        })
        .unwrap();
    let second = h
        .ledger
        .simulate(&ClientIdentity::new(ORG2), TransientMap::new(), |ctx| {
            invoke(ctx, &config, create_public("z1", "two"))
        })
        .unwrap();

    h.ledger
        .commit(first.tx_id, &first.rwset, &endorsers(&[ORG1]))
        .unwrap();
    let err = h
        .ledger
        .commit(second.tx_id, &second.rwset, &endorsers(&[ORG2]))
        .unwrap_err();
    let ex: ExError = err.into();
    assert_eq!(ex.kind(), ExErrorKind::MvccConflict);
}

#[test]
fn test_simulation_does_not_see_own_writes() {
    let h = Harness::new();
    let config = h.config.clone();
    let result = h
        .ledger
        .evaluate(&ClientIdentity::new(ORG1), secret_transient("42"), |ctx| {
            invoke(ctx, &config, create_confidential("asset1"))?;
            invoke(ctx, &config, asset_exists("asset1"))
        })
        .unwrap();
    assert_eq!(result, CommandResult::Exists(false));
}

#[test]
fn test_best_effort_assignment_failure_keeps_record() {
    let mut h = Harness::new();
    let rwset = {
        let mut sim = Simulation::new(h.ledger.world());
        let mut stub = RejectingValidationStub { inner: &mut sim };
        let result = invoke_on(&mut stub, ORG1, &h.config, create_public("z1", "hello")).unwrap();
        match result {
            CommandResult::PolicyAssignment(assignment) => {
                assert!(!assignment.is_applied());
                assert!(matches!(
                    assignment.outcome,
                    AssignmentOutcome::Failed { .. }
                ));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        sim.into_rwset()
    };

    h.ledger
        .commit(TxId::new(), &rwset, &endorsers(&[ORG1]))
        .unwrap();
    assert!(h.ledger.world().public("z1").unwrap().is_some());
    assert!(h.ledger.world().validation_parameter("z1").unwrap().is_none());

    // unprotected: any org may now rewrite it
    h.submit(ORG2, update_public("z1", "anyone")).unwrap();
}

#[test]
fn test_strict_assignment_failure_fails_transaction() {
    let config = ContractConfig::default().with_assignment_mode(AssignmentMode::Strict);
    let h = Harness::with_config(config);

    let mut sim = Simulation::new(h.ledger.world());
    let err = {
        let mut stub = RejectingValidationStub { inner: &mut sim };
        invoke_on(&mut stub, ORG1, &h.config, create_public("z1", "hello")).unwrap_err()
    };
    match &err {
        LedgerGuardError::EndorsementPolicyFailure { key, reason } => {
            assert_eq!(key, "z1");
            assert!(reason.contains("validation parameters disabled"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    let ex: ExError = err.into();
    assert_eq!(ex.code(), "ERR_ENDORSEMENT_POLICY_FAILURE");

    // the transaction failed, so its buffered write is never committed
    drop(sim);
    assert!(h.ledger.world().public("z1").unwrap().is_none());
}

#[test]
fn test_validation_parameter_rewrite_needs_current_owner() {
    let mut h = Harness::new();
    h.create_public(ORG1, "z1", "hello");

    let err = h
        .ledger
        .submit(
            &ClientIdentity::new(ORG2),
            TransientMap::new(),
            &endorsers(&[ORG2]),
            |ctx| {
                ctx.stub()
                    .set_state_validation_parameter("z1", b"{}".to_vec())
            },
        )
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerGuardError::EndorsementPolicyNotSatisfied { .. }
    ));
}

#[test]
fn test_failed_commit_leaves_height() {
    let mut h = Harness::new();
    h.create_public(ORG1, "z1", "hello");
    let height = h.ledger.world().height().unwrap();

    let _ = h.submit(ORG2, update_public("z1", "nope"));
    assert_eq!(h.ledger.world().height().unwrap(), height);
}
