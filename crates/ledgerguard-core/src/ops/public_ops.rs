//! Public record store
//!
//! Records live on the replicated keyspace under their id. Creation stamps
//! the caller's org into the record and then hardens the key with a
//! key-level endorsement policy naming that org.

use super::validate_asset_id;
use crate::config::{AssignmentMode, ContractConfig};
use crate::context::TxContext;
use crate::endorsement::{
    assign_endorsement, read_key_policy, AssignmentOutcome, KeyEndorsementPolicy,
    PolicyAssignment,
};
use crate::errors::{LedgerGuardError, RecordKind, Result};
use crate::model::PublicAsset;
use crate::stub::present;

fn not_found(id: &str) -> LedgerGuardError {
    LedgerGuardError::NotFound {
        kind: RecordKind::Public,
        asset_id: id.to_string(),
    }
}

/// # Errors
///
/// `InvalidInput` for an empty id; substrate errors propagate.
pub fn public_exists(ctx: &mut TxContext<'_>, id: &str) -> Result<bool> {
    validate_asset_id(id)?;
    Ok(present(ctx.stub().get_state(id)?).is_some())
}

/// Create a public asset owned by the caller's org
///
/// The record write comes first; the endorsement policy is attached after
/// it, exactly once. What happens when attaching fails depends on
/// `config.assignment_mode`.
///
/// # Returns
/// The policy assignment diagnostic
///
/// # Errors
/// * `AlreadyExists` - The id is already on the public keyspace
/// * `EndorsementPolicyFailure` - Strict mode only, attaching the policy failed
pub fn create_public(
    ctx: &mut TxContext<'_>,
    config: &ContractConfig,
    id: &str,
    payload: &str,
) -> Result<PolicyAssignment> {
    if public_exists(ctx, id)? {
        return Err(LedgerGuardError::AlreadyExists {
            kind: RecordKind::Public,
            asset_id: id.to_string(),
        });
    }

    let owner = ctx.caller_org().to_string();
    let asset = PublicAsset::new(id, payload, owner.as_str());
    ctx.stub().put_state(id, asset.to_bytes()?)?;

    let assignment = assign_endorsement(ctx, id, &owner)?;
    if let AssignmentOutcome::Failed { reason } = &assignment.outcome {
        match config.assignment_mode {
            AssignmentMode::BestEffort => {
                tracing::warn!(
                    asset_id = id,
                    msp_id = %owner,
                    reason = %reason,
                    "endorsement policy not attached; record left unprotected"
                );
            }
            AssignmentMode::Strict => {
                return Err(LedgerGuardError::EndorsementPolicyFailure {
                    key: id.to_string(),
                    reason: reason.clone(),
                });
            }
        }
    }
    Ok(assignment)
}

/// # Errors
///
/// `NotFound` if absent; `Serialization` if the stored bytes are not a
/// public asset.
pub fn read_public(ctx: &mut TxContext<'_>, id: &str) -> Result<PublicAsset> {
    validate_asset_id(id)?;
    let bytes = present(ctx.stub().get_state(id)?).ok_or_else(|| not_found(id))?;
    PublicAsset::from_bytes(&bytes)
}

/// Replace the payload, keeping id, owner org and kind
///
/// # Errors
///
/// `NotFound` if absent.
pub fn update_public(ctx: &mut TxContext<'_>, id: &str, value: &str) -> Result<PublicAsset> {
    let updated = read_public(ctx, id)?.with_payload(value);
    ctx.stub().put_state(id, updated.to_bytes()?)?;
    Ok(updated)
}

/// # Errors
///
/// `NotFound` if absent.
pub fn delete_public(ctx: &mut TxContext<'_>, id: &str) -> Result<()> {
    if !public_exists(ctx, id)? {
        return Err(not_found(id));
    }
    ctx.stub().delete_state(id)
}

/// Key-level policy guarding a public asset, `None` if it has none
///
/// # Errors
///
/// `NotFound` if the asset is absent; `InvalidInput` if the stored
/// parameter is malformed.
pub fn read_endorsement_policy(
    ctx: &mut TxContext<'_>,
    id: &str,
) -> Result<Option<KeyEndorsementPolicy>> {
    if !public_exists(ctx, id)? {
        return Err(not_found(id));
    }
    read_key_policy(ctx, id)
}
