//! Confidential record store
//!
//! Private records live in a private collection resolved per caller by the
//! configured `CollectionStrategy`. Existence is judged by the publicly
//! committed hash, which is readable without collection membership.
//! Secrets arrive only through the transient map.

use super::validate_asset_id;
use crate::config::ContractConfig;
use crate::context::TxContext;
use crate::errors::{LedgerGuardError, RecordKind, Result};
use crate::model::PrivateRecord;
use crate::stub::present;

fn caller_collection(ctx: &TxContext<'_>, config: &ContractConfig) -> String {
    config.collection.collection_for(ctx.caller_org())
}

fn not_found(id: &str) -> LedgerGuardError {
    LedgerGuardError::NotFound {
        kind: RecordKind::Confidential,
        asset_id: id.to_string(),
    }
}

/// Build the private record from the configured transient field
fn record_from_transient(ctx: &TxContext<'_>, config: &ContractConfig) -> Result<PrivateRecord> {
    let secret = ctx.transient().get(&config.transient_field).ok_or_else(|| {
        LedgerGuardError::MissingTransientField {
            field: config.transient_field.clone(),
        }
    })?;
    PrivateRecord::from_secret_bytes(secret.expose())
}

/// True iff a non-empty private data hash exists for `id`
///
/// # Errors
///
/// `InvalidInput` for an empty id; substrate errors propagate.
pub fn confidential_exists(
    ctx: &mut TxContext<'_>,
    config: &ContractConfig,
    id: &str,
) -> Result<bool> {
    validate_asset_id(id)?;
    let collection = caller_collection(ctx, config);
    let hash = present(ctx.stub().get_private_data_hash(&collection, id)?);
    Ok(hash.is_some())
}

/// Create a confidential asset from the transient secret
///
/// # Arguments
/// * `ctx` - Transaction context; the secret is read from its transient map
/// * `config` - Supplies the collection strategy and transient field name
/// * `id` - Caller-chosen asset id
///
/// # Errors
/// * `AlreadyExists` - A private record with this id is already committed
/// * `MissingTransientField` - The transient map lacks the secret; nothing is written
pub fn create_confidential(
    ctx: &mut TxContext<'_>,
    config: &ContractConfig,
    id: &str,
) -> Result<()> {
    if confidential_exists(ctx, config, id)? {
        return Err(LedgerGuardError::AlreadyExists {
            kind: RecordKind::Confidential,
            asset_id: id.to_string(),
        });
    }

    let record = record_from_transient(ctx, config)?;
    let collection = caller_collection(ctx, config);
    ctx.stub()
        .put_private_data(&collection, id, record.to_bytes()?)?;

    tracing::debug!(asset_id = id, collection = %collection, "private record written");
    Ok(())
}

/// # Errors
///
/// `NotFound` if no record exists, or if the caller cannot read the
/// collection's plaintext.
pub fn read_confidential(
    ctx: &mut TxContext<'_>,
    config: &ContractConfig,
    id: &str,
) -> Result<PrivateRecord> {
    if !confidential_exists(ctx, config, id)? {
        return Err(not_found(id));
    }
    let collection = caller_collection(ctx, config);
    let bytes =
        present(ctx.stub().get_private_data(&collection, id)?).ok_or_else(|| not_found(id))?;
    PrivateRecord::from_bytes(&bytes)
}

/// Replace the stored secret; the old record is not merged
///
/// # Errors
///
/// `NotFound` if absent, `MissingTransientField` if no secret was sent.
pub fn update_confidential(
    ctx: &mut TxContext<'_>,
    config: &ContractConfig,
    id: &str,
) -> Result<()> {
    if !confidential_exists(ctx, config, id)? {
        return Err(not_found(id));
    }

    let record = record_from_transient(ctx, config)?;
    let collection = caller_collection(ctx, config);
    ctx.stub()
        .put_private_data(&collection, id, record.to_bytes()?)?;
    Ok(())
}

/// Remove the private record; its public hash goes with it
///
/// # Errors
///
/// `NotFound` if absent.
pub fn delete_confidential(
    ctx: &mut TxContext<'_>,
    config: &ContractConfig,
    id: &str,
) -> Result<()> {
    if !confidential_exists(ctx, config, id)? {
        return Err(not_found(id));
    }
    let collection = caller_collection(ctx, config);
    ctx.stub().delete_private_data(&collection, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ClientIdentity, TransientMap};
    use crate::ledger::{MemoryWorldState, Simulation, WorldState};

    #[test]
    fn test_create_buffers_record_in_caller_collection() {
        let world = MemoryWorldState::new();
        let mut sim = Simulation::new(&world);
        {
            let mut ctx = TxContext::new(&mut sim, ClientIdentity::new("Org1MSP"))
                .with_transient(TransientMap::new().with("privateValue", "42"));
            create_confidential(&mut ctx, &ContractConfig::default(), "asset1").unwrap();
        }

        let rwset = sim.into_rwset();
        let key = ("_implicit_org_Org1MSP".to_string(), "asset1".to_string());
        let entry = rwset.writes.private[&key].clone().unwrap();
        assert_eq!(entry.value.expose(), br#"{"privateValue":"42"}"#);
    }

    #[test]
    fn test_missing_transient_writes_nothing() {
        let world = MemoryWorldState::new();
        let mut sim = Simulation::new(&world);
        {
            let mut ctx = TxContext::new(&mut sim, ClientIdentity::new("Org1MSP"));
            let err =
                create_confidential(&mut ctx, &ContractConfig::default(), "asset1").unwrap_err();
            assert_eq!(
                err,
                LedgerGuardError::MissingTransientField {
                    field: "privateValue".to_string()
                }
            );
        }
        assert!(sim.rwset().writes.is_empty());
        assert!(world.private("_implicit_org_Org1MSP", "asset1").unwrap().is_none());
    }

    #[test]
    fn test_empty_id_rejected_before_substrate() {
        let world = MemoryWorldState::new();
        let mut sim = Simulation::new(&world);
        {
            let mut ctx = TxContext::new(&mut sim, ClientIdentity::new("Org1MSP"));
            let err = confidential_exists(&mut ctx, &ContractConfig::default(), "").unwrap_err();
            assert!(matches!(err, LedgerGuardError::InvalidInput { .. }));
        }
        assert!(sim.rwset().reads.is_empty());
    }
}
