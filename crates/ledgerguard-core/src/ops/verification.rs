use super::validate_asset_id;
use crate::config::{implicit_collection, ContractConfig};
use crate::context::TxContext;
use crate::errors::{LedgerGuardError, Result};
use crate::stub::present;

/// Check a plaintext candidate against the hash committed for `org`'s record
///
/// Always reads `org`'s implicit collection, whatever collection strategy
/// the store writes with. Reads only the public hash, so any caller holding the candidate can run
/// it; the caller does not need membership in `org`'s collection. Never
/// writes.
///
/// # Errors
///
/// `NoDigest` if `org`'s collection has no hash for `id`; `InvalidInput`
/// for a non-UTF-8 candidate under `PrivateRecord` encoding.
pub fn verify(
    ctx: &mut TxContext<'_>,
    config: &ContractConfig,
    org: &str,
    id: &str,
    candidate: &[u8],
) -> Result<bool> {
    validate_asset_id(id)?;
    let collection = implicit_collection(org);
    let recorded = present(ctx.stub().get_private_data_hash(&collection, id)?).ok_or_else(|| {
        LedgerGuardError::NoDigest {
            collection: collection.clone(),
            asset_id: id.to_string(),
        }
    })?;

    let matched = config.verifier.matches(candidate, &recorded)?;
    tracing::debug!(asset_id = id, collection = %collection, matched, "digest compared");
    Ok(matched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ClientIdentity;
    use crate::ledger::{MemoryWorldState, Simulation};

    #[test]
    fn test_missing_hash_is_no_digest() {
        let world = MemoryWorldState::new();
        let mut sim = Simulation::new(&world);
        let mut ctx = TxContext::new(&mut sim, ClientIdentity::new("Org2MSP"));
        let err = verify(&mut ctx, &ContractConfig::default(), "Org1MSP", "asset1", b"42")
            .unwrap_err();
        assert_eq!(
            err,
            LedgerGuardError::NoDigest {
                collection: "_implicit_org_Org1MSP".to_string(),
                asset_id: "asset1".to_string(),
            }
        );
    }
}
