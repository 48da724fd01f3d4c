use super::{confidential_exists, public_exists};
use crate::config::ContractConfig;
use crate::context::TxContext;
use crate::errors::Result;
use crate::model::AssetLinkage;

/// Report which of the two stores hold `id`, as seen by the caller
///
/// # Errors
///
/// `InvalidInput` for an empty id; substrate errors propagate.
pub fn asset_linkage(
    ctx: &mut TxContext<'_>,
    config: &ContractConfig,
    id: &str,
) -> Result<AssetLinkage> {
    let public = public_exists(ctx, id)?;
    let confidential = confidential_exists(ctx, config, id)?;
    Ok(AssetLinkage {
        asset_id: id.to_string(),
        public,
        confidential,
        collection: config.collection.collection_for(ctx.caller_org()),
    })
}
