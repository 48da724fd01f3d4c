pub mod confidential_ops;
pub mod linkage_ops;
pub mod public_ops;
pub mod verification;

pub use confidential_ops::{
    confidential_exists, create_confidential, delete_confidential, read_confidential,
    update_confidential,
};
pub use linkage_ops::asset_linkage;
pub use public_ops::{
    create_public, delete_public, public_exists, read_endorsement_policy, read_public,
    update_public,
};
pub use verification::verify;

use crate::errors::{LedgerGuardError, Result};

/// Reject ids the substrate could not key on
///
/// # Errors
///
/// Returns `InvalidInput` for an empty id.
pub(crate) fn validate_asset_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(LedgerGuardError::InvalidInput {
            reason: "asset id must not be empty".to_string(),
        });
    }
    Ok(())
}
