//! Transaction surface
//!
//! One `Command` variant per contract transaction. `invoke()` dispatches a
//! command against a transaction context and returns a `CommandResult`.

use ledgerguard_core_types::Sensitive;
use serde::Serialize;

use crate::endorsement::{KeyEndorsementPolicy, PolicyAssignment};
use crate::model::{AssetLinkage, PrivateRecord, PublicAsset};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Does a confidential record exist for the caller's collection
    AssetExists { asset_id: String },

    /// Secret travels in the transient map, never as an argument
    CreateConfidential { asset_id: String },

    ReadConfidential { asset_id: String },

    UpdateConfidential { asset_id: String },

    DeleteConfidential { asset_id: String },

    /// Compare a plaintext candidate with `msp_id`'s committed hash
    Verify {
        msp_id: String,
        asset_id: String,
        candidate: Sensitive<Vec<u8>>,
    },

    PublicExists { asset_id: String },

    CreatePublic { asset_id: String, payload: String },

    ReadPublic { asset_id: String },

    /// Replace the payload of a public asset
    UpdatePublic { asset_id: String, value: String },

    DeletePublic { asset_id: String },

    ReadEndorsementPolicy { asset_id: String },

    AssetLinkage { asset_id: String },
}

impl Command {
    /// Transaction name as exposed to clients
    pub fn name(&self) -> &'static str {
        match self {
            Command::AssetExists { .. } => "assetExists",
            Command::CreateConfidential { .. } => "createConfidential",
            Command::ReadConfidential { .. } => "readConfidential",
            Command::UpdateConfidential { .. } => "updateConfidential",
            Command::DeleteConfidential { .. } => "deleteConfidential",
            Command::Verify { .. } => "verify",
            Command::PublicExists { .. } => "publicExists",
            Command::CreatePublic { .. } => "createPublic",
            Command::ReadPublic { .. } => "readPublic",
            Command::UpdatePublic { .. } => "updatePublic",
            Command::DeletePublic { .. } => "deletePublic",
            Command::ReadEndorsementPolicy { .. } => "readEndorsementPolicy",
            Command::AssetLinkage { .. } => "assetLinkage",
        }
    }

    pub fn asset_id(&self) -> &str {
        match self {
            Command::AssetExists { asset_id }
            | Command::CreateConfidential { asset_id }
            | Command::ReadConfidential { asset_id }
            | Command::UpdateConfidential { asset_id }
            | Command::DeleteConfidential { asset_id }
            | Command::Verify { asset_id, .. }
            | Command::PublicExists { asset_id }
            | Command::CreatePublic { asset_id, .. }
            | Command::ReadPublic { asset_id }
            | Command::UpdatePublic { asset_id, .. }
            | Command::DeletePublic { asset_id }
            | Command::ReadEndorsementPolicy { asset_id }
            | Command::AssetLinkage { asset_id } => asset_id,
        }
    }

    /// Queries are evaluated, never committed
    pub fn is_read_only(&self) -> bool {
        matches!(
            self,
            Command::AssetExists { .. }
                | Command::ReadConfidential { .. }
                | Command::Verify { .. }
                | Command::PublicExists { .. }
                | Command::ReadPublic { .. }
                | Command::ReadEndorsementPolicy { .. }
                | Command::AssetLinkage { .. }
        )
    }
}

/// Output of one transaction
///
/// Serializes to the bare payload: a bool, a record, or `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CommandResult {
    Exists(bool),
    Verified(bool),
    PrivateRecord(PrivateRecord),
    PublicAsset(PublicAsset),
    PolicyAssignment(PolicyAssignment),
    EndorsementPolicy(Option<KeyEndorsementPolicy>),
    Linkage(AssetLinkage),
    Done,
}
