use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Discriminator stored with every public record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    #[default]
    Asset,
}

/// A record on the globally replicated store
///
/// `owner_org` is taken from the creating caller and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicAsset {
    pub id: String,
    pub payload: String,
    pub owner_org: String,
    pub kind: AssetKind,
}

impl PublicAsset {
    pub fn new(id: impl Into<String>, payload: impl Into<String>, owner_org: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            payload: payload.into(),
            owner_org: owner_org.into(),
            kind: AssetKind::Asset,
        }
    }

    /// Copy of this record with a new payload; identity fields are kept
    pub fn with_payload(&self, payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            ..self.clone()
        }
    }

    /// # Errors
    ///
    /// Returns `Serialization` if JSON encoding fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// # Errors
    ///
    /// Returns `Serialization` if the stored bytes are not a public asset.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
