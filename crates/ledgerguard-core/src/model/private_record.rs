use ledgerguard_core_types::Sensitive;
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerGuardError, Result};

/// The secret half of a confidential asset
///
/// Lives only in a private collection. Its canonical bytes are the compact
/// JSON `{"privateValue":"..."}`; the substrate hashes exactly those bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateRecord {
    #[serde(rename = "privateValue")]
    private_value: Sensitive<String>,
}

impl PrivateRecord {
    pub fn new(private_value: impl Into<String>) -> Self {
        Self {
            private_value: Sensitive::new(private_value.into()),
        }
    }

    /// Record for a secret received as raw bytes
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` unless the bytes are valid UTF-8. Lossy decoding
    /// would map distinct secrets onto the same record and the same hash.
    pub fn from_secret_bytes(secret: &[u8]) -> Result<Self> {
        let value = String::from_utf8(secret.to_vec()).map_err(|e| {
            LedgerGuardError::InvalidInput {
                reason: format!(
                    "private value must be valid UTF-8 (invalid byte at index {})",
                    e.utf8_error().valid_up_to()
                ),
            }
        })?;
        Ok(Self::new(value))
    }

    /// The stored secret
    pub fn private_value(&self) -> &str {
        self.private_value.expose()
    }

    /// Canonical bytes written to the private collection
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if JSON encoding fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// # Errors
    ///
    /// Returns `Serialization` if the bytes are not a private record.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
