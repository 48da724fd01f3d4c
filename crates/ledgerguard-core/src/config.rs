//! Contract configuration
//!
//! Loaded from TOML. Every field has a default, so an empty file (or no file)
//! yields `ContractConfig::default()`.
//!
//! ```toml
//! transient_field = "privateValue"
//! assignment_mode = "strict"
//!
//! [collection]
//! strategy = "named"
//! name = "asset"
//!
//! [verifier]
//! algorithm = "sha256"
//! encoding = "private_record"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::digest::DigestVerifier;
use crate::errors::{LedgerGuardError, Result};

/// Prefix of the per-organization implicit private collection
pub const IMPLICIT_COLLECTION_PREFIX: &str = "_implicit_org_";

/// Default transient field carrying the confidential secret
pub const DEFAULT_TRANSIENT_FIELD: &str = "privateValue";

/// Implicit private collection owned by `org`
pub fn implicit_collection(org: &str) -> String {
    format!("{}{}", IMPLICIT_COLLECTION_PREFIX, org)
}

/// Where the confidential store keeps private records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum CollectionStrategy {
    /// `_implicit_org_<callerOrg>`, the collection the verifier reads
    #[default]
    ImplicitOrg,
    /// One fixed collection for every caller
    Named { name: String },
}

impl CollectionStrategy {
    /// Collection name for a caller in `org`
    pub fn collection_for(&self, org: &str) -> String {
        match self {
            CollectionStrategy::ImplicitOrg => implicit_collection(org),
            CollectionStrategy::Named { name } => name.clone(),
        }
    }
}

/// Handling of a failed post-create endorsement policy assignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentMode {
    /// Warn and keep the record; the failure is reported in the result
    #[default]
    BestEffort,
    /// Fail the transaction so the record write is discarded too
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    pub collection: CollectionStrategy,
    pub assignment_mode: AssignmentMode,
    pub verifier: DigestVerifier,
    pub transient_field: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            collection: CollectionStrategy::default(),
            assignment_mode: AssignmentMode::default(),
            verifier: DigestVerifier::default(),
            transient_field: DEFAULT_TRANSIENT_FIELD.to_string(),
        }
    }
}

impl ContractConfig {
    pub fn with_collection(mut self, collection: CollectionStrategy) -> Self {
        self.collection = collection;
        self
    }

    pub fn with_assignment_mode(mut self, mode: AssignmentMode) -> Self {
        self.assignment_mode = mode;
        self
    }

    pub fn with_verifier(mut self, verifier: DigestVerifier) -> Self {
        self.verifier = verifier;
        self
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` on a syntax error, an unknown variant, an
    /// empty transient field or an empty named collection.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ContractConfig =
            toml::from_str(text).map_err(|e| LedgerGuardError::InvalidConfig {
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `InvalidConfig` if the file cannot be read or parsed.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| LedgerGuardError::InvalidConfig {
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<()> {
        if self.transient_field.is_empty() {
            return Err(LedgerGuardError::InvalidConfig {
                reason: "transient_field must not be empty".to_string(),
            });
        }
        if let CollectionStrategy::Named { name } = &self.collection {
            if name.is_empty() {
                return Err(LedgerGuardError::InvalidConfig {
                    reason: "named collection must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}
