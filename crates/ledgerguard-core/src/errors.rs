use thiserror::Error;

/// Result type alias using LedgerGuardError
pub type Result<T> = std::result::Result<T, LedgerGuardError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Stable classification of every failure a transaction can surface. Each
/// kind maps to an `ERR_*` code that clients match on instead of messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Contract preconditions
    InvalidInput,
    NotFound,
    AlreadyExists,
    MissingTransientField,
    NoDigest,

    // Endorsement
    /// Strict-mode failure while attaching a key-level endorsement policy
    EndorsementPolicyFailure,
    /// Commit-time rejection: endorsing orgs do not satisfy the key's policy
    EndorsementPolicyNotSatisfied,

    // Commit-time validation
    MvccConflict,

    // Configuration
    InvalidConfig,

    // Integration/IO
    Substrate,
    Serialization,
    Persistence,
    Io,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::MissingTransientField => "ERR_MISSING_TRANSIENT_FIELD",
            ExErrorKind::NoDigest => "ERR_NO_DIGEST",
            ExErrorKind::EndorsementPolicyFailure => "ERR_ENDORSEMENT_POLICY_FAILURE",
            ExErrorKind::EndorsementPolicyNotSatisfied => "ERR_ENDORSEMENT_POLICY_NOT_SATISFIED",
            ExErrorKind::MvccConflict => "ERR_MVCC_CONFLICT",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Substrate => "ERR_SUBSTRATE",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification plus whatever transaction context was known
/// when the failure was raised.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    asset_id: Option<String>,
    collection: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            asset_id: None,
            collection: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add asset id context
    pub fn with_asset_id(mut self, id: impl Into<String>) -> Self {
        self.asset_id = Some(id.into());
        self
    }

    /// Add private collection context
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn asset_id(&self) -> Option<&str> {
        self.asset_id.as_deref()
    }

    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(asset_id) = &self.asset_id {
            write!(f, " (asset_id: {})", asset_id)?;
        }
        if let Some(collection) = &self.collection {
            write!(f, " (collection: {})", collection)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Which of the two independently keyed stores a record lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Confidential,
    Public,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Confidential => write!(f, "confidential asset"),
            RecordKind::Public => write!(f, "public asset"),
        }
    }
}

/// Error taxonomy for contract and substrate operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerGuardError {
    // ===== Contract preconditions =====
    /// Create on an id that is already present
    #[error("The {kind} {asset_id} already exists")]
    AlreadyExists { kind: RecordKind, asset_id: String },

    /// Read/update/delete on an id that is absent
    #[error("The {kind} {asset_id} does not exist")]
    NotFound { kind: RecordKind, asset_id: String },

    /// Confidential create/update without the secret in transient data
    #[error("The {field} key was not specified in transient data. Please try again.")]
    MissingTransientField { field: String },

    /// Verify against a key with no recorded private data hash
    #[error("No private data hash with the key: {asset_id} in collection {collection}")]
    NoDigest {
        collection: String,
        asset_id: String,
    },

    /// Caller input rejected before touching the ledger
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    // ===== Endorsement =====
    /// Strict mode: attaching the key-level policy failed
    #[error("Failed to set endorsement policy on key {key}: {reason}")]
    EndorsementPolicyFailure { key: String, reason: String },

    /// Commit-time: endorsing orgs do not satisfy the key-level policy
    #[error("Endorsement policy for key {key} not satisfied: requires {required:?}, endorsed by {endorsers:?}")]
    EndorsementPolicyNotSatisfied {
        key: String,
        required: Vec<String>,
        endorsers: Vec<String>,
    },

    // ===== Commit-time validation =====
    /// A key read during simulation changed before commit
    #[error("MVCC read conflict on key {key}")]
    MvccConflict { key: String },

    // ===== Configuration =====
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    // ===== Generic Errors =====
    /// A substrate call failed
    #[error("Substrate error in {op}: {message}")]
    Substrate { op: String, message: String },

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Durable world-state backend failure
    #[error("Persistence error: {message}")]
    Persistence { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Conversion from LedgerGuardError to ExError
impl From<LedgerGuardError> for ExError {
    fn from(err: LedgerGuardError) -> Self {
        match err {
            LedgerGuardError::AlreadyExists { kind, asset_id } => {
                ExError::new(ExErrorKind::AlreadyExists)
                    .with_asset_id(asset_id)
                    .with_message(format!("{} already exists", kind))
            }

            LedgerGuardError::NotFound { kind, asset_id } => ExError::new(ExErrorKind::NotFound)
                .with_asset_id(asset_id)
                .with_message(format!("{} does not exist", kind)),

            LedgerGuardError::MissingTransientField { field } => {
                ExError::new(ExErrorKind::MissingTransientField)
                    .with_message(format!("transient field '{}' is required", field))
            }

            LedgerGuardError::NoDigest {
                collection,
                asset_id,
            } => ExError::new(ExErrorKind::NoDigest)
                .with_asset_id(asset_id)
                .with_collection(collection)
                .with_message("No private data hash recorded"),

            LedgerGuardError::InvalidInput { reason } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(reason)
            }

            LedgerGuardError::EndorsementPolicyFailure { key, reason } => {
                ExError::new(ExErrorKind::EndorsementPolicyFailure)
                    .with_asset_id(key)
                    .with_op("assign_endorsement")
                    .with_message(reason)
            }

            LedgerGuardError::EndorsementPolicyNotSatisfied {
                key,
                required,
                endorsers,
            } => ExError::new(ExErrorKind::EndorsementPolicyNotSatisfied)
                .with_asset_id(key)
                .with_op("validate")
                .with_message(format!(
                    "requires {:?}, endorsed by {:?}",
                    required, endorsers
                )),

            LedgerGuardError::MvccConflict { key } => ExError::new(ExErrorKind::MvccConflict)
                .with_asset_id(key)
                .with_op("validate")
                .with_message("read version changed before commit"),

            LedgerGuardError::InvalidConfig { reason } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(reason)
            }

            LedgerGuardError::Substrate { op, message } => ExError::new(ExErrorKind::Substrate)
                .with_op(op)
                .with_message(message),

            LedgerGuardError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            LedgerGuardError::Persistence { message } => {
                ExError::new(ExErrorKind::Persistence).with_message(message)
            }

            LedgerGuardError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to LedgerGuardError
impl From<serde_json::Error> for LedgerGuardError {
    fn from(err: serde_json::Error) -> Self {
        LedgerGuardError::Serialization {
            message: err.to_string(),
        }
    }
}
