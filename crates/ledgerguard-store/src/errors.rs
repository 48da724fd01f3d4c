//! Error handling for ledgerguard-store
//!
//! The store works in `ExError` directly; `into_world_error` folds it back
//! into the domain error at the `WorldState` boundary.

use ledgerguard_core::errors::{ExError, ExErrorKind, LedgerGuardError};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// An applied migration whose SQL no longer matches what was recorded
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// A stored row that cannot be decoded back into ledger state
pub fn corrupt_row(table: &str, reason: impl std::fmt::Display) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite_decode")
        .with_message(format!("Corrupt row in {}: {}", table, reason))
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Surface a store failure through the `WorldState` error type
pub fn into_world_error(err: ExError) -> LedgerGuardError {
    LedgerGuardError::Persistence {
        message: err.to_string(),
    }
}
