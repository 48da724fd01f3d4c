//! Core types shared across LedgerGuard facilities
//!
//! This crate provides foundational types used by the error handling and
//! logging facilities, and by the contract layer:
//!
//! - **Correlation types**: TxId
//! - **Sensitive data**: Sensitive<T> marker for secrets that must never be logged
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::TxId;
pub use sensitive::Sensitive;
