//! Structured logging facility for LedgerGuard
//!
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! The transaction boundary (`invoke`) owns start/end/error events. Contract
//! operations and the reference substrate only emit `tracing::debug!` for
//! internal detail, and never log private values.
//!
//! # Usage
//!
//! ```rust
//! use ledgerguard_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};

use std::time::{Duration, Instant};

/// Milliseconds since `start` for the `duration_ms` field, saturating at
/// `u64::MAX`
pub fn elapsed_ms(start: Instant) -> u64 {
    duration_ms(start.elapsed())
}

fn duration_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
