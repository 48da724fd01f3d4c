//! LedgerGuard store: durable SQLite world state for the reference ledger
//!
//! Provides:
//! - SQLite schema with a checksummed migrations framework
//! - `SqliteWorldState`, a `WorldState` backend whose commits survive restarts

pub mod db;
pub mod errors;
pub mod migrations;
pub mod world_state;

pub use errors::Result;
pub use world_state::SqliteWorldState;
