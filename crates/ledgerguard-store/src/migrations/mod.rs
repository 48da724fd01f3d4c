//! Migration framework
//!
//! Migrations are embedded, applied once each inside a transaction, and
//! verified against their recorded checksum on every later run.

mod checksums;
mod embedded;
mod runner;

pub use runner::{applied_migrations, apply_migrations};
