//! Ledger substrate adapter
//!
//! `LedgerStub` is the whole surface the contract needs from the ledger: a
//! public keyed store, named private collections with substrate-computed
//! hashes, and per-key validation parameters. Anything that implements it
//! (the reference `Simulation`, a peer shim, a test double) can run the
//! contract.
//!
//! Absent keys read as `None`. Implementations may also return an empty
//! vector for an absent key; the contract treats both the same way.

use crate::errors::Result;

/// Transaction-scoped view of the ledger substrate
///
/// Reads take `&mut self` because a simulating substrate records a read set.
pub trait LedgerStub {
    /// Read a key from the globally replicated store
    fn get_state(&mut self, key: &str) -> Result<Option<Vec<u8>>>;

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<()>;

    fn delete_state(&mut self, key: &str) -> Result<()>;

    /// Read the plaintext of a private-collection entry
    ///
    /// Authorization to read a collection is the substrate's concern.
    fn get_private_data(&mut self, collection: &str, key: &str) -> Result<Option<Vec<u8>>>;

    /// Write a private-collection entry
    ///
    /// The substrate commits the entry's hash publicly as a side effect.
    fn put_private_data(&mut self, collection: &str, key: &str, value: Vec<u8>) -> Result<()>;

    fn delete_private_data(&mut self, collection: &str, key: &str) -> Result<()>;

    /// Read the publicly committed hash of a private-collection entry
    ///
    /// Never exposes the plaintext; callable without collection membership.
    fn get_private_data_hash(&mut self, collection: &str, key: &str) -> Result<Option<Vec<u8>>>;

    /// Attach a serialized key-level endorsement policy to `key`
    fn set_state_validation_parameter(&mut self, key: &str, policy: Vec<u8>) -> Result<()>;

    fn get_state_validation_parameter(&mut self, key: &str) -> Result<Option<Vec<u8>>>;
}

/// Treat `None` and a zero-length value as "absent"
pub(crate) fn present(value: Option<Vec<u8>>) -> Option<Vec<u8>> {
    value.filter(|v| !v.is_empty())
}
