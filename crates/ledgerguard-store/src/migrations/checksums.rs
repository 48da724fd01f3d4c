//! Migration checksums
//!
//! SHA-256 of the migration SQL, recorded when applied and re-checked on
//! every open.

use sha2::{Digest, Sha256};

pub fn compute_checksum(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}
