//! Private-data digests and the digest verifier
//!
//! ## Encoding contract
//!
//! - The substrate commits `algorithm(bytes)` for every private-collection
//!   write, where `bytes` are exactly the bytes passed to `put_private_data`.
//! - The recorded hash is raw digest bytes. Its text form is lowercase hex.
//! - The verifier rebuilds candidate bytes per `CandidateEncoding`, hashes
//!   them with the same `DigestAlgorithm`, and compares hex strings
//!   (case-insensitive).
//!
//! The reference substrate computes its hashes through `DigestAlgorithm`, so
//! changing the algorithm here changes both sides together. A different
//! substrate must use the same function and byte-to-hex convention, or every
//! verification will fail.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::Result;
use crate::model::PrivateRecord;

/// Hash function the substrate uses for private-data commitments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DigestAlgorithm {
    #[default]
    Sha256,
}

impl DigestAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha256 => "sha-256",
        }
    }

    /// Raw digest bytes
    pub fn digest(&self, bytes: &[u8]) -> Vec<u8> {
        match self {
            DigestAlgorithm::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(bytes);
                hasher.finalize().to_vec()
            }
        }
    }

    /// Lowercase hex digest
    pub fn hex_digest(&self, bytes: &[u8]) -> String {
        hex::encode(self.digest(bytes))
    }
}

/// How a plaintext candidate is turned into the bytes that get hashed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateEncoding {
    /// Wrap the candidate as a private record, `{"privateValue":"<candidate>"}`
    ///
    /// Matches what the confidential store writes, so the candidate is just
    /// the secret itself.
    #[default]
    PrivateRecord,
    /// Hash the candidate bytes unchanged; the caller supplies the full
    /// serialized record
    Raw,
}

/// Compares a plaintext candidate against a substrate-recorded digest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestVerifier {
    pub algorithm: DigestAlgorithm,
    pub encoding: CandidateEncoding,
}

impl DigestVerifier {
    pub fn new(algorithm: DigestAlgorithm, encoding: CandidateEncoding) -> Self {
        Self {
            algorithm,
            encoding,
        }
    }

    /// Bytes the substrate would have hashed if `candidate` were the secret
    ///
    /// # Errors
    ///
    /// Under `PrivateRecord` encoding, `InvalidInput` for a non-UTF-8
    /// candidate; `Serialization` if the record cannot be encoded.
    pub fn candidate_bytes(&self, candidate: &[u8]) -> Result<Vec<u8>> {
        match self.encoding {
            CandidateEncoding::Raw => Ok(candidate.to_vec()),
            CandidateEncoding::PrivateRecord => {
                PrivateRecord::from_secret_bytes(candidate)?.to_bytes()
            }
        }
    }

    /// Hex digest of the encoded candidate
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the private record cannot be encoded.
    pub fn candidate_hash(&self, candidate: &[u8]) -> Result<String> {
        Ok(self.algorithm.hex_digest(&self.candidate_bytes(candidate)?))
    }

    /// True iff the candidate hashes to the recorded digest bytes
    ///
    /// Pure comparison; callers handle the "no digest" case before calling.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the private record cannot be encoded.
    pub fn matches(&self, candidate: &[u8], recorded: &[u8]) -> Result<bool> {
        let candidate_hash = self.candidate_hash(candidate)?;
        let recorded_hash = hex::encode(recorded);
        Ok(candidate_hash.eq_ignore_ascii_case(&recorded_hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            DigestAlgorithm::Sha256.hex_digest(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hex_digest_is_lowercase_and_64_chars() {
        let h = DigestAlgorithm::Sha256.hex_digest(b"42");
        assert_eq!(h.len(), 64);
        assert_eq!(h, h.to_lowercase());
    }

    #[test]
    fn test_private_record_encoding_wraps_candidate() {
        let verifier = DigestVerifier::default();
        let bytes = verifier.candidate_bytes(b"42").unwrap();
        assert_eq!(bytes, br#"{"privateValue":"42"}"#.to_vec());
    }

    #[test]
    fn test_non_utf8_candidates_are_rejected_not_folded() {
        let verifier = DigestVerifier::default();
        // what a lossy decode of [0xff] would have stored
        let replacement = PrivateRecord::new("\u{fffd}").to_bytes().unwrap();
        let recorded = DigestAlgorithm::Sha256.digest(&replacement);
        assert!(matches!(
            verifier.matches(&[0xfe], &recorded),
            Err(crate::errors::LedgerGuardError::InvalidInput { .. })
        ));

        // raw encoding hashes bytes as given
        let raw = DigestVerifier::new(DigestAlgorithm::Sha256, CandidateEncoding::Raw);
        assert_eq!(raw.candidate_bytes(&[0xfe]).unwrap(), vec![0xfe]);
    }

    #[test]
    fn test_raw_encoding_is_identity() {
        let verifier = DigestVerifier::new(DigestAlgorithm::Sha256, CandidateEncoding::Raw);
        assert_eq!(verifier.candidate_bytes(b"42").unwrap(), b"42".to_vec());
    }

    #[test]
    fn test_matches_recorded_digest() {
        let verifier = DigestVerifier::default();
        let recorded = DigestAlgorithm::Sha256.digest(br#"{"privateValue":"42"}"#);
        assert!(verifier.matches(b"42", &recorded).unwrap());
        assert!(!verifier.matches(b"43", &recorded).unwrap());
    }

    #[test]
    fn test_raw_matches_full_record_only() {
        let verifier = DigestVerifier::new(DigestAlgorithm::Sha256, CandidateEncoding::Raw);
        let recorded = DigestAlgorithm::Sha256.digest(br#"{"privateValue":"42"}"#);
        assert!(!verifier.matches(b"42", &recorded).unwrap());
        assert!(verifier
            .matches(br#"{"privateValue":"42"}"#, &recorded)
            .unwrap());
    }

    #[test]
    fn test_verifier_deserializes_with_defaults() {
        let verifier: DigestVerifier = serde_json::from_str("{}").unwrap();
        assert_eq!(verifier, DigestVerifier::default());

        let raw: DigestVerifier = serde_json::from_str(r#"{"encoding":"raw"}"#).unwrap();
        assert_eq!(raw.encoding, CandidateEncoding::Raw);
        assert_eq!(raw.algorithm, DigestAlgorithm::Sha256);
    }
}
