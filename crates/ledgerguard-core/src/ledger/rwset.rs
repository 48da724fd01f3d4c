//! Read/write sets produced by transaction simulation

use std::collections::BTreeMap;
use std::fmt;

use ledgerguard_core_types::Sensitive;
use serde::{Deserialize, Serialize};

/// Height at which a key was last written
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version {
    pub block_num: u64,
    pub tx_num: u64,
}

impl Version {
    pub fn new(block_num: u64, tx_num: u64) -> Self {
        Self { block_num, tx_num }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.block_num, self.tx_num)
    }
}

/// A committed value together with its version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versioned<T> {
    pub value: T,
    pub version: Version,
}

impl<T> Versioned<T> {
    pub fn new(value: T, version: Version) -> Self {
        Self { value, version }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Versioned<U> {
        Versioned {
            value: f(self.value),
            version: self.version,
        }
    }
}

/// A private-collection entry: plaintext plus the hash committed publicly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateEntry {
    pub value: Sensitive<Vec<u8>>,
    pub hash: Vec<u8>,
}

impl PrivateEntry {
    pub fn new(value: Vec<u8>, hash: Vec<u8>) -> Self {
        Self {
            value: Sensitive::new(value),
            hash,
        }
    }
}

/// Address of something a transaction read
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StateKey {
    Public(String),
    /// Private entry; data and hash reads share one version
    Private { collection: String, key: String },
    ValidationParameter(String),
}

impl StateKey {
    /// The ledger key, without its namespace
    pub fn key(&self) -> &str {
        match self {
            StateKey::Public(key) | StateKey::ValidationParameter(key) => key,
            StateKey::Private { key, .. } => key,
        }
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateKey::Public(key) => write!(f, "{}", key),
            StateKey::Private { collection, key } => write!(f, "{}/{}", collection, key),
            StateKey::ValidationParameter(key) => write!(f, "{}#validation", key),
        }
    }
}

/// Versions observed during simulation; `None` means "read as absent"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadSet {
    reads: BTreeMap<StateKey, Option<Version>>,
}

impl ReadSet {
    /// Record a read; the first observation of a key wins
    pub fn record(&mut self, key: StateKey, version: Option<Version>) {
        self.reads.entry(key).or_insert(version);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StateKey, &Option<Version>)> {
        self.reads.iter()
    }

    pub fn len(&self) -> usize {
        self.reads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reads.is_empty()
    }
}

/// Buffered writes; `None` values are deletes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSet {
    pub public: BTreeMap<String, Option<Vec<u8>>>,
    pub private: BTreeMap<(String, String), Option<PrivateEntry>>,
    pub validation_parameters: BTreeMap<String, Vec<u8>>,
}

impl WriteSet {
    pub fn is_empty(&self) -> bool {
        self.public.is_empty() && self.private.is_empty() && self.validation_parameters.is_empty()
    }
}

/// Everything a simulated transaction produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxRwSet {
    pub reads: ReadSet,
    pub writes: WriteSet,
}

impl TxRwSet {
    /// True if committing would change nothing
    pub fn is_read_only(&self) -> bool {
        self.writes.is_empty()
    }
}
