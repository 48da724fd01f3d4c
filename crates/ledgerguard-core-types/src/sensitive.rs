//! Sensitive data marker for automatic redaction
//!
//! Private-collection values and transient inputs travel through the
//! contract wrapped in `Sensitive<T>`, so a stray `{:?}` or a tracing field
//! can never leak them.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Wrapper for secret data that redacts itself in Debug and Display
///
/// Serialization is transparent: the wrapper only guards formatting, the
/// private collection still receives the real bytes.
///
/// # Example
///
/// ```
/// use ledgerguard_core_types::Sensitive;
///
/// let secret = Sensitive::new("42".to_string());
/// assert_eq!(format!("{:?}", secret), "***REDACTED***");
/// assert_eq!(secret.expose(), "42");
/// ```
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the underlying value
    ///
    /// Only the private-collection write path and authorized reads need this.
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }

    /// Transform the secret without exposing it to formatting
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Sensitive<U> {
        Sensitive(f(self.0))
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: PartialEq> PartialEq for Sensitive<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T: Eq> Eq for Sensitive<T> {}

impl<T: Serialize> Serialize for Sensitive<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Sensitive<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Sensitive)
    }
}
