//! PartyId - Opaque party identifier
//!
//! Party names are free-form and case-sensitive. Equality is an exact
//! string match: "alice", "Alice" and "Alice " are three different parties.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use thiserror::Error;

/// Errors that can occur when creating a party identifier
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PartyError {
    #[error("Party name cannot be empty")]
    Empty,
}

/// Identifier of a person or entity taking part in the ledger.
///
/// # Examples
/// ```
/// use clearledger_core::PartyId;
///
/// let alice = PartyId::new("Alice").unwrap();
/// assert_eq!(alice.as_str(), "Alice");
/// assert_ne!(alice, PartyId::new("alice").unwrap());
///
/// // Blank names are rejected
/// assert!(PartyId::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PartyId(String);

impl PartyId {
    /// Create a party identifier, keeping the name byte-for-byte.
    ///
    /// A name made only of whitespace counts as empty.
    pub fn new(name: impl Into<String>) -> Result<Self, PartyError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PartyError::Empty);
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for PartyId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PartyId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PartyId {
    type Error = PartyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<&str> for PartyId {
    type Error = PartyError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<PartyId> for String {
    fn from(p: PartyId) -> Self {
        p.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_sensitive() {
        let a = PartyId::new("Bob").unwrap();
        let b = PartyId::new("bob").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_no_trimming() {
        let padded = PartyId::new(" Bob").unwrap();
        assert_eq!(padded.as_str(), " Bob");
        assert_ne!(padded, PartyId::new("Bob").unwrap());
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(PartyId::new(""), Err(PartyError::Empty));
        assert_eq!(PartyId::new("\t \n"), Err(PartyError::Empty));
    }

    #[test]
    fn test_serde_transparent_string() {
        let p = PartyId::new("Zoë").unwrap();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "\"Zoë\"");
        let parsed: PartyId = serde_json::from_str(&json).unwrap();
        assert_eq!(p, parsed);
    }

    #[test]
    fn test_serde_rejects_blank() {
        let parsed: Result<PartyId, _> = serde_json::from_str("\"  \"");
        assert!(parsed.is_err());
    }
}
