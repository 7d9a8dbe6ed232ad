//! Participant identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An authenticated participant: a voter or the chairperson.
///
/// The engine never inspects the contents; the execution environment that
/// authenticates callers decides what the string holds (an account address,
/// a key fingerprint, ...). Ordering is lexicographic so voter maps iterate
/// and encode deterministically.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Principal {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Principal {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
