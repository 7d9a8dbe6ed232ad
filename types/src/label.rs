//! Fixed-size proposal labels.

use crate::error::LabelError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte opaque proposal label, supplied by the chairperson at construction.
///
/// Text labels are stored left-aligned and zero-padded; numeric labels are
/// stored big-endian and right-aligned, so `ProposalName::from(1007u64)`
/// ends in `0x03 0xef`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProposalName([u8; 32]);

impl ProposalName {
    pub const LEN: usize = 32;

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Build a label from UTF-8 text, zero-padding on the right.
    pub fn from_label(label: &str) -> Result<Self, LabelError> {
        let raw = label.as_bytes();
        if raw.len() > Self::LEN {
            return Err(LabelError::TooLong {
                len: raw.len(),
                max: Self::LEN,
            });
        }
        let mut bytes = [0u8; 32];
        bytes[..raw.len()].copy_from_slice(raw);
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The label as text, if it is valid UTF-8 once trailing padding is removed.
    pub fn as_text(&self) -> Option<&str> {
        let end = self
            .0
            .iter()
            .rposition(|&b| b != 0)
            .map_or(0, |pos| pos + 1);
        std::str::from_utf8(&self.0[..end]).ok()
    }

    /// Interpret the label as a big-endian integer, if it fits in a `u64`.
    pub fn as_u64(&self) -> Option<u64> {
        let (high, low) = self.0.split_at(Self::LEN - 8);
        if high.iter().any(|&b| b != 0) {
            return None;
        }
        let mut buf = [0u8; 8];
        buf.copy_from_slice(low);
        Some(u64::from_be_bytes(buf))
    }
}

impl From<u64> for ProposalName {
    fn from(value: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[Self::LEN - 8..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }
}

impl TryFrom<&str> for ProposalName {
    type Error = LabelError;

    fn try_from(label: &str) -> Result<Self, Self::Error> {
        Self::from_label(label)
    }
}

impl fmt::Debug for ProposalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProposalName({})", self)
    }
}

impl fmt::Display for ProposalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_text() {
            Some(text) if !text.is_empty() && !text.chars().any(char::is_control) => {
                write!(f, "{}", text)
            }
            _ => write!(f, "0x{}", hex::encode(&self.0)),
        }
    }
}

// Inline hex encoding to keep the types crate free of encoding dependencies.
mod hex {
    pub fn encode(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}
