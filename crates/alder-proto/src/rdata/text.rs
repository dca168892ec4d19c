//! Text record type (TXT).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// TXT record - Text (RFC 1035).
///
/// Holds one or more opaque character-strings, each up to 255 bytes on the
/// wire. Commonly carries SPF, DKIM and verification payloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TXT {
    /// The text strings.
    strings: SmallVec<[Vec<u8>; 2]>,
}

impl TXT {
    /// Creates a new TXT record with the given strings.
    pub fn new(strings: impl IntoIterator<Item = impl Into<Vec<u8>>>) -> Self {
        Self {
            strings: strings.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a TXT record from a single string.
    pub fn from_string(s: impl Into<Vec<u8>>) -> Self {
        Self {
            strings: smallvec::smallvec![s.into()],
        }
    }

    /// Returns the text strings.
    pub fn strings(&self) -> &[Vec<u8>] {
        &self.strings
    }

    /// Returns all strings concatenated, the semantic value for protocols
    /// like SPF that span multiple character-strings.
    pub fn data(&self) -> Vec<u8> {
        self.strings
            .iter()
            .flat_map(|s| s.iter().copied())
            .collect()
    }

    /// Returns the data as a UTF-8 string if valid.
    pub fn text(&self) -> Option<String> {
        String::from_utf8(self.data()).ok()
    }
}

impl fmt::Display for TXT {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, s) in self.strings.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "\"{}\"", String::from_utf8_lossy(s))?;
        }
        Ok(())
    }
}
