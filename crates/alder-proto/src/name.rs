//! DNS domain name representation.
//!
//! Names are stored as an uncompressed wire-form label sequence: each label
//! prefixed by its length byte, terminated by the zero-length root label.
//! Comparison and hashing are case-insensitive per RFC 1035; callers that
//! need octet-exact identity (e.g. cache keys) compare the wire octets
//! directly via [`Name::as_wire`].

use crate::error::{Error, Result};
use crate::{MAX_LABEL_LENGTH, MAX_NAME_LENGTH};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A DNS domain name.
///
/// Most names fit the inline buffer; nothing here touches the heap for
/// typical lookups.
///
/// # Example
///
/// ```rust
/// use alder_proto::Name;
/// use std::str::FromStr;
///
/// let name = Name::from_str("www.example.com.").unwrap();
/// assert_eq!(name.label_count(), 3);
/// assert_eq!(Name::from_str("WWW.EXAMPLE.COM.").unwrap(), name);
/// ```
#[derive(Clone)]
pub struct Name {
    /// Uncompressed wire form, always ending with the root label byte.
    wire: SmallVec<[u8; 64]>,
}

impl Name {
    /// Creates the root domain name.
    pub fn root() -> Self {
        Self {
            wire: SmallVec::from_slice(&[0]),
        }
    }

    /// Creates a name from uncompressed wire-form octets, validating them.
    ///
    /// The octets must be a well-formed label sequence ending with the root
    /// label; compression pointers are rejected.
    pub fn from_wire(octets: &[u8]) -> Result<Self> {
        validate_wire(octets)?;
        Ok(Self {
            wire: SmallVec::from_slice(octets),
        })
    }

    /// Returns the wire-form octets, including the terminating root label.
    #[inline]
    pub fn as_wire(&self) -> &[u8] {
        &self.wire
    }

    /// Returns the wire-form length in bytes.
    #[inline]
    pub fn wire_len(&self) -> usize {
        self.wire.len()
    }

    /// Returns true if this is the root domain.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.wire.len() == 1
    }

    /// Returns the number of labels, excluding the root label.
    pub fn label_count(&self) -> usize {
        self.labels().count()
    }

    /// Iterates over the labels, leftmost first, excluding the root label.
    pub fn labels(&self) -> LabelIter<'_> {
        LabelIter { rest: &self.wire }
    }

    /// Returns the dotted string form.
    pub fn to_dotted(&self) -> CompactString {
        let mut out = CompactString::new("");
        for label in self.labels() {
            for &b in label {
                // Escape the separators and non-printable octets so the
                // dotted form stays unambiguous.
                match b {
                    b'.' | b'\\' => {
                        out.push('\\');
                        out.push(b as char);
                    }
                    0x21..=0x7e => out.push(b as char),
                    _ => {
                        out.push('\\');
                        out.push_str(&format!("{b:03}"));
                    }
                }
            }
            out.push('.');
        }
        if out.is_empty() {
            out.push('.');
        }
        out
    }
}

/// Validates an uncompressed wire-form label sequence.
fn validate_wire(octets: &[u8]) -> Result<()> {
    if octets.is_empty() {
        return Err(Error::MalformedName {
            offset: 0,
            message: "empty octet sequence",
        });
    }
    if octets.len() > MAX_NAME_LENGTH {
        return Err(Error::NameTooLong {
            length: octets.len(),
        });
    }

    let mut pos = 0;
    loop {
        let len = octets[pos] as usize;
        if len == 0 {
            // Root label must be the final byte.
            if pos + 1 != octets.len() {
                return Err(Error::MalformedName {
                    offset: pos,
                    message: "data after root label",
                });
            }
            return Ok(());
        }
        if len > MAX_LABEL_LENGTH {
            // Also catches compression pointers (top bits 11).
            return Err(Error::MalformedName {
                offset: pos,
                message: "label length out of range",
            });
        }
        pos += 1 + len;
        if pos >= octets.len() {
            return Err(Error::MalformedName {
                offset: pos,
                message: "truncated label sequence",
            });
        }
    }
}

/// Iterator over the labels of a [`Name`].
#[derive(Debug, Clone)]
pub struct LabelIter<'a> {
    rest: &'a [u8],
}

impl<'a> Iterator for LabelIter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let len = *self.rest.first()? as usize;
        if len == 0 {
            return None;
        }
        let (label, rest) = self.rest[1..].split_at(len);
        self.rest = rest;
        Some(label)
    }
}

impl FromStr for Name {
    type Err = Error;

    /// Parses a dotted domain name. A trailing dot is accepted and implied
    /// when absent.
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || s == "." {
            return Ok(Self::root());
        }

        let s = s.strip_suffix('.').unwrap_or(s);
        let mut wire = SmallVec::<[u8; 64]>::new();

        for part in s.split('.') {
            if part.is_empty() {
                return Err(Error::MalformedName {
                    offset: 0,
                    message: "empty label",
                });
            }
            if part.len() > MAX_LABEL_LENGTH {
                return Err(Error::LabelTooLong { length: part.len() });
            }
            for (i, c) in part.chars().enumerate() {
                // Alphanumerics, hyphen, underscore, and wildcard asterisk.
                if !c.is_ascii_alphanumeric() && c != '-' && c != '_' && c != '*' {
                    return Err(Error::InvalidLabelChar {
                        character: c,
                        position: i,
                    });
                }
            }
            wire.push(part.len() as u8);
            wire.extend_from_slice(part.as_bytes());
        }
        wire.push(0);

        if wire.len() > MAX_NAME_LENGTH {
            return Err(Error::NameTooLong { length: wire.len() });
        }

        Ok(Self { wire })
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_dotted())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name(\"{self}\")")
    }
}

impl PartialEq for Name {
    /// Case-insensitive comparison per DNS semantics.
    fn eq(&self, other: &Self) -> bool {
        self.wire.len() == other.wire.len()
            && self
                .wire
                .iter()
                .zip(other.wire.iter())
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in &self.wire {
            b.to_ascii_lowercase().hash(state);
        }
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::root()
    }
}

impl Serialize for Name {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_dotted())
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}
