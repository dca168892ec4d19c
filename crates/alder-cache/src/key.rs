//! Cache keys.
//!
//! A cached RRSet is identified by (owner name, type, class). The owner name
//! is held in a compact byte-string form so every entry's footprint is one
//! small allocation, independent of how the wire layer stores names.

use alder_proto::{Class, Name, Type};
use serde::Serialize;
use std::fmt;

/// Compact owner-name form: the validated, uncompressed wire octets.
///
/// Comparison is case-sensitive at the octet level; the cache inherits
/// whatever normalization the wire layer applied and does not re-normalize.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CName(Box<[u8]>);

impl CName {
    /// Returns the wire-form octets.
    #[inline]
    pub fn as_octets(&self) -> &[u8] {
        &self.0
    }

    /// Reconstructs the wire layer's name value.
    pub fn to_name(&self) -> Name {
        // The only constructor copies out of a validated Name.
        Name::from_wire(&self.0).expect("compact name holds validated wire octets")
    }
}

impl From<&Name> for CName {
    fn from(name: &Name) -> Self {
        Self(name.as_wire().into())
    }
}

impl fmt::Display for CName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_name())
    }
}

impl fmt::Debug for CName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CName(\"{self}\")")
    }
}

impl Serialize for CName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_name().to_dotted())
    }
}

/// Identity of a cached RRSet: (owner name, type, class).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Key {
    /// Owner name in compact form.
    pub name: CName,
    /// Record type.
    pub rtype: Type,
    /// Record class.
    pub rclass: Class,
}

impl Key {
    /// Creates a new key.
    pub fn new(name: CName, rtype: Type, rclass: Class) -> Self {
        Self {
            name,
            rtype,
            rclass,
        }
    }

    /// Creates a key from the wire layer's name form.
    pub fn from_name(name: &Name, rtype: Type, rclass: Class) -> Self {
        Self::new(CName::from(name), rtype, rclass)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.rclass, self.rtype)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alder_proto::RecordType;
    use std::str::FromStr;

    #[test]
    fn name_round_trip() {
        let name = Name::from_str("www.example.com").unwrap();
        let compact = CName::from(&name);
        assert_eq!(compact.to_name(), name);
        assert_eq!(compact.as_octets(), name.as_wire());
    }

    #[test]
    fn octet_level_ordering_is_case_sensitive() {
        let lower = CName::from(&Name::from_str("example.com").unwrap());
        let upper = CName::from(&Name::from_str("EXAMPLE.COM").unwrap());
        // The wire layer's Name compares case-insensitively, the compact
        // form does not.
        assert_ne!(lower, upper);
    }

    #[test]
    fn key_ordering_is_structural() {
        let name = Name::from_str("example.com").unwrap();
        let a = Key::from_name(&name, Type::Known(RecordType::A), Class::IN);
        let aaaa = Key::from_name(&name, Type::Known(RecordType::AAAA), Class::IN);
        assert!(a < aaaa);
        assert_eq!(a, a.clone());
    }
}
