//! Name-based record types (NS, CNAME, PTR, MX).

use crate::name::Name;
use serde::{Deserialize, Serialize};
use std::fmt;

/// NS record - Name server (RFC 1035).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NS {
    /// The name server domain name.
    nsdname: Name,
}

impl NS {
    /// Creates a new NS record.
    #[inline]
    pub fn new(nsdname: Name) -> Self {
        Self { nsdname }
    }

    /// Returns the name server name.
    #[inline]
    pub fn nsdname(&self) -> &Name {
        &self.nsdname
    }
}

impl fmt::Display for NS {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.nsdname)
    }
}

/// CNAME record - Canonical name (RFC 1035).
///
/// A resolver that encounters a CNAME restarts the query with the canonical
/// name; an RRSet of this type holds exactly one record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CNAME {
    /// The canonical domain name.
    cname: Name,
}

impl CNAME {
    /// Creates a new CNAME record.
    #[inline]
    pub fn new(cname: Name) -> Self {
        Self { cname }
    }

    /// Returns the canonical name (target).
    #[inline]
    pub fn target(&self) -> &Name {
        &self.cname
    }
}

impl fmt::Display for CNAME {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cname)
    }
}

/// PTR record - Pointer (RFC 1035).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PTR {
    /// The pointed-to domain name.
    ptrdname: Name,
}

impl PTR {
    /// Creates a new PTR record.
    #[inline]
    pub fn new(ptrdname: Name) -> Self {
        Self { ptrdname }
    }

    /// Returns the pointed-to domain name.
    #[inline]
    pub fn ptrdname(&self) -> &Name {
        &self.ptrdname
    }
}

impl fmt::Display for PTR {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ptrdname)
    }
}

/// MX record - Mail exchange (RFC 1035).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MX {
    /// Preference value; lower is preferred.
    preference: u16,
    /// The mail exchange host.
    exchange: Name,
}

impl MX {
    /// Creates a new MX record.
    #[inline]
    pub fn new(preference: u16, exchange: Name) -> Self {
        Self {
            preference,
            exchange,
        }
    }

    /// Returns the preference value.
    #[inline]
    pub const fn preference(&self) -> u16 {
        self.preference
    }

    /// Returns the mail exchange host name.
    #[inline]
    pub fn exchange(&self) -> &Name {
        &self.exchange
    }
}

impl fmt::Display for MX {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.preference, self.exchange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn mx_record() {
        let mx = MX::new(10, Name::from_str("mail.example.com").unwrap());
        assert_eq!(mx.preference(), 10);
        assert_eq!(mx.to_string(), "10 mail.example.com.");
    }

    #[test]
    fn cname_record() {
        let cname = CNAME::new(Name::from_str("canonical.example.com").unwrap());
        assert_eq!(cname.target().to_string(), "canonical.example.com.");
    }
}
