//! DNS record data (RDATA) types.
//!
//! One struct per modeled record type, tagged together by [`RData`]:
//!
//! - **Address records**: A, AAAA
//! - **Name records**: NS, CNAME, PTR, MX
//! - **Text records**: TXT
//! - **Authority records**: SOA
//!
//! Anything else is preserved as [`Unknown`] opaque bytes.

pub mod address;
pub mod authority;
pub mod name;
pub mod text;
pub mod unknown;

pub use address::{A, AAAA};
pub use authority::SOA;
pub use name::{CNAME, MX, NS, PTR};
pub use text::TXT;
pub use unknown::Unknown;

use crate::name::Name as DomainName;
use crate::rtype::{RecordType, Type};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// DNS record data.
///
/// A closed tag over the record types this resolver models; unknown types
/// are carried as opaque payloads and rejected at the cache boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RData {
    /// IPv4 address (A record)
    A(A),

    /// IPv6 address (AAAA record)
    AAAA(AAAA),

    /// Name server (NS record)
    NS(NS),

    /// Canonical name (CNAME record)
    CNAME(CNAME),

    /// Pointer (PTR record)
    PTR(PTR),

    /// Mail exchange (MX record)
    MX(MX),

    /// Text (TXT record)
    TXT(TXT),

    /// Start of authority (SOA record)
    SOA(SOA),

    /// Unknown or unsupported record type (preserved as raw bytes)
    Unknown(Unknown),
}

impl RData {
    /// Returns the type value for this RDATA.
    pub fn rtype(&self) -> Type {
        match self {
            RData::A(_) => Type::Known(RecordType::A),
            RData::AAAA(_) => Type::Known(RecordType::AAAA),
            RData::NS(_) => Type::Known(RecordType::NS),
            RData::CNAME(_) => Type::Known(RecordType::CNAME),
            RData::PTR(_) => Type::Known(RecordType::PTR),
            RData::MX(_) => Type::Known(RecordType::MX),
            RData::TXT(_) => Type::Known(RecordType::TXT),
            RData::SOA(_) => Type::Known(RecordType::SOA),
            RData::Unknown(u) => Type::from_u16(u.type_code()),
        }
    }

    /// Returns the known record type, if this RDATA has one.
    pub fn record_type(&self) -> Option<RecordType> {
        match self {
            RData::Unknown(_) => None,
            _ => self.rtype().as_known(),
        }
    }

    /// Returns the IPv4 address if this is an A record.
    pub fn as_a(&self) -> Option<Ipv4Addr> {
        match self {
            RData::A(a) => Some(a.address()),
            _ => None,
        }
    }

    /// Returns the IPv6 address if this is an AAAA record.
    pub fn as_aaaa(&self) -> Option<Ipv6Addr> {
        match self {
            RData::AAAA(aaaa) => Some(aaaa.address()),
            _ => None,
        }
    }

    /// Returns the target name if this is a CNAME record.
    pub fn as_cname(&self) -> Option<&DomainName> {
        match self {
            RData::CNAME(cname) => Some(cname.target()),
            _ => None,
        }
    }
}

impl fmt::Display for RData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RData::A(r) => write!(f, "{r}"),
            RData::AAAA(r) => write!(f, "{r}"),
            RData::NS(r) => write!(f, "{r}"),
            RData::CNAME(r) => write!(f, "{r}"),
            RData::PTR(r) => write!(f, "{r}"),
            RData::MX(r) => write!(f, "{r}"),
            RData::TXT(r) => write!(f, "{r}"),
            RData::SOA(r) => write!(f, "{r}"),
            RData::Unknown(r) => write!(f, "{r}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn rtype_tags() {
        let a = RData::A(A::new(Ipv4Addr::new(192, 0, 2, 1)));
        assert_eq!(a.record_type(), Some(RecordType::A));
        assert_eq!(a.as_a(), Some(Ipv4Addr::new(192, 0, 2, 1)));
        assert_eq!(a.as_aaaa(), None);

        let u = RData::Unknown(Unknown::new(4242, vec![]));
        assert_eq!(u.record_type(), None);
        assert_eq!(u.rtype(), Type::Unknown(4242));
    }

    #[test]
    fn cname_accessor() {
        let target = DomainName::from_str("real.example.com").unwrap();
        let r = RData::CNAME(CNAME::new(target.clone()));
        assert_eq!(r.as_cname(), Some(&target));
    }
}
