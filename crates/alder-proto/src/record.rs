//! DNS resource records.
//!
//! A resource record (RR) is the fundamental unit of DNS data: a name,
//! type, class, TTL, and record-specific data.

use crate::class::{Class, RecordClass};
use crate::name::Name;
use crate::rdata::RData;
use crate::rtype::{RecordType, Type};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A DNS resource record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// The domain name this record is for.
    name: Name,
    /// The record type.
    rtype: Type,
    /// The record class.
    rclass: Class,
    /// Time to live in seconds.
    ttl: u32,
    /// The record data.
    rdata: RData,
}

impl ResourceRecord {
    /// Creates a new resource record.
    pub fn new(name: Name, rtype: Type, rclass: Class, ttl: u32, rdata: RData) -> Self {
        Self {
            name,
            rtype,
            rclass,
            ttl,
            rdata,
        }
    }

    /// Creates a record whose type and class tags follow the RDATA.
    pub fn from_rdata(name: Name, ttl: u32, rdata: RData) -> Self {
        Self {
            name,
            rtype: rdata.rtype(),
            rclass: Class::IN,
            ttl,
            rdata,
        }
    }

    /// Creates an A record.
    pub fn a(name: Name, ttl: u32, addr: std::net::Ipv4Addr) -> Self {
        Self::from_rdata(name, ttl, RData::A(crate::rdata::A::new(addr)))
    }

    /// Creates an AAAA record.
    pub fn aaaa(name: Name, ttl: u32, addr: std::net::Ipv6Addr) -> Self {
        Self::from_rdata(name, ttl, RData::AAAA(crate::rdata::AAAA::new(addr)))
    }

    /// Creates an NS record.
    pub fn ns(name: Name, ttl: u32, nsdname: Name) -> Self {
        Self::from_rdata(name, ttl, RData::NS(crate::rdata::NS::new(nsdname)))
    }

    /// Creates a CNAME record.
    pub fn cname(name: Name, ttl: u32, target: Name) -> Self {
        Self::from_rdata(name, ttl, RData::CNAME(crate::rdata::CNAME::new(target)))
    }

    /// Creates a PTR record.
    pub fn ptr(name: Name, ttl: u32, ptrdname: Name) -> Self {
        Self::from_rdata(name, ttl, RData::PTR(crate::rdata::PTR::new(ptrdname)))
    }

    /// Creates an MX record.
    pub fn mx(name: Name, ttl: u32, preference: u16, exchange: Name) -> Self {
        Self::from_rdata(
            name,
            ttl,
            RData::MX(crate::rdata::MX::new(preference, exchange)),
        )
    }

    /// Creates a TXT record.
    pub fn txt(name: Name, ttl: u32, text: impl Into<Vec<u8>>) -> Self {
        Self::from_rdata(name, ttl, RData::TXT(crate::rdata::TXT::from_string(text)))
    }

    /// Creates an SOA record.
    #[allow(clippy::too_many_arguments)]
    pub fn soa(
        name: Name,
        ttl: u32,
        mname: Name,
        rname: Name,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    ) -> Self {
        Self::from_rdata(
            name,
            ttl,
            RData::SOA(crate::rdata::SOA::new(
                mname, rname, serial, refresh, retry, expire, minimum,
            )),
        )
    }

    /// Returns the record name.
    #[inline]
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Returns the record type.
    #[inline]
    pub fn rtype(&self) -> Type {
        self.rtype
    }

    /// Returns the record type if known.
    #[inline]
    pub fn record_type(&self) -> Option<RecordType> {
        self.rtype.as_known()
    }

    /// Returns the record class.
    #[inline]
    pub fn rclass(&self) -> Class {
        self.rclass
    }

    /// Returns the record class if known.
    #[inline]
    pub fn record_class(&self) -> Option<RecordClass> {
        match self.rclass {
            Class::Known(c) => Some(c),
            Class::Unknown(_) => None,
        }
    }

    /// Returns the TTL in seconds.
    #[inline]
    pub const fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Returns the record data.
    #[inline]
    pub fn rdata(&self) -> &RData {
        &self.rdata
    }

    /// Returns a copy with a different TTL.
    pub fn with_ttl(&self, ttl: u32) -> Self {
        let mut record = self.clone();
        record.ttl = ttl;
        record
    }

    /// Returns a copy with a different class.
    pub fn with_class(&self, rclass: Class) -> Self {
        let mut record = self.clone();
        record.rclass = rclass;
        record
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.name, self.ttl, self.rclass, self.rtype, self.rdata
        )
    }
}
