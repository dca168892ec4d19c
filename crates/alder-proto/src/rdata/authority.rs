//! Authority record type (SOA).

use crate::name::Name;
use serde::{Deserialize, Serialize};
use std::fmt;

/// SOA record - Start of Authority (RFC 1035).
///
/// Names the primary server and responsible mailbox for a zone and carries
/// the zone's timing parameters. An RRSet of this type holds exactly one
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SOA {
    /// Primary name server for the zone.
    mname: Name,
    /// Responsible person's mailbox (@ encoded as the first label break).
    rname: Name,
    /// Zone serial number.
    serial: u32,
    /// Refresh interval (seconds).
    refresh: u32,
    /// Retry interval (seconds).
    retry: u32,
    /// Expire time (seconds).
    expire: u32,
    /// Minimum TTL / negative caching TTL (seconds).
    minimum: u32,
}

impl SOA {
    /// Creates a new SOA record.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        mname: Name,
        rname: Name,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    ) -> Self {
        Self {
            mname,
            rname,
            serial,
            refresh,
            retry,
            expire,
            minimum,
        }
    }

    /// Returns the primary name server.
    #[inline]
    pub fn mname(&self) -> &Name {
        &self.mname
    }

    /// Returns the responsible person's mailbox (in DNS name form).
    #[inline]
    pub fn rname(&self) -> &Name {
        &self.rname
    }

    /// Returns the zone serial number.
    #[inline]
    pub const fn serial(&self) -> u32 {
        self.serial
    }

    /// Returns the refresh interval in seconds.
    #[inline]
    pub const fn refresh(&self) -> u32 {
        self.refresh
    }

    /// Returns the retry interval in seconds.
    #[inline]
    pub const fn retry(&self) -> u32 {
        self.retry
    }

    /// Returns the expire time in seconds.
    #[inline]
    pub const fn expire(&self) -> u32 {
        self.expire
    }

    /// Returns the minimum TTL (negative caching TTL) in seconds.
    #[inline]
    pub const fn minimum(&self) -> u32 {
        self.minimum
    }
}

impl fmt::Display for SOA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {}",
            self.mname, self.rname, self.serial, self.refresh, self.retry, self.expire, self.minimum
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample() -> SOA {
        SOA::new(
            Name::from_str("ns1.example.com").unwrap(),
            Name::from_str("hostmaster.example.com").unwrap(),
            2024010101,
            3600,
            900,
            604800,
            86400,
        )
    }

    #[test]
    fn accessors() {
        let soa = sample();
        assert_eq!(soa.mname().to_string(), "ns1.example.com.");
        assert_eq!(soa.serial(), 2024010101);
        assert_eq!(soa.minimum(), 86400);
    }

    #[test]
    fn display() {
        let soa = sample();
        let s = soa.to_string();
        assert!(s.contains("ns1.example.com"));
        assert!(s.contains("2024010101"));
    }
}
