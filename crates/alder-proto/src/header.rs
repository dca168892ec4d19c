//! DNS message header.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

bitflags! {
    /// DNS header flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HeaderFlags: u16 {
        /// Query/Response flag: 0 = query, 1 = response
        const QR = 0x8000;

        /// Authoritative Answer: server is authoritative for the domain
        const AA = 0x0400;

        /// Truncation: message was truncated
        const TC = 0x0200;

        /// Recursion Desired: client wants recursive resolution
        const RD = 0x0100;

        /// Recursion Available: server supports recursion
        const RA = 0x0080;

        /// Authentic Data: response data is authenticated (DNSSEC)
        const AD = 0x0020;

        /// Checking Disabled: disable DNSSEC validation
        const CD = 0x0010;
    }
}

impl Default for HeaderFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl Serialize for HeaderFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u16(self.bits())
    }
}

impl<'de> Deserialize<'de> for HeaderFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(Self::from_bits_retain(u16::deserialize(deserializer)?))
    }
}

/// DNS operation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OpCode {
    /// Standard query - RFC 1035
    #[default]
    Query,
    /// Server status request - RFC 1035
    Status,
    /// Zone change notification - RFC 1996
    Notify,
    /// Dynamic update - RFC 2136
    Update,
}

/// DNS response code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResponseCode {
    /// No error - RFC 1035
    #[default]
    NoError,
    /// Format error - RFC 1035
    FormErr,
    /// Server failure - RFC 1035
    ServFail,
    /// Nonexistent domain - RFC 1035
    NXDomain,
    /// Not implemented - RFC 1035
    NotImp,
    /// Query refused - RFC 1035
    Refused,
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NoError => "NOERROR",
            Self::FormErr => "FORMERR",
            Self::ServFail => "SERVFAIL",
            Self::NXDomain => "NXDOMAIN",
            Self::NotImp => "NOTIMP",
            Self::Refused => "REFUSED",
        };
        write!(f, "{s}")
    }
}

/// DNS message header: a message ID plus the control flags and codes.
///
/// Section counts are derivable from the section vectors in
/// [`Message`](crate::Message) and are not duplicated here.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Header {
    /// Message identifier for matching requests to responses.
    pub id: u16,

    /// Query/Response flag and other flags.
    pub flags: HeaderFlags,

    /// Operation code.
    pub opcode: OpCode,

    /// Response code.
    pub rcode: ResponseCode,
}

impl Header {
    /// Creates a new header with the given message ID.
    pub fn new(id: u16) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Creates a response header echoing a query header.
    pub fn response_from(query: &Header) -> Self {
        Self {
            id: query.id,
            flags: HeaderFlags::QR | (query.flags & HeaderFlags::RD),
            opcode: query.opcode,
            rcode: ResponseCode::NoError,
        }
    }

    /// Returns true if this is a query.
    #[inline]
    pub fn is_query(&self) -> bool {
        !self.flags.contains(HeaderFlags::QR)
    }

    /// Returns true if this is a response.
    #[inline]
    pub fn is_response(&self) -> bool {
        self.flags.contains(HeaderFlags::QR)
    }

    /// Returns true if the authoritative-answer bit is set.
    #[inline]
    pub fn is_authoritative(&self) -> bool {
        self.flags.contains(HeaderFlags::AA)
    }

    /// Returns true if the message was truncated.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.flags.contains(HeaderFlags::TC)
    }

    /// Sets or clears the authoritative-answer bit.
    pub fn set_authoritative(&mut self, authoritative: bool) {
        self.flags.set(HeaderFlags::AA, authoritative);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aa_bit() {
        let mut header = Header::new(1234);
        assert!(!header.is_authoritative());
        header.set_authoritative(true);
        assert!(header.is_authoritative());
        header.set_authoritative(false);
        assert!(!header.is_authoritative());
    }

    #[test]
    fn response_echoes_query() {
        let mut query = Header::new(77);
        query.flags |= HeaderFlags::RD;

        let response = Header::response_from(&query);
        assert_eq!(response.id, 77);
        assert!(response.is_response());
        assert!(response.flags.contains(HeaderFlags::RD));
        assert!(!response.is_authoritative());
    }
}
