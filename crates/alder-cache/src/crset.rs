//! Compact in-cache RRSet data.
//!
//! [`CRSet`] is the closed tagged form a cached RRSet's data takes: one
//! variant per record type the cache supports, with domain names and
//! mailboxes held as compact [`CName`] octets to bound per-entry memory.
//! Conversion from and to the wire layer's [`RData`] happens only at the
//! assembly boundary, where unsupported tags are rejected.

use crate::key::CName;
use crate::rrset::RRSetError;
use alder_proto::rdata;
use alder_proto::{RData, RecordType};
use serde::Serialize;
use std::net::{Ipv4Addr, Ipv6Addr};

/// One TXT record's character-strings, boxed flat.
pub type TxtData = Box<[Box<[u8]>]>;

/// One MX record's data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MxData {
    /// Preference value; lower is preferred.
    pub preference: u16,
    /// Mail exchange host.
    pub exchange: CName,
}

/// One SOA record's data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SoaData {
    /// Primary name server for the zone.
    pub mname: CName,
    /// Responsible mailbox.
    pub rname: CName,
    /// Zone serial number.
    pub serial: u32,
    /// Refresh interval (seconds).
    pub refresh: u32,
    /// Retry interval (seconds).
    pub retry: u32,
    /// Expire time (seconds).
    pub expire: u32,
    /// Minimum TTL (seconds).
    pub minimum: u32,
}

/// The data of one cached RRSet.
///
/// Invariants, enforced at [`CRSet::from_rdatas`]: CNAME and SOA carry
/// exactly one datum; every other variant is nonempty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CRSet {
    /// IPv4 addresses.
    A(Vec<Ipv4Addr>),
    /// IPv6 addresses.
    AAAA(Vec<Ipv6Addr>),
    /// Name server names.
    NS(Vec<CName>),
    /// Pointer names.
    PTR(Vec<CName>),
    /// Mail exchanges.
    MX(Vec<MxData>),
    /// Opaque text payloads.
    TXT(Vec<TxtData>),
    /// Canonical name (always a single record).
    CNAME(CName),
    /// Start of authority (always a single record).
    SOA(Box<SoaData>),
}

impl CRSet {
    /// Builds a CRSet from the RDATAs of one RRSet.
    ///
    /// `rtype` is the RRSet's declared type; every RDATA must carry the
    /// matching tag. Empty input, mixed tags, unsupported types, and
    /// multi-record CNAME/SOA sets are rejected.
    pub fn from_rdatas(rtype: RecordType, rdatas: &[RData]) -> Result<Self, RRSetError> {
        if rdatas.is_empty() {
            return Err(RRSetError::Empty);
        }

        match rtype {
            RecordType::A => rdatas
                .iter()
                .map(|rd| match rd {
                    RData::A(a) => Ok(a.address()),
                    _ => Err(RRSetError::TypeMismatch),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(CRSet::A),

            RecordType::AAAA => rdatas
                .iter()
                .map(|rd| match rd {
                    RData::AAAA(aaaa) => Ok(aaaa.address()),
                    _ => Err(RRSetError::TypeMismatch),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(CRSet::AAAA),

            RecordType::NS => rdatas
                .iter()
                .map(|rd| match rd {
                    RData::NS(ns) => Ok(CName::from(ns.nsdname())),
                    _ => Err(RRSetError::TypeMismatch),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(CRSet::NS),

            RecordType::PTR => rdatas
                .iter()
                .map(|rd| match rd {
                    RData::PTR(ptr) => Ok(CName::from(ptr.ptrdname())),
                    _ => Err(RRSetError::TypeMismatch),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(CRSet::PTR),

            RecordType::MX => rdatas
                .iter()
                .map(|rd| match rd {
                    RData::MX(mx) => Ok(MxData {
                        preference: mx.preference(),
                        exchange: CName::from(mx.exchange()),
                    }),
                    _ => Err(RRSetError::TypeMismatch),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(CRSet::MX),

            RecordType::TXT => rdatas
                .iter()
                .map(|rd| match rd {
                    RData::TXT(txt) => Ok(txt
                        .strings()
                        .iter()
                        .map(|s| s.clone().into_boxed_slice())
                        .collect()),
                    _ => Err(RRSetError::TypeMismatch),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(CRSet::TXT),

            RecordType::CNAME => {
                let [rd] = rdatas else {
                    return Err(RRSetError::MultiRecordSingleton(rtype));
                };
                match rd {
                    RData::CNAME(cname) => Ok(CRSet::CNAME(CName::from(cname.target()))),
                    _ => Err(RRSetError::TypeMismatch),
                }
            }

            RecordType::SOA => {
                let [rd] = rdatas else {
                    return Err(RRSetError::MultiRecordSingleton(rtype));
                };
                match rd {
                    RData::SOA(soa) => Ok(CRSet::SOA(Box::new(SoaData {
                        mname: CName::from(soa.mname()),
                        rname: CName::from(soa.rname()),
                        serial: soa.serial(),
                        refresh: soa.refresh(),
                        retry: soa.retry(),
                        expire: soa.expire(),
                        minimum: soa.minimum(),
                    }))),
                    _ => Err(RRSetError::TypeMismatch),
                }
            }

            other => Err(RRSetError::UnsupportedType(other.into())),
        }
    }

    /// Produces the wire layer's RDATAs, the inverse of [`Self::from_rdatas`].
    pub fn to_rdatas(&self) -> Vec<RData> {
        match self {
            CRSet::A(addrs) => addrs
                .iter()
                .map(|&a| RData::A(rdata::A::new(a)))
                .collect(),
            CRSet::AAAA(addrs) => addrs
                .iter()
                .map(|&a| RData::AAAA(rdata::AAAA::new(a)))
                .collect(),
            CRSet::NS(names) => names
                .iter()
                .map(|n| RData::NS(rdata::NS::new(n.to_name())))
                .collect(),
            CRSet::PTR(names) => names
                .iter()
                .map(|n| RData::PTR(rdata::PTR::new(n.to_name())))
                .collect(),
            CRSet::MX(mxs) => mxs
                .iter()
                .map(|mx| RData::MX(rdata::MX::new(mx.preference, mx.exchange.to_name())))
                .collect(),
            CRSet::TXT(texts) => texts
                .iter()
                .map(|strings| {
                    RData::TXT(rdata::TXT::new(strings.iter().map(|s| s.to_vec())))
                })
                .collect(),
            CRSet::CNAME(target) => {
                vec![RData::CNAME(rdata::CNAME::new(target.to_name()))]
            }
            CRSet::SOA(soa) => vec![RData::SOA(rdata::SOA::new(
                soa.mname.to_name(),
                soa.rname.to_name(),
                soa.serial,
                soa.refresh,
                soa.retry,
                soa.expire,
                soa.minimum,
            ))],
        }
    }

    /// Returns the record type of this data.
    pub fn record_type(&self) -> RecordType {
        match self {
            CRSet::A(_) => RecordType::A,
            CRSet::AAAA(_) => RecordType::AAAA,
            CRSet::NS(_) => RecordType::NS,
            CRSet::PTR(_) => RecordType::PTR,
            CRSet::MX(_) => RecordType::MX,
            CRSet::TXT(_) => RecordType::TXT,
            CRSet::CNAME(_) => RecordType::CNAME,
            CRSet::SOA(_) => RecordType::SOA,
        }
    }

    /// Returns the number of records this data reconstitutes to.
    pub fn len(&self) -> usize {
        match self {
            CRSet::A(v) => v.len(),
            CRSet::AAAA(v) => v.len(),
            CRSet::NS(v) => v.len(),
            CRSet::PTR(v) => v.len(),
            CRSet::MX(v) => v.len(),
            CRSet::TXT(v) => v.len(),
            CRSet::CNAME(_) | CRSet::SOA(_) => 1,
        }
    }

    /// A CRSet is never empty; kept for clippy symmetry with [`Self::len`].
    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alder_proto::Name;
    use std::str::FromStr;

    fn cname(s: &str) -> CName {
        CName::from(&Name::from_str(s).unwrap())
    }

    #[test]
    fn a_round_trip() {
        let crset = CRSet::A(vec![
            Ipv4Addr::new(192, 0, 2, 1),
            Ipv4Addr::new(192, 0, 2, 2),
        ]);
        let rdatas = crset.to_rdatas();
        assert_eq!(rdatas.len(), 2);
        assert_eq!(
            CRSet::from_rdatas(RecordType::A, &rdatas),
            Ok(crset.clone())
        );
        assert_eq!(crset.record_type(), RecordType::A);
        assert_eq!(crset.len(), 2);
    }

    #[test]
    fn mx_and_txt_round_trip() {
        let mx = CRSet::MX(vec![
            MxData {
                preference: 10,
                exchange: cname("mail1.example.com"),
            },
            MxData {
                preference: 20,
                exchange: cname("mail2.example.com"),
            },
        ]);
        assert_eq!(CRSet::from_rdatas(RecordType::MX, &mx.to_rdatas()), Ok(mx));

        let txt = CRSet::TXT(vec![vec![
            b"abc".to_vec().into_boxed_slice(),
            b"def".to_vec().into_boxed_slice(),
        ]
        .into_boxed_slice()]);
        assert_eq!(
            CRSet::from_rdatas(RecordType::TXT, &txt.to_rdatas()),
            Ok(txt)
        );
    }

    #[test]
    fn soa_round_trip() {
        let soa = CRSet::SOA(Box::new(SoaData {
            mname: cname("ns1.example.com"),
            rname: cname("hostmaster.example.com"),
            serial: 2024010101,
            refresh: 3600,
            retry: 900,
            expire: 604800,
            minimum: 86400,
        }));
        assert_eq!(
            CRSet::from_rdatas(RecordType::SOA, &soa.to_rdatas()),
            Ok(soa)
        );
    }

    #[test]
    fn empty_rejected() {
        assert_eq!(
            CRSet::from_rdatas(RecordType::A, &[]),
            Err(RRSetError::Empty)
        );
    }

    #[test]
    fn mixed_tags_rejected() {
        let rdatas = vec![
            RData::A(rdata::A::new(Ipv4Addr::new(192, 0, 2, 1))),
            RData::AAAA(rdata::AAAA::new("2001:db8::1".parse().unwrap())),
        ];
        assert_eq!(
            CRSet::from_rdatas(RecordType::A, &rdatas),
            Err(RRSetError::TypeMismatch)
        );
    }

    #[test]
    fn multi_record_singletons_rejected() {
        let target1 = RData::CNAME(rdata::CNAME::new(Name::from_str("a.example.com").unwrap()));
        let target2 = RData::CNAME(rdata::CNAME::new(Name::from_str("b.example.com").unwrap()));
        assert_eq!(
            CRSet::from_rdatas(RecordType::CNAME, &[target1, target2]),
            Err(RRSetError::MultiRecordSingleton(RecordType::CNAME))
        );
    }

    #[test]
    fn unsupported_type_rejected() {
        assert!(matches!(
            CRSet::from_rdatas(RecordType::SRV, &[RData::Unknown(rdata::Unknown::new(33, vec![]))]),
            Err(RRSetError::UnsupportedType(_))
        ));
    }
}
