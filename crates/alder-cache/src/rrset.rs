//! RRSet assembly.
//!
//! Pure transforms between the wire layer's record lists and the cache's
//! (key, TTL, CRSet) form. Everything here is total over its inputs;
//! malformed groups come back as values for the caller to log.

use crate::crset::CRSet;
use crate::key::Key;
use alder_proto::{Class, RData, ResourceRecord, Type};
use serde::Serialize;
use thiserror::Error;

/// Why a group of records does not form a cacheable RRSet.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RRSetError {
    /// The group was empty.
    #[error("empty record group")]
    Empty,

    /// A record's class is not IN.
    #[error("record class is not IN")]
    NotInternet,

    /// A record's RDATA tag does not match its declared type.
    #[error("rdata does not match the declared record type")]
    TypeMismatch,

    /// The record type is not one the cache models.
    #[error("unsupported record type {0}")]
    UnsupportedType(Type),

    /// Records in the group disagree on name, type, class, or TTL.
    #[error("records do not share one (name, type, class, ttl)")]
    Mixed,

    /// A CNAME or SOA group holds more than one record.
    #[error("{0} RRSet must hold exactly one record")]
    MultiRecordSingleton(alder_proto::RecordType),
}

/// A record group that failed assembly, kept for diagnostics.
#[derive(Debug, Clone)]
pub struct RejectedRRSet {
    /// Why the group was rejected.
    pub error: RRSetError,
    /// The offending records.
    pub records: Vec<ResourceRecord>,
}

/// An assembled RRSet ready for cache admission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedRRSet {
    /// The RRSet's identity.
    pub key: Key,
    /// The shared TTL.
    pub ttl: u32,
    /// The RRSet's data.
    pub crset: CRSet,
}

/// Derives the cache key and TTL of a single record.
///
/// Succeeds iff the record's class is IN and its RDATA tag matches its
/// declared type; unknown classes, unknown types, and unsupported RDATA
/// reject the record (and with it the whole RRSet).
pub fn rr_set_key(rr: &ResourceRecord) -> Result<(Key, u32), RRSetError> {
    if rr.rclass() != Class::IN {
        return Err(RRSetError::NotInternet);
    }
    let declared = match rr.rtype() {
        Type::Known(t) if !t.is_pseudo() => t,
        other => return Err(RRSetError::UnsupportedType(other)),
    };
    match rr.rdata().record_type() {
        Some(tag) if tag == declared => {}
        _ => return Err(RRSetError::TypeMismatch),
    }
    Ok((
        Key::from_name(rr.name(), rr.rtype(), rr.rclass()),
        rr.ttl(),
    ))
}

/// Assembles a record list intended to form one RRSet.
///
/// Every record must map through [`rr_set_key`] to the same (key, TTL)
/// pair; the data is then built by dispatching on the first record's tag.
pub fn take_rrset(rrs: &[ResourceRecord]) -> Result<CachedRRSet, RejectedRRSet> {
    let reject = |error| RejectedRRSet {
        error,
        records: rrs.to_vec(),
    };

    let first = rrs.first().ok_or_else(|| reject(RRSetError::Empty))?;
    let (key, ttl) = rr_set_key(first).map_err(reject)?;

    for rr in &rrs[1..] {
        let (k, t) = rr_set_key(rr).map_err(reject)?;
        if k != key || t != ttl {
            return Err(reject(RRSetError::Mixed));
        }
    }

    let rdatas: Vec<RData> = rrs.iter().map(|rr| rr.rdata().clone()).collect();
    // rr_set_key only admits known types.
    let rtype = match key.rtype {
        Type::Known(t) => t,
        Type::Unknown(v) => return Err(reject(RRSetError::UnsupportedType(Type::Unknown(v)))),
    };
    let crset = CRSet::from_rdatas(rtype, &rdatas).map_err(reject)?;

    Ok(CachedRRSet { key, ttl, crset })
}

/// Reconstitutes the wire-form records of a cached RRSet.
///
/// Inverse of [`take_rrset`] up to record order.
pub fn extract_rrset(key: &Key, ttl: u32, crset: &CRSet) -> Vec<ResourceRecord> {
    let name = key.name.to_name();
    crset
        .to_rdatas()
        .into_iter()
        .map(|rdata| {
            ResourceRecord::new(name.clone(), key.rtype, key.rclass, ttl, rdata)
        })
        .collect()
}
