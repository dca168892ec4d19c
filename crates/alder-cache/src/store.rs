//! The TTL-indexed RRSet store.
//!
//! A map from [`Key`] to (end-of-life, data, ranking) paired with a
//! deadline index, the priority-search-queue pattern: point lookup,
//! insert, delete, and minimum-deadline view all in O(log n).
//!
//! The store itself is single-threaded; the update pipeline owns the
//! only mutable copy and publishes clones (entry data is shared through
//! `Arc`, so a clone is cheap) for readers.

use crate::clock::Timestamp;
use crate::crset::CRSet;
use crate::key::Key;
use crate::ranking::Ranking;
use crate::rrset::extract_rrset;
use alder_proto::{Class, Name, ResourceRecord, Type};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// One live cache entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Absolute expiry time.
    eol: Timestamp,
    /// The RRSet's data.
    crset: Arc<CRSet>,
    /// Admission rank the data arrived with.
    ranking: Ranking,
}

impl CacheEntry {
    /// Returns the absolute expiry time.
    #[inline]
    pub fn eol(&self) -> Timestamp {
        self.eol
    }

    /// Returns the RRSet data.
    #[inline]
    pub fn crset(&self) -> &CRSet {
        &self.crset
    }

    /// Returns the admission rank.
    #[inline]
    pub fn ranking(&self) -> Ranking {
        self.ranking
    }
}

/// Returns the remaining TTL of an entry, or `None` if it is expired.
///
/// An entry with less than one second left counts as expired, as does any
/// remainder a `u32` TTL field cannot carry.
fn remaining_ttl(eol: Timestamp, now: Timestamp) -> Option<u32> {
    let left = eol.checked_sub(now)?;
    if left < 1 {
        return None;
    }
    u32::try_from(left).ok()
}

/// A serializable view of one entry, for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct DumpEntry {
    /// The entry's key.
    pub key: Key,
    /// Absolute expiry time.
    pub eol: Timestamp,
    /// Admission rank.
    pub ranking: Ranking,
    /// Number of records the entry reconstitutes to.
    pub records: usize,
}

/// The RRSet store.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Maximum number of entries; 0 means unbounded.
    max_entries: usize,
    /// Key-indexed entries.
    entries: BTreeMap<Arc<Key>, CacheEntry>,
    /// Deadline index; ties on the deadline break by key order.
    deadlines: BTreeSet<(Timestamp, Arc<Key>)>,
}

impl CacheStore {
    /// Creates an empty store bounded to `max_entries` (0 = unbounded).
    pub fn new(max_entries: usize) -> Self {
        Self {
            max_entries,
            entries: BTreeMap::new(),
            deadlines: BTreeSet::new(),
        }
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the configured bound (0 = unbounded).
    #[inline]
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Looks up a live RRSet.
    ///
    /// Read-only: expired entries are treated as missing but left in place
    /// for the next expiration pass. On a hit, the records carry the
    /// remaining TTL `eol − now`.
    pub fn lookup(
        &self,
        now: Timestamp,
        name: &Name,
        rtype: Type,
        rclass: Class,
    ) -> Option<(Vec<ResourceRecord>, Ranking)> {
        let key = Key::from_name(name, rtype, rclass);
        let entry = self.entries.get(&key)?;
        let ttl = remaining_ttl(entry.eol, now)?;
        Some((extract_rrset(&key, ttl, &entry.crset), entry.ranking))
    }

    /// Returns the entry for a key, live or not.
    pub fn get(&self, key: &Key) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    /// Returns true if an insert at `ranking` would be admitted.
    ///
    /// A key is open when absent or expired; a live entry yields only to a
    /// strictly higher rank (RFC 2181 §5.4.1).
    pub fn admits(&self, now: Timestamp, key: &Key, ranking: Ranking) -> bool {
        match self.entries.get(key) {
            Some(entry) if remaining_ttl(entry.eol, now).is_some() => {
                ranking.supersedes(entry.ranking)
            }
            _ => true,
        }
    }

    /// Inserts an RRSet, subject to rank admission.
    ///
    /// Returns false (leaving the store untouched) when a live entry of
    /// equal or higher rank holds the key. Otherwise expired entries are
    /// drained first, the nearest-to-expire entry is evicted if the store
    /// is full, and the entry lands with `eol = now + ttl`.
    pub fn insert(
        &mut self,
        now: Timestamp,
        key: Key,
        ttl: u32,
        crset: CRSet,
        ranking: Ranking,
    ) -> bool {
        if !self.admits(now, &key, ranking) {
            return false;
        }

        self.expire(now);

        let key = match self.entries.remove_entry(&key) {
            Some((arc, old)) => {
                self.deadlines.remove(&(old.eol, Arc::clone(&arc)));
                arc
            }
            None => {
                if self.max_entries > 0 && self.entries.len() >= self.max_entries {
                    self.evict_soonest();
                }
                Arc::new(key)
            }
        };

        let eol = now.saturating_add(u64::from(ttl));
        self.deadlines.insert((eol, Arc::clone(&key)));
        self.entries.insert(
            key,
            CacheEntry {
                eol,
                crset: Arc::new(crset),
                ranking,
            },
        );
        true
    }

    /// Drops the nearest-to-expire entry, expired or not.
    fn evict_soonest(&mut self) {
        if let Some((_, key)) = self.deadlines.pop_first() {
            self.entries.remove(&key);
        }
    }

    /// Removes every entry with `eol ≤ now`. Returns the number removed.
    pub fn expire(&mut self, now: Timestamp) -> usize {
        let mut removed = 0;
        while self.expire_one(now) {
            removed += 1;
        }
        removed
    }

    /// Removes the minimum-deadline entry if it is expired.
    pub fn expire_one(&mut self, now: Timestamp) -> bool {
        match self.deadlines.first() {
            Some(&(eol, _)) if eol <= now => {
                if let Some((_, key)) = self.deadlines.pop_first() {
                    self.entries.remove(&key);
                }
                true
            }
            _ => false,
        }
    }

    /// Returns the key with the smallest deadline.
    pub fn min_key(&self) -> Option<&Key> {
        self.deadlines.first().map(|(_, key)| key.as_ref())
    }

    /// Returns the smallest deadline.
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.deadlines.first().map(|&(eol, _)| eol)
    }

    /// Iterates over all entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &CacheEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_ref(), v))
    }

    /// Serializable view of the whole store, for diagnostics.
    pub fn dump(&self) -> Vec<DumpEntry> {
        self.iter()
            .map(|(key, entry)| DumpEntry {
                key: key.clone(),
                eol: entry.eol,
                ranking: entry.ranking,
                records: entry.crset.len(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alder_proto::RecordType;
    use std::net::Ipv4Addr;
    use std::str::FromStr;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    fn a_key(s: &str) -> Key {
        Key::from_name(&name(s), Type::Known(RecordType::A), Class::IN)
    }

    fn a_data(last: u8) -> CRSet {
        CRSet::A(vec![Ipv4Addr::new(1, 2, 3, last)])
    }

    fn a_lookup(
        store: &CacheStore,
        now: Timestamp,
        s: &str,
    ) -> Option<(Vec<ResourceRecord>, Ranking)> {
        store.lookup(now, &name(s), Type::Known(RecordType::A), Class::IN)
    }

    #[test]
    fn insert_then_lookup_adjusts_ttl() {
        // t = 100: insert with TTL 300.
        let mut store = CacheStore::new(1024);
        assert!(store.insert(100, a_key("example.com"), 300, a_data(4), Ranking::Answer));

        // t = 200: one record, TTL 200.
        let (rrs, ranking) = a_lookup(&store, 200, "example.com").unwrap();
        assert_eq!(ranking, Ranking::Answer);
        assert_eq!(rrs.len(), 1);
        assert_eq!(rrs[0].ttl(), 200);
        assert_eq!(rrs[0].name(), &name("example.com"));

        // t = 401: past eol = 400, miss.
        assert!(a_lookup(&store, 401, "example.com").is_none());
        // Exactly at eol is also dead (eol − now < 1).
        assert!(a_lookup(&store, 400, "example.com").is_none());
        // Lookup is read-only.
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn higher_rank_supersedes() {
        let mut store = CacheStore::new(1024);
        assert!(store.insert(0, a_key("k.example"), 60, a_data(1), Ranking::Additional));
        assert!(store.insert(1, a_key("k.example"), 30, a_data(2), Ranking::AuthAnswer));

        let (rrs, ranking) = a_lookup(&store, 2, "k.example").unwrap();
        assert_eq!(ranking, Ranking::AuthAnswer);
        assert_eq!(rrs[0].ttl(), 29);
        assert_eq!(rrs[0].rdata().as_a(), Some(Ipv4Addr::new(1, 2, 3, 2)));
    }

    #[test]
    fn lower_or_equal_rank_is_a_no_op() {
        let mut store = CacheStore::new(1024);
        assert!(store.insert(0, a_key("k.example"), 60, a_data(1), Ranking::AuthAnswer));

        // Lower rank, even with a much longer TTL.
        assert!(!store.insert(1, a_key("k.example"), 600, a_data(2), Ranking::Additional));
        // Equal rank does not displace either.
        assert!(!store.insert(1, a_key("k.example"), 600, a_data(3), Ranking::AuthAnswer));

        let (rrs, ranking) = a_lookup(&store, 2, "k.example").unwrap();
        assert_eq!(ranking, Ranking::AuthAnswer);
        assert_eq!(rrs[0].ttl(), 58);
        assert_eq!(rrs[0].rdata().as_a(), Some(Ipv4Addr::new(1, 2, 3, 1)));
    }

    #[test]
    fn rank_reject_leaves_store_unchanged() {
        let mut store = CacheStore::new(1024);
        store.insert(0, a_key("keep.example"), 60, a_data(1), Ranking::AuthAnswer);
        // An expired neighbor stays put on a rejected insert.
        store.insert(0, a_key("stale.example"), 1, a_data(2), Ranking::Answer);

        assert!(!store.insert(10, a_key("keep.example"), 60, a_data(3), Ranking::Answer));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn insert_drains_expired_entries_first() {
        let mut store = CacheStore::new(1024);
        store.insert(0, a_key("short.example"), 5, a_data(1), Ranking::Answer);
        store.insert(0, a_key("long.example"), 500, a_data(2), Ranking::Answer);

        // t = 10: short.example is dead and gets drained by this insert.
        assert!(store.insert(10, a_key("new.example"), 60, a_data(3), Ranking::Answer));
        assert_eq!(store.len(), 2);
        assert!(a_lookup(&store, 10, "long.example").is_some());
        assert!(a_lookup(&store, 10, "short.example").is_none());
    }

    #[test]
    fn expired_entry_yields_to_any_rank() {
        let mut store = CacheStore::new(1024);
        store.insert(0, a_key("k.example"), 5, a_data(1), Ranking::AuthAnswer);

        // Entry is dead at t = 10; even Additional may take the key.
        assert!(store.insert(10, a_key("k.example"), 60, a_data(2), Ranking::Additional));
        let (_, ranking) = a_lookup(&store, 11, "k.example").unwrap();
        assert_eq!(ranking, Ranking::Additional);
    }

    #[test]
    fn capacity_evicts_nearest_to_expire() {
        let mut store = CacheStore::new(2);
        store.insert(0, a_key("k1.example"), 50, a_data(1), Ranking::Answer);
        store.insert(0, a_key("k2.example"), 100, a_data(2), Ranking::Answer);

        // Full: inserting k3 (eol 80) evicts k1 (eol 50, the smallest).
        assert!(store.insert(0, a_key("k3.example"), 80, a_data(3), Ranking::Answer));
        assert_eq!(store.len(), 2);
        assert!(a_lookup(&store, 1, "k1.example").is_none());
        assert!(a_lookup(&store, 1, "k2.example").is_some());
        assert!(a_lookup(&store, 1, "k3.example").is_some());
    }

    #[test]
    fn replacing_a_key_does_not_evict() {
        let mut store = CacheStore::new(2);
        store.insert(0, a_key("k1.example"), 50, a_data(1), Ranking::Additional);
        store.insert(0, a_key("k2.example"), 100, a_data(2), Ranking::Answer);

        // Same key at higher rank: replacement, no growth, no eviction.
        assert!(store.insert(1, a_key("k1.example"), 50, a_data(3), Ranking::Answer));
        assert_eq!(store.len(), 2);
        assert!(a_lookup(&store, 2, "k2.example").is_some());
    }

    #[test]
    fn expiration_sweep() {
        let mut store = CacheStore::new(1024);
        store.insert(0, a_key("a.example"), 10, a_data(1), Ranking::Answer);
        store.insert(0, a_key("b.example"), 20, a_data(2), Ranking::Answer);
        store.insert(0, a_key("c.example"), 30, a_data(3), Ranking::Answer);

        assert_eq!(store.expire(20), 2);
        assert_eq!(store.len(), 1);
        // Postcondition: nothing left with eol ≤ now.
        assert!(store.iter().all(|(_, e)| e.eol() > 20));
        // Nothing more to do.
        assert_eq!(store.expire(20), 0);
    }

    #[test]
    fn expire_one_drops_at_most_one() {
        let mut store = CacheStore::new(1024);
        store.insert(0, a_key("a.example"), 10, a_data(1), Ranking::Answer);
        store.insert(0, a_key("b.example"), 10, a_data(2), Ranking::Answer);

        assert!(store.expire_one(50));
        assert_eq!(store.len(), 1);
        assert!(store.expire_one(50));
        assert!(!store.expire_one(50));
        assert!(store.is_empty());
    }

    #[test]
    fn min_key_tracks_smallest_deadline() {
        let mut store = CacheStore::new(1024);
        assert!(store.min_key().is_none());

        store.insert(0, a_key("late.example"), 100, a_data(1), Ranking::Answer);
        store.insert(0, a_key("soon.example"), 10, a_data(2), Ranking::Answer);

        assert_eq!(store.min_key().unwrap(), &a_key("soon.example"));
        assert_eq!(store.next_deadline(), Some(10));
        let min = store.min_key().unwrap().clone();
        let min_eol = store.get(&min).unwrap().eol();
        assert!(store.iter().all(|(_, e)| e.eol() >= min_eol));
    }

    #[test]
    fn deadline_ties_break_by_key_order() {
        let mut store = CacheStore::new(2);
        store.insert(0, a_key("b.example"), 50, a_data(1), Ranking::Answer);
        store.insert(0, a_key("a.example"), 50, a_data(2), Ranking::Answer);

        // Same eol on both; the smaller key goes first.
        assert!(store.insert(0, a_key("c.example"), 60, a_data(3), Ranking::Answer));
        assert!(a_lookup(&store, 1, "a.example").is_none());
        assert!(a_lookup(&store, 1, "b.example").is_some());
    }

    #[test]
    fn corrupt_time_reads_as_expired() {
        let mut store = CacheStore::new(1024);
        let far = 10_000_000_000;
        store.insert(far, a_key("k.example"), 300, a_data(1), Ranking::Answer);

        // Normal read.
        assert!(a_lookup(&store, far + 100, "k.example").is_some());
        // Past eol: miss.
        assert!(a_lookup(&store, far + 301, "k.example").is_none());
        // Clock ran backwards so far that eol − now overflows a u32 TTL
        // field: treated as expired rather than wrapped.
        assert!(a_lookup(&store, 0, "k.example").is_none());
    }

    #[test]
    fn dump_reflects_contents() {
        let mut store = CacheStore::new(1024);
        store.insert(0, a_key("k.example"), 60, CRSet::A(vec![
            Ipv4Addr::new(1, 1, 1, 1),
            Ipv4Addr::new(2, 2, 2, 2),
        ]), Ranking::Answer);

        let dump = store.dump();
        assert_eq!(dump.len(), 1);
        assert_eq!(dump[0].eol, 60);
        assert_eq!(dump[0].records, 2);
        assert_eq!(dump[0].ranking, Ranking::Answer);
    }
}
