//! The shared cache facade.
//!
//! [`SharedCache`] is the handle the rest of the resolver holds: lookups
//! load the current store snapshot and never block; inserts enqueue onto
//! the bounded update queue and wait only for queue space. A disabled
//! variant keeps the call sites uniform when caching is turned off.

use crate::clock::{Clock, SystemClock};
use crate::crset::CRSet;
use crate::extract::{extract_section, Section};
use crate::key::Key;
use crate::ranking::Ranking;
use crate::rrset::RejectedRRSet;
use crate::store::CacheStore;
use crate::update::{ticker, update_worker, Update};
use crate::CacheConfig;
use alder_proto::{Class, Message, Name, ResourceRecord, Type};
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Cache activity counters.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    expired: AtomicU64,
}

impl CacheStats {
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_expired(&self, n: u64) {
        self.expired.fetch_add(n, Ordering::Relaxed);
    }

    /// Lookups that found a live entry.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Lookups that found nothing.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Insert submissions (before rank admission).
    pub fn inserts(&self) -> u64 {
        self.inserts.load(Ordering::Relaxed)
    }

    /// Entries removed by expiration sweeps.
    pub fn expired(&self) -> u64 {
        self.expired.load(Ordering::Relaxed)
    }

    /// Hit fraction over all lookups so far.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}

/// State behind an active (caching) handle.
struct ActiveCache {
    /// The published store; readers acquire-load, the worker release-stores.
    cell: Arc<ArcSwap<CacheStore>>,
    /// Injected time source.
    clock: Arc<dyn Clock>,
    /// Producer side of the update queue; `None` once shut down.
    tx: Mutex<Option<mpsc::Sender<Update>>>,
    /// Configured queue capacity.
    queue_depth: usize,
    /// Activity counters.
    stats: Arc<CacheStats>,
    /// The single update worker.
    worker: Mutex<Option<JoinHandle<()>>>,
    /// The expiration ticker.
    ticker: Mutex<Option<JoinHandle<()>>>,
}

#[derive(Clone)]
enum Inner {
    Active(Arc<ActiveCache>),
    Disabled(Arc<CacheStats>),
}

/// A cheaply cloneable handle to the shared RRSet cache.
#[derive(Clone)]
pub struct SharedCache {
    inner: Inner,
}

impl SharedCache {
    /// Starts the cache: spawns the update worker and the expiration
    /// ticker, and returns the handle.
    ///
    /// Must be called within a tokio runtime. A `max_entries` of 0 turns
    /// caching off entirely and returns the [disabled](Self::disabled)
    /// variant.
    pub fn start(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        if config.max_entries == 0 {
            return Self::disabled();
        }

        let queue_depth = config.queue_depth.max(1);
        let cell = Arc::new(ArcSwap::from_pointee(CacheStore::new(config.max_entries)));
        let stats = Arc::new(CacheStats::default());
        let (tx, rx) = mpsc::channel(queue_depth);

        let worker = tokio::spawn(update_worker(Arc::clone(&cell), rx, Arc::clone(&stats)));
        let tick = tokio::spawn(ticker(Arc::clone(&clock), tx.clone(), config.tick_interval));

        Self {
            inner: Inner::Active(Arc::new(ActiveCache {
                cell,
                clock,
                tx: Mutex::new(Some(tx)),
                queue_depth,
                stats,
                worker: Mutex::new(Some(worker)),
                ticker: Mutex::new(Some(tick)),
            })),
        }
    }

    /// Starts the cache on the system clock.
    pub fn start_with_system_clock(config: CacheConfig) -> Self {
        Self::start(config, Arc::new(SystemClock))
    }

    /// A handle that caches nothing: lookups always miss, inserts are
    /// no-ops, snapshots are empty.
    pub fn disabled() -> Self {
        Self {
            inner: Inner::Disabled(Arc::new(CacheStats::default())),
        }
    }

    /// Returns true unless this is the disabled variant.
    pub fn is_enabled(&self) -> bool {
        matches!(self.inner, Inner::Active(_))
    }

    /// Looks up a live RRSet. Non-blocking; never fails.
    ///
    /// On a hit, the records carry their remaining TTL and the rank the
    /// data was admitted at.
    pub fn lookup(
        &self,
        name: &Name,
        rtype: Type,
        rclass: Class,
    ) -> Option<(Vec<ResourceRecord>, Ranking)> {
        match &self.inner {
            Inner::Active(inner) => {
                let now = inner.clock.now();
                let store = inner.cell.load();
                match store.lookup(now, name, rtype, rclass) {
                    Some(found) => {
                        inner.stats.record_hit();
                        Some(found)
                    }
                    None => {
                        inner.stats.record_miss();
                        None
                    }
                }
            }
            Inner::Disabled(stats) => {
                stats.record_miss();
                None
            }
        }
    }

    /// Submits an RRSet for admission.
    ///
    /// Waits while the update queue is full (backpressure onto request
    /// workers); rank admission itself happens later on the update worker.
    /// A no-op on the disabled variant and after shutdown.
    pub async fn insert(&self, key: Key, ttl: u32, crset: CRSet, ranking: Ranking) {
        let Inner::Active(inner) = &self.inner else {
            return;
        };
        let tx = inner.tx.lock().clone();
        let Some(tx) = tx else {
            return;
        };

        inner.stats.record_insert();
        let update = Update::Insert {
            now: inner.clock.now(),
            key,
            ttl,
            crset,
            ranking,
        };
        // Err only when the worker is gone, i.e. during teardown.
        let _ = tx.send(update).await;
    }

    /// Extracts one section of a reply and submits every accepted RRSet at
    /// the section's rank. Returns the rejected groups for the caller to
    /// log.
    pub async fn insert_section(&self, msg: &Message, section: Section) -> Vec<RejectedRRSet> {
        if !self.is_enabled() {
            return Vec::new();
        }
        let Some(sets) = extract_section(msg, section) else {
            return Vec::new();
        };
        for rrset in sets.rrsets {
            self.insert(rrset.key, rrset.ttl, rrset.crset, sets.ranking)
                .await;
        }
        sets.rejected
    }

    /// Returns a consistent point-in-time view of the whole store.
    pub fn snapshot(&self) -> Arc<CacheStore> {
        match &self.inner {
            Inner::Active(inner) => inner.cell.load_full(),
            Inner::Disabled(_) => Arc::new(CacheStore::new(0)),
        }
    }

    /// Returns (current depth, capacity) of the update queue.
    pub fn queue_sizes(&self) -> (usize, usize) {
        match &self.inner {
            Inner::Active(inner) => {
                let guard = inner.tx.lock();
                match guard.as_ref() {
                    Some(tx) => (inner.queue_depth - tx.capacity(), inner.queue_depth),
                    None => (0, inner.queue_depth),
                }
            }
            Inner::Disabled(_) => (0, 0),
        }
    }

    /// Returns the activity counters.
    pub fn stats(&self) -> &CacheStats {
        match &self.inner {
            Inner::Active(inner) => &inner.stats,
            Inner::Disabled(stats) => stats,
        }
    }

    /// Stops the ticker, closes the queue, and waits for the worker to
    /// drain what was already enqueued.
    ///
    /// Inserts submitted after this return silently do nothing; lookups
    /// keep serving the final published snapshot.
    pub async fn shutdown(&self) {
        let Inner::Active(inner) = &self.inner else {
            return;
        };

        let tick = inner.ticker.lock().take();
        if let Some(tick) = tick {
            tick.abort();
            let _ = tick.await;
        }

        // Dropping the last producer lets the worker finish its backlog and
        // exit.
        drop(inner.tx.lock().take());

        let worker = inner.worker.lock().take();
        if let Some(worker) = worker {
            let _ = worker.await;
        }
    }
}
