//! The single-writer update pipeline.
//!
//! All cache mutations flow through one bounded queue into one worker task.
//! The worker applies each command against the current store, builds the
//! successor value, and publishes it through the shared `ArcSwap` cell, so
//! readers on other threads always observe a consistent snapshot.

use crate::clock::{Clock, Timestamp};
use crate::crset::CRSet;
use crate::handle::CacheStats;
use crate::key::Key;
use crate::ranking::Ranking;
use crate::store::CacheStore;
use arc_swap::ArcSwap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// A command on the update queue.
#[derive(Debug, Clone)]
pub(crate) enum Update {
    /// Admit an RRSet (from the facade's insert path).
    Insert {
        /// Submission time.
        now: Timestamp,
        /// The RRSet's identity.
        key: Key,
        /// TTL relative to `now`.
        ttl: u32,
        /// The RRSet's data.
        crset: CRSet,
        /// Admission rank.
        ranking: Ranking,
    },
    /// Sweep expired entries (from the ticker).
    Expire {
        /// Tick time.
        now: Timestamp,
        /// Rendered tick time, for the sweep log line.
        timestr: String,
    },
}

/// Applies one command to the current store.
///
/// Returns the successor store, or `None` when the command changes nothing
/// (rank-rejected insert, sweep with nothing expired) so the worker can
/// skip the publish. A rejected insert must leave the cache exactly as it
/// was, so the expired-drain that insert performs only happens once
/// admission is certain.
fn apply(current: &CacheStore, update: Update) -> Option<CacheStore> {
    match update {
        Update::Insert {
            now,
            key,
            ttl,
            crset,
            ranking,
        } => {
            if !current.admits(now, &key, ranking) {
                return None;
            }
            debug!(key = %key, ttl, ?ranking, "cache entry admitted");
            let mut next = current.clone();
            next.insert(now, key, ttl, crset, ranking);
            Some(next)
        }
        Update::Expire { now, .. } => match current.next_deadline() {
            Some(deadline) if deadline <= now => {
                let mut next = current.clone();
                next.expire(now);
                Some(next)
            }
            _ => None,
        },
    }
}

/// The single writer: drains the queue until every sender is gone.
///
/// A panic while applying a command is caught and logged; the loop
/// continues and the published state stays whatever it was before the
/// faulty command.
pub(crate) async fn update_worker(
    cell: Arc<ArcSwap<CacheStore>>,
    mut rx: mpsc::Receiver<Update>,
    stats: Arc<CacheStats>,
) {
    while let Some(update) = rx.recv().await {
        let current = cell.load_full();
        let tick = match &update {
            Update::Expire { timestr, .. } => Some(timestr.clone()),
            Update::Insert { .. } => None,
        };

        match catch_unwind(AssertUnwindSafe(|| apply(&current, update))) {
            Ok(Some(next)) => {
                let size = next.len();
                if let Some(at) = tick {
                    let removed = current.len().saturating_sub(size);
                    stats.record_expired(removed as u64);
                    info!(size, removed, %at, "cache expiration sweep");
                }
                // Release-store; lookups acquire-load the cell.
                cell.store(Arc::new(next));
            }
            Ok(None) => {}
            Err(_) => warn!("cache update panicked; state unchanged"),
        }
    }
    debug!("cache update worker stopped");
}

/// Enqueues an expiration sweep once per `period`.
///
/// Blocks with the other producers when the queue is full. Stops once the
/// worker side is gone.
pub(crate) async fn ticker(clock: Arc<dyn Clock>, tx: mpsc::Sender<Update>, period: Duration) {
    loop {
        tokio::time::sleep(period).await;
        let update = match catch_unwind(AssertUnwindSafe(|| Update::Expire {
            now: clock.now(),
            timestr: clock.timestr(),
        })) {
            Ok(update) => update,
            Err(_) => {
                warn!("clock read panicked; skipping tick");
                continue;
            }
        };
        if tx.send(update).await.is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alder_proto::{Class, Name, RecordType, Type};
    use std::net::Ipv4Addr;
    use std::str::FromStr;

    fn a_key(s: &str) -> Key {
        Key::from_name(
            &Name::from_str(s).unwrap(),
            Type::Known(RecordType::A),
            Class::IN,
        )
    }

    fn insert(now: Timestamp, s: &str, ttl: u32, ranking: Ranking) -> Update {
        Update::Insert {
            now,
            key: a_key(s),
            ttl,
            crset: CRSet::A(vec![Ipv4Addr::new(192, 0, 2, 1)]),
            ranking,
        }
    }

    #[test]
    fn insert_produces_successor() {
        let store = CacheStore::new(16);
        let next = apply(&store, insert(0, "k.example", 60, Ranking::Answer)).unwrap();
        assert_eq!(next.len(), 1);
        // The input value is untouched.
        assert!(store.is_empty());
    }

    #[test]
    fn rejected_insert_is_no_change() {
        let mut store = CacheStore::new(16);
        store.insert(
            0,
            a_key("k.example"),
            60,
            CRSet::A(vec![Ipv4Addr::new(192, 0, 2, 1)]),
            Ranking::AuthAnswer,
        );
        assert!(apply(&store, insert(1, "k.example", 600, Ranking::Additional)).is_none());
    }

    #[test]
    fn expire_only_changes_when_something_is_due() {
        let mut store = CacheStore::new(16);
        store.insert(
            0,
            a_key("k.example"),
            10,
            CRSet::A(vec![Ipv4Addr::new(192, 0, 2, 1)]),
            Ranking::Answer,
        );

        let early = Update::Expire {
            now: 5,
            timestr: String::new(),
        };
        assert!(apply(&store, early).is_none());

        let due = Update::Expire {
            now: 10,
            timestr: String::new(),
        };
        let next = apply(&store, due).unwrap();
        assert!(next.is_empty());
    }
}
