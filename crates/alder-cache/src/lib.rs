//! # Alder Shared Cache
//!
//! The in-memory RRSet cache shared by the alder resolver's request
//! workers: a TTL-indexed, rank-aware store with a single-writer update
//! pipeline.
//!
//! ## Architecture
//!
//! - **Data model**: cached RRSets are held as compact [`CRSet`] values
//!   keyed by (owner name, type, class), each carrying an RFC 2181 §5.4.1
//!   admission [`Ranking`] and an absolute expiry time.
//! - **Store**: a key-indexed map paired with a deadline index (the
//!   priority-search-queue pattern), so point lookups and
//!   minimum-deadline expiration are both O(log n).
//! - **Concurrency**: all mutations funnel through one bounded queue into
//!   one worker task, which publishes successor store values through an
//!   atomically replaced cell. Lookups load the current snapshot and never
//!   block; a once-per-second ticker drives expiration.
//!
//! ## Example
//!
//! ```rust,no_run
//! use alder_cache::{CacheConfig, SharedCache};
//! use alder_proto::{Class, Name, RecordType, Type};
//! use std::str::FromStr;
//!
//! # async fn example() {
//! let cache = SharedCache::start_with_system_clock(CacheConfig::default());
//! let hit = cache.lookup(
//!     &Name::from_str("example.com.").unwrap(),
//!     Type::Known(RecordType::A),
//!     Class::IN,
//! );
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clock;
pub mod crset;
pub mod extract;
pub mod handle;
pub mod key;
pub mod ranking;
pub mod rrset;
pub mod store;

mod update;

pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use crset::{CRSet, MxData, SoaData, TxtData};
pub use extract::{extract_section, Section, SectionRRSets};
pub use handle::{CacheStats, SharedCache};
pub use key::{CName, Key};
pub use ranking::Ranking;
pub use rrset::{extract_rrset, rr_set_key, take_rrset, CachedRRSet, RRSetError, RejectedRRSet};
pub use store::{CacheEntry, CacheStore, DumpEntry};

use std::time::Duration;

/// Shared cache configuration.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries. 0 disables caching entirely.
    pub max_entries: usize,

    /// Capacity of the bounded update queue.
    pub queue_depth: usize,

    /// Period of the expiration ticker.
    pub tick_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 100_000,
            queue_depth: 8,
            tick_interval: Duration::from_secs(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.max_entries, 100_000);
        assert_eq!(config.queue_depth, 8);
        assert_eq!(config.tick_interval, Duration::from_secs(1));
    }
}
