//! Single-slot response cache.
//!
//! Holds the last successfully built [`ResponseEnvelope`] and the time it was
//! fetched. The lock is only held to copy the slot in or out, so concurrent
//! misses each go upstream and the last `put` wins.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use twse_market_data::ResponseEnvelope;

/// Source of the current time, abstracted for testing purposes.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Cache entry for the response envelope.
struct CachedEnvelope {
    envelope: ResponseEnvelope,
    cached_at: DateTime<Utc>,
}

pub struct TtlCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    slot: RwLock<Option<CachedEnvelope>>,
}

impl TtlCache {
    /// Creates an empty cache; the first `get` is always a miss.
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            slot: RwLock::new(None),
        }
    }

    /// Current time according to the cache's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Returns the stored envelope if it is at most `ttl` old.
    pub async fn get(&self) -> Option<ResponseEnvelope> {
        let now = self.clock.now();
        let slot = self.slot.read().await;
        let cached = slot.as_ref()?;

        // A negative age means the clock stepped back; still treat as fresh
        let fresh = match (now - cached.cached_at).to_std() {
            Ok(age) => age <= self.ttl,
            Err(_) => true,
        };

        if fresh {
            debug!(cached_at = %cached.cached_at, "Cache hit");
            Some(cached.envelope.clone())
        } else {
            debug!(cached_at = %cached.cached_at, "Cache entry expired");
            None
        }
    }

    /// Overwrites the slot unconditionally.
    pub async fn put(&self, envelope: ResponseEnvelope, cached_at: DateTime<Utc>) {
        *self.slot.write().await = Some(CachedEnvelope {
            envelope,
            cached_at,
        });
    }

    /// When the current slot was fetched, if anything is stored.
    pub async fn stored_at(&self) -> Option<DateTime<Utc>> {
        self.slot.read().await.as_ref().map(|c| c.cached_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Mutex;

    struct ManualClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        fn advance(&self, by: Duration) {
            *self.now.lock().unwrap() += chrono::Duration::from_std(by).unwrap();
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 1, 30, 0).unwrap()
    }

    fn envelope(marker: &str) -> ResponseEnvelope {
        ResponseEnvelope::failure(marker)
    }

    fn cache_with_clock() -> (TtlCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock {
            now: Mutex::new(start()),
        });
        let cache = TtlCache::new(Duration::from_secs(5), clock.clone());
        (cache, clock)
    }

    #[tokio::test]
    async fn test_empty_cache_misses() {
        let (cache, _) = cache_with_clock();
        assert!(cache.get().await.is_none());
        assert!(cache.stored_at().await.is_none());
    }

    #[tokio::test]
    async fn test_fresh_until_ttl_inclusive() {
        let (cache, clock) = cache_with_clock();
        cache.put(envelope("a"), clock.now()).await;

        assert_eq!(cache.get().await, Some(envelope("a")));

        clock.advance(Duration::from_secs(5));
        assert_eq!(cache.get().await, Some(envelope("a")));

        clock.advance(Duration::from_millis(1));
        assert!(cache.get().await.is_none());
        // Expired entries stay in the slot until overwritten
        assert_eq!(cache.stored_at().await, Some(start()));
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let (cache, clock) = cache_with_clock();
        cache.put(envelope("a"), clock.now()).await;
        clock.advance(Duration::from_secs(10));
        cache.put(envelope("b"), clock.now()).await;

        assert_eq!(cache.get().await, Some(envelope("b")));
    }

    #[tokio::test]
    async fn test_clock_stepping_back_is_fresh() {
        let (cache, clock) = cache_with_clock();
        cache
            .put(envelope("a"), clock.now() + chrono::Duration::seconds(30))
            .await;
        assert_eq!(cache.get().await, Some(envelope("a")));
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock;
        let first = clock.now();
        assert!(clock.now() >= first);
    }
}
