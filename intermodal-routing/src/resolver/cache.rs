//! Directional result cache keyed by location ids.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use intermodal_core::RouteFacts;
use tokio::time::Instant;

type CacheKey = (String, String);

#[derive(Debug)]
struct CacheState {
    entries: HashMap<CacheKey, RouteFacts>,
    last_cleared: Instant,
}

/// Process-lifetime cache of resolved pairs.
///
/// Entries live until [`clear`](Self::clear) is called or, when an expiry is
/// configured, until that much time has passed since the last clear, at which
/// point every entry is dropped at once.
#[derive(Debug)]
pub(crate) struct RouteCache {
    expiry: Option<Duration>,
    state: Mutex<CacheState>,
}

impl RouteCache {
    pub(crate) fn new(expiry: Option<Duration>) -> Self {
        Self {
            expiry,
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                last_cleared: Instant::now(),
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheState> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(expiry) = self.expiry {
            if state.last_cleared.elapsed() >= expiry {
                state.entries.clear();
                state.last_cleared = Instant::now();
            }
        }
        state
    }

    pub(crate) fn get(&self, origin: &str, destination: &str) -> Option<RouteFacts> {
        self.lock()
            .entries
            .get(&(origin.to_owned(), destination.to_owned()))
            .copied()
    }

    /// Store `facts`. A concurrent [`clear`](Self::clear) racing with an
    /// in-flight resolve may be followed by this write.
    pub(crate) fn insert(&self, origin: &str, destination: &str, facts: RouteFacts) {
        self.lock()
            .entries
            .insert((origin.to_owned(), destination.to_owned()), facts);
    }

    pub(crate) fn clear(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.entries.clear();
        state.last_cleared = Instant::now();
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const FACTS: RouteFacts = RouteFacts {
        distance_km: 10.0,
        duration_hours: 0.2,
    };

    #[rstest]
    fn keys_are_directional() {
        let cache = RouteCache::new(None);
        cache.insert("A", "B", FACTS);

        assert_eq!(cache.get("A", "B"), Some(FACTS));
        assert_eq!(cache.get("B", "A"), None);
    }

    #[rstest]
    fn clear_drops_everything() {
        let cache = RouteCache::new(None);
        cache.insert("A", "B", FACTS);
        cache.insert("B", "C", FACTS);

        cache.clear();

        assert_eq!(cache.len(), 0);
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn expiry_clears_the_whole_cache() {
        let cache = RouteCache::new(Some(Duration::from_secs(60)));
        cache.insert("A", "B", FACTS);
        tokio::time::sleep(Duration::from_secs(30)).await;
        cache.insert("B", "C", FACTS);
        assert_eq!(cache.len(), 2);

        tokio::time::sleep(Duration::from_secs(31)).await;

        assert_eq!(cache.get("B", "C"), None);
        assert_eq!(cache.len(), 0);
    }
}
