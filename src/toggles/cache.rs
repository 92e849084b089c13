//! Process-wide per-service toggle cache.
//!
//! # Responsibilities
//! - Serve cached toggle sets while they are within their TTL
//! - Refresh stale entries through the injected fetcher
//! - Serve stale (or empty) sets when the fetch fails
//!
//! # Design Decisions
//! - DashMap gives concurrent readers; refreshes race benignly and the
//!   last writer wins on a stale entry
//! - Time comes from an injected Clock so TTL behavior is testable
//! - No background refresh task: entries refresh on demand, keeping the
//!   cache's lifetime bounded by the process

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::observability::metrics;
use crate::toggles::{ToggleFetchError, ToggleSet};

/// Source of monotonic time, injected for testability.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// The real clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Fetches the toggle set for one service.
#[async_trait]
pub trait ToggleFetcher: Send + Sync {
    async fn fetch(&self, service: &str) -> Result<ToggleSet, ToggleFetchError>;
}

struct CachedEntry {
    toggles: ToggleSet,
    fetched_at: Instant,
}

/// Per-service toggle cache with TTL refresh and fail-open fallback.
pub struct ToggleCache {
    entries: DashMap<String, CachedEntry>,
    fetcher: Box<dyn ToggleFetcher>,
    clock: Box<dyn Clock>,
    ttl: Duration,
}

impl ToggleCache {
    pub fn new(fetcher: Box<dyn ToggleFetcher>, clock: Box<dyn Clock>, ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            fetcher,
            clock,
            ttl,
        }
    }

    /// Toggle set for a service. Never fails: a fetch failure yields the
    /// stale entry if one exists, else the empty set.
    pub async fn get(&self, service: &str) -> ToggleSet {
        let now = self.clock.now();

        if let Some(entry) = self.entries.get(service) {
            if now.duration_since(entry.fetched_at) < self.ttl {
                metrics::record_toggle_cache(true);
                return entry.toggles.clone();
            }
        }
        metrics::record_toggle_cache(false);

        // Refresh without holding a map lock across the await.
        match self.fetcher.fetch(service).await {
            Ok(toggles) => {
                self.entries.insert(
                    service.to_string(),
                    CachedEntry {
                        toggles: toggles.clone(),
                        fetched_at: now,
                    },
                );
                toggles
            }
            Err(error) => {
                tracing::warn!(service, error = %error, "Toggle fetch failed, serving fallback");
                self.entries
                    .get(service)
                    .map(|entry| entry.toggles.clone())
                    .unwrap_or_default()
            }
        }
    }
}
