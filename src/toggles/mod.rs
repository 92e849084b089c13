//! Feature toggle subsystem.
//!
//! # Data Flow
//! ```text
//! dispatcher asks cache.rs for the service's toggle set
//!     → fresh entry: served from the map
//!     → stale/missing: fetcher.rs fetches, cache stores (last writer wins)
//!     → fetch failure: stale value if present, else empty set
//! ```
//!
//! # Design Decisions
//! - Fail-open: a flaky toggle fetch must never take down rendering.
//!   Callers that require `enabled == true` get `false` from an empty
//!   set, which is the fail-closed side of the same policy.
//! - The cache is an owned object with an injected clock and fetcher,
//!   created at startup and passed by reference into the dispatcher.

pub mod cache;
pub mod fetcher;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use cache::{Clock, SystemClock, ToggleCache, ToggleFetcher};
pub use fetcher::HttpToggleFetcher;

use crate::upstream::FetchError;

/// A single named feature flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toggle {
    #[serde(default)]
    pub enabled: bool,
}

/// All toggles known for one service. BTreeMap keeps serialization
/// order stable so rendered documents stay deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToggleSet(pub BTreeMap<String, Toggle>);

impl ToggleSet {
    /// True only when the toggle exists and is enabled.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.0.get(name).map(|t| t.enabled).unwrap_or(false)
    }

    pub fn with(mut self, name: &str, enabled: bool) -> Self {
        self.0.insert(name.to_string(), Toggle { enabled });
        self
    }
}

/// Errors from the toggle endpoint. Always swallowed by the cache.
#[derive(Debug, thiserror::Error)]
pub enum ToggleFetchError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("malformed toggle payload: {0}")]
    Malformed(String),
}
