//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters and histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Metric labels stay low-cardinality (status, page type); request
//!   URLs go to log events, never into labels
//! - Recording is infallible: a missing exporter degrades to no-ops

pub mod logging;
pub mod metrics;
