//! Route resolution subsystem.
//!
//! # Data Flow
//! ```text
//! inbound URL path
//!     → resolver.rs (service / variant / AMP / id extraction)
//!     → RouteDescriptor (immutable, request-scoped)
//!     → dispatcher picks the page-data fetcher by page type
//! ```
//!
//! # Design Decisions
//! - Known services come from config, not a hardcoded list
//! - Page kinds are a closed enum; dispatch is an exhaustive match
//! - Id extraction is idempotent across suffix-stripping order

pub mod resolver;

pub use resolver::{PageType, ResolveError, RouteDescriptor, RouteResolver};
