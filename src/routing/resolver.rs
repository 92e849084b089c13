//! URL path to route descriptor resolution.
//!
//! # Responsibilities
//! - Match `/{service}/topics/{id}` and `/{service}/{variant}/topics/{id}`
//! - Detect the `.amp` presentation suffix on the final segment
//! - Map URL variant segments to variant codes (e.g. "cyr" -> "sr-cyrl")
//! - Extract the opaque content id, stripping non-identifier suffixes
//!
//! # Design Decisions
//! - Segment matching, no regex: shapes are fixed and O(n) is guaranteed
//! - Query strings and `.amp` markers never reach the extracted id,
//!   regardless of the order they appear in

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;

use crate::config::ServiceConfig;

/// Kinds of page this server can render.
///
/// Adding a variant forces every dispatch site to handle it; there is no
/// lookup-table fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageType {
    Topic,
}

impl PageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageType::Topic => "Topic",
        }
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the pipeline needs to know about a matched route.
///
/// Created per request, immutable once resolved, discarded after the
/// response is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// Service slug (e.g. "pidgin").
    pub service: String,

    /// Variant code for multi-script services (e.g. "sr-cyrl").
    pub variant: Option<String>,

    /// Whether the AMP presentation of the page was requested.
    pub is_amp: bool,

    /// The kind of page this route serves.
    pub page_type: PageType,

    /// Opaque content identifier taken from the trailing path segment.
    pub id: String,
}

/// Errors from route resolution. Fatal to the request; mapped to 404.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("no route matches path '{0}'")]
    NoMatch(String),

    #[error("unknown service '{service}' in path '{path}'")]
    UnknownService { service: String, path: String },

    #[error("empty identifier in path '{0}'")]
    EmptyId(String),
}

/// Maps raw URL paths onto route descriptors.
pub struct RouteResolver {
    /// service name -> (variant segment -> variant code)
    services: HashMap<String, BTreeMap<String, String>>,
}

impl RouteResolver {
    pub fn from_config(services: Vec<ServiceConfig>) -> Self {
        Self {
            services: services
                .into_iter()
                .map(|s| (s.name, s.variants))
                .collect(),
        }
    }

    /// Resolve a raw URL path (query string tolerated) to a route.
    pub fn resolve(&self, raw_path: &str) -> Result<RouteDescriptor, ResolveError> {
        let path = raw_path.split('?').next().unwrap_or(raw_path);
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

        let (service, variant_segment, kind, last) = match segments.as_slice() {
            [service, kind, last] => (*service, None, *kind, *last),
            [service, variant, kind, last] => (*service, Some(*variant), *kind, *last),
            _ => return Err(ResolveError::NoMatch(raw_path.to_string())),
        };

        if kind != "topics" {
            return Err(ResolveError::NoMatch(raw_path.to_string()));
        }

        let variants = self
            .services
            .get(service)
            .ok_or_else(|| ResolveError::UnknownService {
                service: service.to_string(),
                path: raw_path.to_string(),
            })?;

        let variant = match variant_segment {
            Some(segment) => Some(
                variants
                    .get(segment)
                    .cloned()
                    .ok_or_else(|| ResolveError::NoMatch(raw_path.to_string()))?,
            ),
            None => None,
        };

        let is_amp = last.split('?').next().unwrap_or(last).ends_with(".amp");
        let id = extract_id(last);
        if id.is_empty() {
            return Err(ResolveError::EmptyId(raw_path.to_string()));
        }

        Ok(RouteDescriptor {
            service: service.to_string(),
            variant,
            is_amp,
            page_type: PageType::Topic,
            id,
        })
    }
}

/// Strip non-identifier suffixes (`.amp` marker, query string) from a
/// trailing path segment.
///
/// Truncating at the first `.` or `?` makes the result independent of the
/// order the suffixes appear in.
fn extract_id(segment: &str) -> String {
    segment
        .split(['.', '?'])
        .next()
        .unwrap_or_default()
        .to_string()
}
