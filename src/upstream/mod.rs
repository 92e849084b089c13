//! Upstream page-data subsystem.
//!
//! # Data Flow
//! ```text
//! RouteDescriptor + page query
//!     → topic.rs (compose request URL, fixed parameter order)
//!     → client.rs (bounded JSON GET with ctx-service-env header)
//!     → envelope.rs (tagged success/error PageDataEnvelope)
//! ```
//!
//! # Design Decisions
//! - Fetch failures never escape this boundary: every failure is folded
//!   into an error envelope carrying an inferred status code
//! - The fetch is a side-effect-free GET; callers may wrap it in their
//!   own retry policy, the core carries no retry loop
//! - A timeout is not distinguished from a connection failure at the
//!   envelope level, only in logs

pub mod client;
pub mod envelope;
pub mod topic;

pub use client::JsonClient;
pub use envelope::{EnvelopeResult, PageData, PageDataEnvelope, PageMetadata, Pagination, Promo};
pub use topic::PageDataFetcher;

/// Outbound header carrying the content environment.
pub const CTX_SERVICE_ENV: &str = "ctx-service-env";

/// Which content environment the upstream should serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEnv {
    Live,
    Test,
}

impl ContentEnv {
    /// Derive the environment from the inbound request URL.
    ///
    /// The `renderer_env=test` marker routes the upstream call to test
    /// content; it is consumed here and must not leak into the outbound
    /// id or query construction.
    pub fn from_request_url(url: &str) -> Self {
        if url.contains("renderer_env=test") {
            ContentEnv::Test
        } else {
            ContentEnv::Live
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentEnv::Live => "live",
            ContentEnv::Test => "test",
        }
    }
}

/// Errors from an upstream call. Recovered locally into an error
/// envelope; never propagated to the dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("upstream connection failed: {0}")]
    Transport(String),

    #[error("upstream request timed out after {0}ms")]
    Timeout(u64),

    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("malformed upstream body: {0}")]
    MalformedBody(String),

    #[error("invalid upstream url: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Status code for the error envelope. Only a non-2xx upstream reply
    /// carries an explicit code; everything else falls back to the
    /// configured default.
    pub fn status_code(&self, default: u16) -> u16 {
        match self {
            FetchError::Status(status) => *status,
            _ => default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_derived_from_marker() {
        assert_eq!(
            ContentEnv::from_request_url("/pidgin/topics/54321?renderer_env=test"),
            ContentEnv::Test
        );
        assert_eq!(
            ContentEnv::from_request_url("/pidgin/topics/54321?foo=bar"),
            ContentEnv::Live
        );
        assert_eq!(
            ContentEnv::from_request_url("/pidgin/topics/54321"),
            ContentEnv::Live
        );
    }

    #[test]
    fn status_inference_uses_explicit_code_when_present() {
        assert_eq!(FetchError::Status(404).status_code(500), 404);
        assert_eq!(FetchError::Timeout(4000).status_code(500), 500);
        assert_eq!(
            FetchError::Transport("refused".into()).status_code(502),
            502
        );
    }
}
