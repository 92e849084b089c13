//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the render
//! service. All types derive Serde traits for deserialization from config
//! files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the render service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream content API (BFF) settings.
    pub upstream: UpstreamConfig,

    /// Feature toggle endpoint and cache settings.
    pub toggles: TogglesConfig,

    /// Known services (language editions) and their variant mappings.
    pub services: Vec<ServiceConfig>,

    /// Static asset settings (public dir, chunk manifest, origins).
    pub assets: AssetsConfig,

    /// Response header settings.
    pub response: ResponseConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:7080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:7080".to_string(),
        }
    }
}

/// Upstream content API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the page-data backend, queried as
    /// `<base>?id=..&service=..[&variant=..][&page=..]`.
    pub base_url: String,

    /// Per-call timeout in milliseconds.
    pub timeout_ms: u64,

    /// Status code reported when a fetch failure carries no explicit code.
    /// Policy, not contract: operators may remap it.
    pub default_error_status: u16,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://web-cdn.api.bbci.co.uk/fd/simorgh-bff".to_string(),
            timeout_ms: 4_000,
            default_error_status: 500,
        }
    }
}

/// Feature toggle configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TogglesConfig {
    /// Toggle API endpoint, queried as `<endpoint>?application=..&service=..`.
    pub endpoint: String,

    /// Application name sent to the toggle API.
    pub application: String,

    /// How long a cached toggle set stays fresh, in seconds.
    pub cache_ttl_secs: u64,

    /// Per-call timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for TogglesConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://config.api.bbci.co.uk/appconfig/simorgh/live".to_string(),
            application: "simorgh".to_string(),
            cache_ttl_secs: 600,
            timeout_ms: 2_000,
        }
    }
}

/// A single service (language edition) the resolver accepts.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service slug as it appears in URL paths (e.g. "pidgin").
    pub name: String,

    /// URL variant segment -> variant code (e.g. "cyr" -> "sr-cyrl").
    /// Empty for single-script services.
    #[serde(default)]
    pub variants: BTreeMap<String, String>,
}

impl ServiceConfig {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            variants: BTreeMap::new(),
        }
    }

    pub fn with_variant(mut self, segment: &str, code: &str) -> Self {
        self.variants.insert(segment.to_string(), code.to_string());
        self
    }
}

/// Static asset configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory holding the service worker and per-service manifests.
    pub public_dir: String,

    /// Path to the chunk manifest produced by the asset build
    /// (`{"chunks":[{"name":..,"url":..}]}`). Empty = no hydration chunks.
    pub chunk_manifest: String,

    /// Origin serving static assets, always included in resource hints.
    pub static_origin: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            public_dir: "public".to_string(),
            chunk_manifest: String::new(),
            static_origin: "https://static.files.bbci.co.uk".to_string(),
        }
    }
}

/// Response header configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResponseConfig {
    /// Origin used to build the `onion-location` alternate-access header.
    pub onion_origin: String,

    /// `cache-control` value for rendered pages.
    pub cache_control: String,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            onion_origin:
                "https://www.bbcweb3hytmzhn5d532owbu6oqadra5z3ar726vq5kgwwn6aucdccrad.onion"
                    .to_string(),
            cache_control: "public, stale-if-error=90, stale-while-revalidate=30, max-age=30"
                .to_string(),
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Whole-request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Whether to expose Prometheus metrics.
    pub metrics_enabled: bool,

    /// Address the metrics exporter listens on.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

impl AppConfig {
    /// Default service registry used when the config file lists none.
    ///
    /// Variant segments follow the URL convention: the path carries the
    /// script segment ("cyr", "lat", "simp", "trad") while the upstream
    /// expects the language-tag code.
    pub fn default_services() -> Vec<ServiceConfig> {
        vec![
            ServiceConfig::new("afaanoromoo"),
            ServiceConfig::new("amharic"),
            ServiceConfig::new("gahuza"),
            ServiceConfig::new("hausa"),
            ServiceConfig::new("igbo"),
            ServiceConfig::new("mundo"),
            ServiceConfig::new("news"),
            ServiceConfig::new("pidgin"),
            ServiceConfig::new("russian"),
            ServiceConfig::new("serbian")
                .with_variant("cyr", "sr-cyrl")
                .with_variant("lat", "sr-latn"),
            ServiceConfig::new("ukchina")
                .with_variant("simp", "zh-hans")
                .with_variant("trad", "zh-hant"),
            ServiceConfig::new("yoruba"),
            ServiceConfig::new("zhongwen")
                .with_variant("simp", "zh-hans")
                .with_variant("trad", "zh-hant"),
        ]
    }

    /// Service list, falling back to the built-in registry.
    pub fn services(&self) -> Vec<ServiceConfig> {
        if self.services.is_empty() {
            Self::default_services()
        } else {
            self.services.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_complete() {
        let config = AppConfig::default();
        assert_eq!(config.upstream.default_error_status, 500);
        assert!(config.toggles.cache_ttl_secs > 0);
        assert!(!config.services().is_empty());
    }

    #[test]
    fn minimal_toml_parses() {
        let config: AppConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:9999"

            [[services]]
            name = "pidgin"

            [[services]]
            name = "serbian"
            [services.variants]
            cyr = "sr-cyrl"
            lat = "sr-latn"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:9999");
        assert_eq!(config.services.len(), 2);
        assert_eq!(
            config.services[1].variants.get("cyr").map(String::as_str),
            Some("sr-cyrl")
        );
    }
}
