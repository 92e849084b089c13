//! Hydration chunk references and asset origins.
//!
//! # Responsibilities
//! - Load the chunk manifest emitted by the asset build
//! - Produce `<script>` tags for canonical hydration chunks
//! - Enumerate the distinct origins used, for resource hints
//!
//! # Design Decisions
//! - The manifest is read once at startup; a missing manifest path means
//!   a chunkless (server-only) deployment, not an error
//! - Origin order is insertion order with duplicates removed, so hint
//!   output is deterministic

use std::path::Path;

use serde::Deserialize;
use url::Url;

/// Chunk manifest file shape: `{"chunks":[{"name":..,"url":..}]}`.
#[derive(Debug, Clone, Deserialize)]
struct ChunkManifest {
    chunks: Vec<Chunk>,
}

/// One content-addressed script emitted by the asset build.
#[derive(Debug, Clone, Deserialize)]
pub struct Chunk {
    #[allow(dead_code)]
    pub name: String,
    pub url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read chunk manifest '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed chunk manifest '{path}': {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Static knowledge about the deployment's assets.
pub struct AssetRegistry {
    chunks: Vec<Chunk>,
    static_origin: String,
}

impl AssetRegistry {
    /// Load the registry from config. An empty manifest path yields a
    /// registry with no hydration chunks.
    pub fn load(config: &crate::config::AssetsConfig) -> Result<Self, AssetError> {
        let chunks = if config.chunk_manifest.is_empty() {
            Vec::new()
        } else {
            let path = Path::new(&config.chunk_manifest);
            let content = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
                path: config.chunk_manifest.clone(),
                source,
            })?;
            let manifest: ChunkManifest =
                serde_json::from_str(&content).map_err(|source| AssetError::Parse {
                    path: config.chunk_manifest.clone(),
                    source,
                })?;
            manifest.chunks
        };

        Ok(Self {
            chunks,
            static_origin: config.static_origin.clone(),
        })
    }

    #[cfg(test)]
    pub fn from_parts(chunks: Vec<(&str, &str)>, static_origin: &str) -> Self {
        Self {
            chunks: chunks
                .into_iter()
                .map(|(name, url)| Chunk {
                    name: name.to_string(),
                    url: url.to_string(),
                })
                .collect(),
            static_origin: static_origin.to_string(),
        }
    }

    /// Hydration script tags for canonical pages, deferred and
    /// cross-origin-tagged, in manifest order.
    pub fn script_tags(&self) -> String {
        self.chunks
            .iter()
            .map(|chunk| {
                format!(
                    r#"<script crossorigin="anonymous" defer src="{}"></script>"#,
                    chunk.url
                )
            })
            .collect()
    }

    /// Distinct asset origins: the static origin first, then each chunk
    /// origin in manifest order.
    pub fn origins(&self) -> Vec<String> {
        let mut origins = vec![self.static_origin.clone()];
        for chunk in &self.chunks {
            if let Ok(url) = Url::parse(&chunk.url) {
                let origin = url.origin().ascii_serialization();
                if !origins.contains(&origin) {
                    origins.push(origin);
                }
            }
        }
        origins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn registry() -> AssetRegistry {
        AssetRegistry::from_parts(
            vec![
                ("main", "https://static.test/js/main-abc123.js"),
                ("vendor", "https://cdn.other.test/js/vendor-def456.js"),
                ("page", "https://static.test/js/page-789abc.js"),
            ],
            "https://static.test",
        )
    }

    #[test]
    fn script_tags_are_deferred_and_cross_origin() {
        let tags = registry().script_tags();
        assert_eq!(tags.matches("<script").count(), 3);
        assert_eq!(tags.matches("defer").count(), 3);
        assert_eq!(tags.matches(r#"crossorigin="anonymous""#).count(), 3);
        // Manifest order preserved.
        assert!(tags.find("main-abc123").unwrap() < tags.find("vendor-def456").unwrap());
    }

    #[test]
    fn origins_are_distinct_in_insertion_order() {
        assert_eq!(
            registry().origins(),
            vec![
                "https://static.test".to_string(),
                "https://cdn.other.test".to_string(),
            ]
        );
    }

    #[test]
    fn empty_manifest_path_loads_chunkless_registry() {
        let registry = AssetRegistry::load(&crate::config::AssetsConfig::default()).unwrap();
        assert!(registry.script_tags().is_empty());
        assert_eq!(registry.origins().len(), 1);
    }

    #[test]
    fn loads_manifest_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"chunks":[{{"name":"main","url":"https://static.test/js/main-abc123.js"}}]}}"#
        )
        .unwrap();

        let registry = AssetRegistry::load(&crate::config::AssetsConfig {
            chunk_manifest: file.path().to_string_lossy().into_owned(),
            ..crate::config::AssetsConfig::default()
        })
        .unwrap();

        assert!(registry.script_tags().contains("main-abc123"));
    }

    #[test]
    fn missing_manifest_file_is_an_error() {
        let result = AssetRegistry::load(&crate::config::AssetsConfig {
            chunk_manifest: "/no/such/manifest.json".to_string(),
            ..crate::config::AssetsConfig::default()
        });
        assert!(matches!(result, Err(AssetError::Io { .. })));
    }
}
