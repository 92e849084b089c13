//! Startup error handling.

use crate::config::ConfigError;
use crate::document::AssetError;
use crate::upstream::FetchError;

/// Anything that can stop the service from coming up. Fatal: reported
/// and the process exits.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("upstream client setup failed: {0}")]
    Upstream(#[from] FetchError),

    #[error("asset manifest error: {0}")]
    Assets(#[from] AssetError),

    #[error("listener bind failed: {0}")]
    Bind(#[from] std::io::Error),
}
