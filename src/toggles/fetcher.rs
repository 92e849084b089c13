//! Toggle endpoint client.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::config::TogglesConfig;
use crate::toggles::{ToggleFetchError, ToggleFetcher, ToggleSet};
use crate::upstream::{FetchError, JsonClient};

/// Fetches toggle sets from the remote toggle API.
pub struct HttpToggleFetcher {
    client: JsonClient,
    endpoint: Url,
    application: String,
}

impl HttpToggleFetcher {
    pub fn new(config: &TogglesConfig) -> Result<Self, FetchError> {
        let endpoint =
            Url::parse(&config.endpoint).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        Ok(Self {
            client: JsonClient::new(Duration::from_millis(config.timeout_ms)),
            endpoint,
            application: config.application.clone(),
        })
    }

    fn request_url(&self, service: &str) -> String {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("application", &self.application)
            .append_pair("service", service);
        url.to_string()
    }
}

#[async_trait]
impl ToggleFetcher for HttpToggleFetcher {
    async fn fetch(&self, service: &str) -> Result<ToggleSet, ToggleFetchError> {
        let url = self.request_url(service);
        let (_, body) = self.client.get_json(&url, &[]).await?;

        let toggles = body
            .get("toggles")
            .ok_or_else(|| ToggleFetchError::Malformed("missing 'toggles' object".into()))?;

        serde_json::from_value(toggles.clone())
            .map_err(|e| ToggleFetchError::Malformed(e.to_string()))
    }
}
