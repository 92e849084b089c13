//! Topic page-data fetching.
//!
//! # Responsibilities
//! - Compose the upstream request URL (`id`, `service`, `variant?`, `page?`)
//! - Signal the content environment via the `ctx-service-env` header
//! - Map the upstream `data` object into a PageDataEnvelope
//! - Fold every failure into an error envelope (never propagate)

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::routing::RouteDescriptor;
use crate::upstream::{
    ContentEnv, FetchError, JsonClient, PageData, PageDataEnvelope, PageMetadata, Promo,
    CTX_SERVICE_ENV,
};

/// Fetches and normalizes page data from the content backend.
pub struct PageDataFetcher {
    client: JsonClient,
    base_url: Url,
    default_error_status: u16,
}

/// Shape of the upstream `data` object this pipeline depends on.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TopicBody {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    summaries: Vec<Promo>,
    active_page: Option<u32>,
    page_count: Option<u32>,
}

impl PageDataFetcher {
    pub fn new(config: &UpstreamConfig) -> Result<Self, FetchError> {
        let base_url =
            Url::parse(&config.base_url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        Ok(Self {
            client: JsonClient::new(Duration::from_millis(config.timeout_ms)),
            base_url,
            default_error_status: config.default_error_status,
        })
    }

    /// Fetch page data for a resolved route. Always returns an envelope;
    /// the call is an idempotent GET and safe to retry with the same
    /// inputs.
    pub async fn fetch(
        &self,
        route: &RouteDescriptor,
        page: Option<u32>,
        env: ContentEnv,
    ) -> PageDataEnvelope {
        let url = self.request_url(route, page);
        let started = std::time::Instant::now();

        let result = self
            .client
            .get_json(&url, &[(CTX_SERVICE_ENV, env.as_str())])
            .await
            .and_then(|(status, body)| map_topic_body(status, &body));

        metrics::record_upstream_fetch(started);

        match result {
            Ok(envelope) => envelope,
            Err(error) => {
                let status = error.status_code(self.default_error_status);
                tracing::error!(
                    service = %route.service,
                    status,
                    url = %url,
                    error = %error,
                    "Page data fetch failed"
                );
                PageDataEnvelope::error(status, error.to_string())
            }
        }
    }

    /// Upstream request URL. Parameters appear in fixed order
    /// `id, service, variant?, page?`; absent ones are omitted.
    pub fn request_url(&self, route: &RouteDescriptor, page: Option<u32>) -> String {
        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("id", &route.id);
            query.append_pair("service", &route.service);
            if let Some(variant) = &route.variant {
                query.append_pair("variant", variant);
            }
            if let Some(page) = page {
                query.append_pair("page", &page.to_string());
            }
        }
        url.to_string()
    }
}

/// Map a 2xx upstream body into a success envelope.
fn map_topic_body(status: u16, body: &serde_json::Value) -> Result<PageDataEnvelope, FetchError> {
    let data = body
        .get("data")
        .ok_or_else(|| FetchError::MalformedBody("missing 'data' object".into()))?;

    let topic: TopicBody = serde_json::from_value(data.clone())
        .map_err(|e| FetchError::MalformedBody(e.to_string()))?;

    let description = if topic.description.is_empty() {
        topic.title.clone()
    } else {
        topic.description
    };

    Ok(PageDataEnvelope::ok(
        status,
        PageData {
            title: topic.title,
            description,
            promos: topic.summaries,
            active_page: topic.active_page.unwrap_or(1),
            page_count: topic.page_count.unwrap_or(1),
            metadata: PageMetadata {
                kind: "Topic".into(),
            },
        },
    ))
}
