//! Bounded JSON GET client.
//!
//! # Responsibilities
//! - Perform a single upstream GET with extra headers
//! - Enforce a per-call timeout (cancellable, no internal retries)
//! - Parse 2xx bodies as JSON; surface non-2xx statuses as errors
//!
//! # Design Decisions
//! - One shared hyper client, cloned per call (connection pooling)
//! - Timeout and connect failure produce distinct errors for logging,
//!   but both fold into the same envelope path upstream of here

use std::time::Duration;

use axum::body::Body;
use http_body_util::BodyExt;
use hyper::Request;
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;

use crate::upstream::FetchError;

/// A JSON-over-GET client with a fixed per-call timeout.
#[derive(Clone)]
pub struct JsonClient {
    client: Client<HttpConnector, Body>,
    timeout: Duration,
}

impl JsonClient {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self { client, timeout }
    }

    /// GET `url` with the given headers, returning the status and parsed
    /// JSON body of a 2xx reply.
    pub async fn get_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<(u16, serde_json::Value), FetchError> {
        let mut request = Request::builder().method(hyper::Method::GET).uri(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let request = request
            .body(Body::empty())
            .map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        // The bound covers the whole exchange: an upstream that returns
        // headers and then stalls mid-body must still time out.
        let (status, bytes) = tokio::time::timeout(self.timeout, async {
            let response = self
                .client
                .request(request)
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))?;

            let status = response.status().as_u16();
            if !response.status().is_success() {
                return Err(FetchError::Status(status));
            }

            let bytes = response
                .into_body()
                .collect()
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))?
                .to_bytes();

            Ok((status, bytes))
        })
        .await
        .map_err(|_| FetchError::Timeout(self.timeout.as_millis() as u64))??;

        let json = serde_json::from_slice(&bytes)
            .map_err(|e| FetchError::MalformedBody(e.to_string()))?;

        Ok((status, json))
    }
}
