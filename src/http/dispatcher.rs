//! Page request dispatching.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → resolve route (404 error page on failure)
//!     → toggle cache (never fatal)
//!     → page-data fetch (always yields an envelope)
//!     → document assembly (HTML or redirect)
//!     → response (envelope status, caching and alternate-access headers)
//! ```
//!
//! # Design Decisions
//! - The response status is the envelope status; the pipeline renders an
//!   error page rather than propagating failures
//! - Assembly failure is the only 500 this handler produces itself, with
//!   the error message as the whole body
//! - `timeOnServer` is stamped here, keeping the assembler pure

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
};

use crate::document::{PageJson, RenderContext, RenderOutcome};
use crate::http::AppState;
use crate::observability::metrics;
use crate::routing::{PageType, RouteDescriptor};
use crate::toggles::ToggleSet;
use crate::upstream::{ContentEnv, PageDataEnvelope};

/// Inbound header gating advert markup.
const BBC_ADVERTS: &str = "bbc-adverts";

/// Inbound header naming the public-facing origin.
const BBC_ORIGIN: &str = "bbc-origin";

/// Main page handler. Every path the fixed routes do not claim lands
/// here.
pub async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let started = Instant::now();
    let path = request.uri().path().to_string();
    let url = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| path.clone());

    tracing::debug!(url = %url, "Dispatching page request");

    let route = match state.resolver.resolve(&url) {
        Ok(route) => route,
        Err(error) => {
            tracing::warn!(url = %url, error = %error, "No route matched");
            let response = not_found(&state, &path, &url, request.headers());
            metrics::record_request(response.status().as_u16(), started);
            return response;
        }
    };

    let toggles = state.toggles.get(&route.service).await;
    let env = ContentEnv::from_request_url(&url);
    let page = page_param(request.uri().query());

    let envelope = match route.page_type {
        PageType::Topic => state.fetcher.fetch(&route, page, env).await,
    };

    if envelope.status != 200 {
        let page_type = derived_page_type(&envelope, &route);
        metrics::record_non_200(envelope.status, page_type);
        tracing::warn!(
            status = envelope.status,
            page_type,
            url = %url,
            "Rendering non-200 response"
        );
    }

    let context = RenderContext {
        bbc_origin: header_value(request.headers(), BBC_ORIGIN),
        data: PageJson {
            envelope,
            toggles,
            path: path.clone(),
            time_on_server: epoch_millis(),
            show_ads_based_on_location: header_value(request.headers(), BBC_ADVERTS).as_deref()
                == Some("true"),
        },
        is_amp: route.is_amp,
        service: route.service.clone(),
        path: path.clone(),
        url: url.clone(),
    };

    let status = context.data.envelope.status;
    let response = respond(&state, context, &url, request.headers(), status);
    metrics::record_request(response.status().as_u16(), started);
    response
}

/// Turn an assembled document into the outbound response.
fn respond(
    state: &AppState,
    context: RenderContext,
    url: &str,
    headers: &HeaderMap,
    status: u16,
) -> Response {
    match state.assembler.render(&context) {
        Ok(RenderOutcome::Html(html)) => html_response(
            status,
            vec![
                (
                    "cache-control",
                    state.config.response.cache_control.clone(),
                ),
                (
                    "onion-location",
                    format!("{}{}", state.config.response.onion_origin, context.path),
                ),
            ],
            html,
        ),
        Ok(RenderOutcome::Redirect(location)) => redirect(&location),
        Err(error) => {
            tracing::error!(
                url = %url,
                status,
                headers = ?headers,
                error = %error,
                "Document assembly failed"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, error.to_string()).into_response()
        }
    }
}

/// Render the 404 error page for a path no route claims.
fn not_found(state: &AppState, path: &str, url: &str, headers: &HeaderMap) -> Response {
    metrics::record_non_200(404, "Unknown");
    let context = RenderContext {
        bbc_origin: header_value(headers, BBC_ORIGIN),
        data: PageJson {
            envelope: PageDataEnvelope::error(404, "route not found".to_string()),
            toggles: ToggleSet::default(),
            path: path.to_string(),
            time_on_server: epoch_millis(),
            show_ads_based_on_location: false,
        },
        is_amp: false,
        service: path.trim_matches('/').split('/').next().unwrap_or("").to_string(),
        path: path.to_string(),
        url: url.to_string(),
    };
    match state.assembler.render(&context) {
        Ok(RenderOutcome::Html(html)) => html_response(
            404,
            vec![(
                "cache-control",
                state.config.response.cache_control.clone(),
            )],
            html,
        ),
        Ok(RenderOutcome::Redirect(location)) => redirect(&location),
        Err(error) => {
            tracing::error!(url = %url, error = %error, "Error page assembly failed");
            (StatusCode::INTERNAL_SERVER_ERROR, error.to_string()).into_response()
        }
    }
}

fn html_response(status: u16, extra_headers: Vec<(&'static str, String)>, html: String) -> Response {
    let mut response = axum::response::Html(html).into_response();
    *response.status_mut() =
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    for (name, value) in extra_headers {
        if let Ok(value) = HeaderValue::from_str(&value) {
            response.headers_mut().insert(name, value);
        }
    }
    response
}

fn redirect(location: &str) -> Response {
    let mut response = StatusCode::MOVED_PERMANENTLY.into_response();
    if let Ok(value) = HeaderValue::from_str(location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    response
}

/// Page type label for metrics: the upstream's own type when present,
/// else the route's.
fn derived_page_type<'a>(envelope: &'a PageDataEnvelope, route: &RouteDescriptor) -> &'a str {
    envelope
        .page_data()
        .map(|data| data.metadata.kind.as_str())
        .unwrap_or_else(|| route.page_type.as_str())
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// `page` query parameter, if present and a positive integer. Anything
/// else is treated as absent.
fn page_param(query: Option<&str>) -> Option<u32> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
        .filter(|page| *page > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_param_parses_numeric_values() {
        assert_eq!(page_param(Some("page=2")), Some(2));
        assert_eq!(page_param(Some("renderer_env=test&page=40")), Some(40));
    }

    #[test]
    fn page_param_ignores_junk() {
        assert_eq!(page_param(None), None);
        assert_eq!(page_param(Some("foo=bar")), None);
        assert_eq!(page_param(Some("page=two")), None);
        assert_eq!(page_param(Some("page=-1")), None);
        assert_eq!(page_param(Some("page=0")), None);
    }
}
