//! Fixed routes outside the page pipeline.
//!
//! # Responsibilities
//! - Liveness probe (`/status`)
//! - Service worker script, shared by all services
//! - Per-service web app manifests
//!
//! # Design Decisions
//! - Files are read per request; these paths sit behind a CDN and the
//!   files are small
//! - A missing file is a deployment fault, reported as 500 with a fixed
//!   message

use std::path::Path as FsPath;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::AppState;

const SERVICE_WORKER_ERROR: &str = "Unable to find service worker.";
const MANIFEST_ERROR: &str = "Unable to find manifest.";
const MANIFEST_CACHE_CONTROL: &str = "public, max-age=604800";

/// Liveness probe.
pub async fn status() -> &'static str {
    "Ok"
}

/// The service worker script. One script serves every service.
pub async fn service_worker(
    State(state): State<AppState>,
    Path(service): Path<String>,
) -> Response {
    let path = FsPath::new(&state.config.assets.public_dir).join("sw.js");
    match tokio::fs::read(&path).await {
        Ok(body) => (
            [(header::CONTENT_TYPE, "application/javascript")],
            body,
        )
            .into_response(),
        Err(error) => {
            tracing::error!(service, path = %path.display(), error = %error, "Service worker read failed");
            (StatusCode::INTERNAL_SERVER_ERROR, SERVICE_WORKER_ERROR).into_response()
        }
    }
}

/// The per-service web app manifest.
pub async fn manifest(State(state): State<AppState>, Path(service): Path<String>) -> Response {
    // The service segment names a directory; dots would allow escaping it.
    if service.contains('.') {
        return (StatusCode::INTERNAL_SERVER_ERROR, MANIFEST_ERROR).into_response();
    }
    let path = FsPath::new(&state.config.assets.public_dir)
        .join(&service)
        .join("manifest.json");
    match tokio::fs::read(&path).await {
        Ok(body) => (
            [
                (header::CONTENT_TYPE, "application/json"),
                (header::CACHE_CONTROL, MANIFEST_CACHE_CONTROL),
            ],
            body,
        )
            .into_response(),
        Err(error) => {
            tracing::error!(service, path = %path.display(), error = %error, "Manifest read failed");
            (StatusCode::INTERNAL_SERVER_ERROR, MANIFEST_ERROR).into_response()
        }
    }
}
