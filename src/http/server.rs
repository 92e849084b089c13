//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (timeout, request ID, tracing)
//! - Build the pipeline subsystems and inject them as shared state
//! - Serve with graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::document::{AssetRegistry, DocumentAssembler};
use crate::http::{dispatcher, statics};
use crate::lifecycle::signals::shutdown_signal;
use crate::lifecycle::StartupError;
use crate::routing::RouteResolver;
use crate::toggles::{HttpToggleFetcher, SystemClock, ToggleCache};
use crate::upstream::PageDataFetcher;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub resolver: Arc<RouteResolver>,
    pub fetcher: Arc<PageDataFetcher>,
    pub toggles: Arc<ToggleCache>,
    pub assembler: Arc<DocumentAssembler>,
}

impl AppState {
    /// Build every pipeline subsystem from configuration.
    pub fn from_config(config: AppConfig) -> Result<Self, StartupError> {
        let resolver = Arc::new(RouteResolver::from_config(config.services()));
        let fetcher = Arc::new(PageDataFetcher::new(&config.upstream)?);
        let toggles = Arc::new(ToggleCache::new(
            Box::new(HttpToggleFetcher::new(&config.toggles)?),
            Box::new(SystemClock),
            Duration::from_secs(config.toggles.cache_ttl_secs),
        ));
        let assembler = Arc::new(DocumentAssembler::new(AssetRegistry::load(&config.assets)?));

        Ok(Self {
            config: Arc::new(config),
            resolver,
            fetcher,
            toggles,
            assembler,
        })
    }
}

/// HTTP server for the render service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(config: AppConfig) -> Result<Self, StartupError> {
        let request_timeout = Duration::from_secs(config.timeouts.request_secs);
        let state = AppState::from_config(config)?;
        Ok(Self {
            router: Self::build_router(request_timeout, state),
        })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Fixed routes (status probe, service worker, manifests) are matched
    /// first; everything else falls through to the page dispatcher.
    fn build_router(request_timeout: Duration, state: AppState) -> Router {
        Router::new()
            .route("/status", get(statics::status))
            .route("/{service}/sw.js", get(statics::service_worker))
            .route("/{service}/articles/sw.js", get(statics::service_worker))
            .route("/{service}/manifest.json", get(statics::manifest))
            .route("/{service}/articles/manifest.json", get(statics::manifest))
            .fallback(get(dispatcher::dispatch))
            .with_state(state)
            .layer(TimeoutLayer::new(request_timeout))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
