//! Structured logging initialization.
//!
//! # Design Decisions
//! - `RUST_LOG` wins when set; otherwise a sensible service default
//! - Initialization is idempotent-unsafe by design: call once from main

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "render_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
