//! Server-side news page rendering service.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌────────────────────────────────────────────────┐
//!                      │                RENDER SERVICE                   │
//!                      │                                                 │
//!   Client Request     │  ┌─────────┐   ┌──────────┐   ┌─────────────┐  │
//!   ───────────────────┼─▶│  http   │──▶│ routing  │──▶│  upstream   │──┼──▶ Content API
//!                      │  │ server  │   │ resolver │   │   fetcher   │  │
//!                      │  └─────────┘   └──────────┘   └──────┬──────┘  │
//!                      │       │                              │         │
//!                      │       │        ┌──────────┐          │         │
//!                      │       └───────▶│ toggles  │──────────┼─────────┼──▶ Toggle API
//!                      │                │  cache   │          │         │
//!                      │                └────┬─────┘          │         │
//!                      │                     ▼                ▼         │
//!   Client Response    │                ┌───────────────────────┐      │
//!   ◀──────────────────┼────────────────│  document assembler   │      │
//!                      │                │ markup/styles/assets  │      │
//!                      │                └───────────────────────┘      │
//!                      │                                                 │
//!                      │  ┌──────────────────────────────────────────┐  │
//!                      │  │        Cross-Cutting Concerns            │  │
//!                      │  │   config  ·  observability  ·  lifecycle │  │
//!                      │  └──────────────────────────────────────────┘  │
//!                      └────────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod document;
pub mod http;
pub mod routing;
pub mod toggles;
pub mod upstream;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::AppConfig;
pub use http::HttpServer;
