//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, fixed routes)
//!     → statics.rs (service worker, manifests, status probe)
//!     → dispatcher.rs (page pipeline: resolve → toggles → fetch →
//!       assemble → respond)
//! ```

pub mod dispatcher;
pub mod server;
pub mod statics;

pub use server::{AppState, HttpServer};
