//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Build subsystems → Bind listener
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → graceful shutdown (stop accepting, drain, exit)
//! ```

pub mod signals;
pub mod startup;

pub use startup::StartupError;
