//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Reload (reload.rs):
//!     route table update → build Router → swap into SharedRouter
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → graceful shutdown of the HTTP server
//! ```

pub mod reload;
pub mod signals;

pub use reload::apply_route_updates;
pub use signals::shutdown_signal;
