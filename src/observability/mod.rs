//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handler/ and http/ produce:
//!     → tracing events (structured fields: invocation_id, function_name, status)
//!     → one invocation span per request
//!
//! logging.rs installs the subscriber:
//!     → EnvFilter (RUST_LOG, else configured level)
//!     → pretty or JSON formatter on stdout
//! ```
//!
//! # Design Decisions
//! - Invocation ID flows through every event of a request
//! - Failures are logged once, at the handler boundary

pub mod logging;

pub use logging::{init_logging, LoggingError};
