//! GraphQL serverless function adapter.
//!
//! Wraps an opaque GraphQL engine in a serverless HTTP function signature:
//! the platform request is normalized into a GraphQL-over-HTTP request, the
//! engine runs it, and its response is shaped back into the platform's
//! output. Every failure becomes a 400 carrying the error message.
//!
//! ```text
//!     PlatformRequest ──▶ http::request ──▶ engine ──▶ http::response ──▶ PlatformResponse
//!                              │              ▲
//!                              │        ContextThunk (lazy)
//!                              ▼              │
//!                          handler (single failure boundary, logging)
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod handler;
pub mod http;
pub mod observability;

pub use config::HostConfig;
pub use engine::{ContextThunk, GraphQLEngine};
pub use error::{BoxError, HandlerError};
pub use handler::{
    start_server_and_create_handler, BaseContext, ContextArgs, Handler, HandlerOptions,
    HttpHandler, InvocationContext,
};
pub use http::{FunctionHost, GraphQLRequest, GraphQLResponse, PlatformRequest, PlatformResponse};
