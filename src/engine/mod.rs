//! GraphQL engine seam.
//!
//! # Data Flow
//! ```text
//! Handler
//!     → GraphQLEngine::execute_http_request(GraphQLRequest, ContextThunk)
//!         → engine resolves ContextThunk only if it needs the context
//!     ← GraphQLResponse
//! ```
//!
//! # Design Decisions
//! - The engine is opaque; this crate never parses or executes GraphQL
//! - Startup happens once, when the handler is created
//! - The context is a thunk, so building it is deferred and happens at most once

pub mod context;

use async_trait::async_trait;

use crate::error::BoxError;
use crate::http::request::GraphQLRequest;
use crate::http::response::GraphQLResponse;

pub use context::ContextThunk;

/// An execution engine that serves normalized GraphQL-over-HTTP requests.
#[async_trait]
pub trait GraphQLEngine<C: Send>: Send + Sync {
    /// Execute one request. The engine decides whether to resolve `context`.
    async fn execute_http_request(
        &self,
        request: GraphQLRequest,
        context: ContextThunk<'_, C>,
    ) -> Result<GraphQLResponse, BoxError>;

    /// Kick off background startup. Startup failures are the engine's to
    /// report; it is expected to fail subsequent requests itself.
    fn start_in_background(&self) {}
}
