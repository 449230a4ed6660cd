//! Per-invocation orchestration.
//!
//! # Data Flow
//! ```text
//! PlatformRequest + InvocationContext
//!     → normalize_request (http/request.rs)
//!     → GraphQLEngine::execute_http_request, with a lazy ContextThunk
//!     → adapt_response (http/response.rs)
//!     → PlatformResponse
//!
//! Any error along the way:
//!     → InvocationContext::error("Failure processing GraphQL request")
//!     → PlatformResponse { status: 400, body: error message }
//! ```
//!
//! # Design Decisions
//! - Single failure boundary; no retries, no partial output
//! - Every failure kind maps to 400 with only the message text
//! - Engine startup is triggered once, by the factory, not per request

pub mod invocation;
pub mod options;

use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};
use tracing::Instrument;

use crate::engine::{ContextThunk, GraphQLEngine};
use crate::error::{HandlerError, HandlerResult};
use crate::http::request::{normalize_request, PlatformRequest};
use crate::http::response::{adapt_response, PlatformResponse};

pub use invocation::InvocationContext;
pub use options::{BaseContext, ContextArgs, ContextFunction, HandlerOptions};

/// Message attached to every failure logged at the handler boundary.
pub const FAILURE_MESSAGE: &str = "Failure processing GraphQL request";

/// Object-safe function signature expected by the platform.
pub trait HttpHandler: Send + Sync {
    fn call(
        &self,
        req: PlatformRequest,
        context: InvocationContext,
    ) -> BoxFuture<'_, PlatformResponse>;
}

/// Serverless function handler wrapping a GraphQL engine.
pub struct Handler<E, C> {
    engine: Arc<E>,
    context: ContextFunction<C>,
}

/// Start the engine in the background and build the function handler.
pub fn start_server_and_create_handler<E, C>(
    engine: E,
    options: HandlerOptions<C>,
) -> Handler<E, C>
where
    E: GraphQLEngine<C>,
    C: Send,
{
    engine.start_in_background();
    Handler {
        engine: Arc::new(engine),
        context: options.context,
    }
}

impl<E, C> Handler<E, C>
where
    E: GraphQLEngine<C>,
    C: Send,
{
    /// Serve one invocation. Never fails: errors become a 400 response.
    pub async fn handle(
        &self,
        mut req: PlatformRequest,
        context: InvocationContext,
    ) -> PlatformResponse {
        let span = context.span();
        async {
            match self.process(&mut req, &context).await {
                Ok(response) => {
                    tracing::debug!(status = response.status, "GraphQL request processed");
                    response
                }
                Err(e) => {
                    context.error(FAILURE_MESSAGE, &e);
                    PlatformResponse::bad_request(e.to_string())
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn process(
        &self,
        req: &mut PlatformRequest,
        context: &InvocationContext,
    ) -> HandlerResult<PlatformResponse> {
        let request = normalize_request(req)?;
        tracing::debug!(method = %request.method, search = %request.search, "Request normalized");

        let req: &PlatformRequest = req;
        let body = request.body.clone();
        let context_fn = &self.context;
        let thunk = ContextThunk::new(move || context_fn(ContextArgs { req, context, body }));

        let response = self
            .engine
            .execute_http_request(request, thunk)
            .await
            .map_err(HandlerError::Engine)?;

        adapt_response(response)
    }
}

impl<E, C> HttpHandler for Handler<E, C>
where
    E: GraphQLEngine<C> + 'static,
    C: Send + 'static,
{
    fn call(
        &self,
        req: PlatformRequest,
        context: InvocationContext,
    ) -> BoxFuture<'_, PlatformResponse> {
        self.handle(req, context).boxed()
    }
}

impl<E, C> Clone for Handler<E, C> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            context: Arc::clone(&self.context),
        }
    }
}
