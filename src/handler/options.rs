//! Handler options and the context construction hook.

use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};

use crate::error::BoxError;
use crate::handler::invocation::InvocationContext;
use crate::http::request::{GraphQLBody, PlatformRequest};

/// Inputs available when building the per-request context.
#[derive(Debug)]
pub struct ContextArgs<'a> {
    /// The platform request. Its body has already been consumed.
    pub req: &'a PlatformRequest,
    pub context: &'a InvocationContext,
    /// The normalized body, as handed to the engine.
    pub body: GraphQLBody,
}

/// Builds the application context for one request.
pub type ContextFunction<C> =
    Arc<dyn for<'a> Fn(ContextArgs<'a>) -> BoxFuture<'a, Result<C, BoxError>> + Send + Sync>;

/// Context used when no context function is configured: an empty object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseContext;

/// Options for [`start_server_and_create_handler`](crate::start_server_and_create_handler).
pub struct HandlerOptions<C> {
    pub(crate) context: ContextFunction<C>,
}

impl<C> HandlerOptions<C> {
    /// Build the context with `f` for every request that needs one.
    pub fn with_context<F>(f: F) -> Self
    where
        F: for<'a> Fn(ContextArgs<'a>) -> BoxFuture<'a, Result<C, BoxError>>
            + Send
            + Sync
            + 'static,
    {
        Self {
            context: Arc::new(f),
        }
    }
}

impl<C> Default for HandlerOptions<C>
where
    C: Default + Send + 'static,
{
    fn default() -> Self {
        Self::with_context(|_args| async { Ok::<_, BoxError>(C::default()) }.boxed())
    }
}

impl<C> Clone for HandlerOptions<C> {
    fn clone(&self) -> Self {
        Self {
            context: Arc::clone(&self.context),
        }
    }
}

impl<C> std::fmt::Debug for HandlerOptions<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerOptions").finish_non_exhaustive()
    }
}
