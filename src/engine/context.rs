//! Lazy per-request context.

use futures_util::future::{BoxFuture, FutureExt};

use crate::error::BoxError;

type Produce<'a, C> = Box<dyn FnOnce() -> BoxFuture<'a, Result<C, BoxError>> + Send + 'a>;

/// Deferred context construction handed to the engine.
///
/// `resolve` takes `self`, so the underlying context function runs at most
/// once per request, and only if the engine asks for it.
pub struct ContextThunk<'a, C> {
    produce: Produce<'a, C>,
}

impl<'a, C> ContextThunk<'a, C> {
    pub fn new<F>(produce: F) -> Self
    where
        F: FnOnce() -> BoxFuture<'a, Result<C, BoxError>> + Send + 'a,
    {
        Self {
            produce: Box::new(produce),
        }
    }

    /// A thunk that yields an already-built context.
    pub fn ready(context: C) -> Self
    where
        C: Send + 'a,
    {
        Self::new(move || async move { Ok::<_, BoxError>(context) }.boxed())
    }

    pub async fn resolve(self) -> Result<C, BoxError> {
        (self.produce)().await
    }
}

impl<C> std::fmt::Debug for ContextThunk<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ContextThunk(..)")
    }
}
