//! Per-invocation metadata supplied by the platform.

use uuid::Uuid;

/// Opaque invocation metadata. Forwarded to the context function and used
/// as the diagnostic channel for the invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    pub invocation_id: Uuid,
    pub function_name: String,
}

impl InvocationContext {
    /// Create metadata for a fresh invocation with a random ID.
    pub fn new(function_name: impl Into<String>) -> Self {
        Self {
            invocation_id: Uuid::new_v4(),
            function_name: function_name.into(),
        }
    }

    /// Span covering the whole invocation.
    pub fn span(&self) -> tracing::Span {
        tracing::info_span!(
            "invocation",
            invocation_id = %self.invocation_id,
            function_name = %self.function_name,
        )
    }

    /// Report a failure on the invocation's diagnostic channel.
    ///
    /// Expected to run inside [`span`](Self::span), which carries the
    /// invocation ID and function name.
    pub fn error(&self, message: &str, error: &dyn std::error::Error) {
        tracing::error!(error = %error, "{}", message);
    }
}
