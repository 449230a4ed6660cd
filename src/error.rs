//! Error taxonomy for the request/response translation layer.
//!
//! # Design Decisions
//! - Every variant ends up as the same client-visible 400; variants exist
//!   for log diagnosis only
//! - Display output is the exact text sent back in the response body

use thiserror::Error;

/// Boxed error returned by engines and context functions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while turning a platform request into a platform response.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The platform request carried no method.
    #[error("No method")]
    MissingMethod,

    /// The request URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A JSON-typed POST body was not valid JSON.
    #[error(transparent)]
    BodyParse(#[from] serde_json::Error),

    /// The platform body was read more than once.
    #[error("Body has already been consumed")]
    BodyAlreadyConsumed,

    /// The engine asked for incremental (chunked) delivery.
    #[error("Incremental delivery not implemented")]
    NotImplemented,

    /// Error raised by the engine or by the context function, passed through.
    #[error("{0}")]
    Engine(#[source] BoxError),
}

/// Result type for handler operations.
pub type HandlerResult<T> = Result<T, HandlerError>;
