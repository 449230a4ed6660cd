//! Response adaptation.
//!
//! # Responsibilities
//! - Model the engine's response and the platform's response
//! - Default a missing or zero status to 200
//! - Flatten headers and stamp `content-length` from the final body
//! - Reject chunked (incremental) bodies
//!
//! # Design Decisions
//! - `content-length` always reflects the body we send, never the engine's
//! - Chunked bodies fail before any output is produced

use std::fmt;

use futures_util::stream::BoxStream;
use indexmap::IndexMap;

use crate::error::{HandlerError, HandlerResult};
use crate::http::headers::HeaderMap;

pub const CONTENT_LENGTH: &str = "content-length";

/// Body produced by the engine.
pub enum ResponseBody {
    /// The full response as a single string.
    Complete(String),
    /// Incremental delivery. Not supported by this adapter.
    Chunked(BoxStream<'static, String>),
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseBody::Complete(body) => f.debug_tuple("Complete").field(body).finish(),
            ResponseBody::Chunked(_) => f.write_str("Chunked(..)"),
        }
    }
}

/// Response returned by the GraphQL engine.
#[derive(Debug)]
pub struct GraphQLResponse {
    pub status: Option<u16>,
    pub headers: HeaderMap,
    pub body: ResponseBody,
}

impl GraphQLResponse {
    /// A complete response with no explicit status and no headers.
    pub fn complete(body: impl Into<String>) -> Self {
        Self {
            status: None,
            headers: HeaderMap::new(),
            body: ResponseBody::Complete(body.into()),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_header(mut self, key: &str, value: impl Into<String>) -> Self {
        self.headers.set(key, value);
        self
    }
}

/// Response handed back to the serverless platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformResponse {
    pub status: u16,
    pub headers: IndexMap<String, String>,
    pub body: String,
}

impl PlatformResponse {
    /// Failure response: status 400, the message as body, no headers.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: 400,
            headers: IndexMap::new(),
            body: message.into(),
        }
    }
}

/// Convert the engine's response into the platform's response shape.
pub fn adapt_response(response: GraphQLResponse) -> HandlerResult<PlatformResponse> {
    let body = match response.body {
        ResponseBody::Complete(body) => body,
        ResponseBody::Chunked(_) => return Err(HandlerError::NotImplemented),
    };

    let status = match response.status {
        Some(status) if status != 0 => status,
        _ => 200,
    };

    let mut headers: IndexMap<String, String> = response.headers.into_iter().collect();
    headers.insert(CONTENT_LENGTH.to_string(), body.len().to_string());

    Ok(PlatformResponse {
        status,
        headers,
        body,
    })
}
