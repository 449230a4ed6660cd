//! HTTP shapes on both sides of the engine.
//!
//! # Data Flow
//! ```text
//! HTTP connection
//!     → server.rs (Axum setup, buffer body, build PlatformRequest)
//!     → request.rs (normalize into GraphQLRequest)
//!     → [engine executes] (engine/)
//!     → response.rs (adapt GraphQLResponse into PlatformResponse)
//!     → server.rs (write HTTP response)
//! ```

pub mod headers;
pub mod request;
pub mod response;
pub mod server;

pub use headers::HeaderMap;
pub use request::{normalize_request, GraphQLBody, GraphQLRequest, PlatformBody, PlatformRequest};
pub use response::{adapt_response, GraphQLResponse, PlatformResponse, ResponseBody};
pub use server::FunctionHost;
