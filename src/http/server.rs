//! Local function host.
//!
//! # Responsibilities
//! - Create the Axum Router exposing the function route
//! - Wire up middleware (tracing, timeout)
//! - Bridge an HTTP request into a `PlatformRequest` + `InvocationContext`
//! - Write the handler's `PlatformResponse` back as an HTTP response
//! - Bind server to listener, shut down gracefully

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderName, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use http_body_util::LengthLimitError;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{FunctionConfig, HostConfig};
use crate::handler::{HttpHandler, InvocationContext};
use crate::http::request::{PlatformBody, PlatformRequest};
use crate::http::response::PlatformResponse;

/// State injected into the function route.
#[derive(Clone)]
struct HostState {
    handler: Arc<dyn HttpHandler>,
    function: FunctionConfig,
}

/// HTTP host that plays the platform's role for one function.
pub struct FunctionHost {
    router: Router,
    config: HostConfig,
}

impl FunctionHost {
    pub fn new(config: HostConfig, handler: Arc<dyn HttpHandler>) -> Self {
        let state = HostState {
            handler,
            function: config.function.clone(),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    #[allow(deprecated)]
    fn build_router(config: &HostConfig, state: HostState) -> Router {
        Router::new()
            .route(&config.function.route, any(function_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.function.request_timeout_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// The Axum router, for embedding or for driving in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Serve until Ctrl+C.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        self.run_with_shutdown(listener, shutdown_signal()).await
    }

    /// Serve until `signal` completes.
    pub async fn run_with_shutdown<F>(
        self,
        listener: TcpListener,
        signal: F,
    ) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            route = %self.config.function.route,
            function_name = %self.config.function.name,
            "Function host starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(signal)
            .await?;

        tracing::info!("Function host stopped");
        Ok(())
    }
}

async fn function_handler(State(state): State<HostState>, request: Request<Body>) -> Response {
    let invocation = InvocationContext::new(state.function.name.clone());

    let platform_request = match into_platform_request(request, &state.function).await {
        Ok(req) => req,
        Err(status) => {
            tracing::warn!(
                invocation_id = %invocation.invocation_id,
                status = %status,
                "Rejected request body"
            );
            let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
                "Request body too large"
            } else {
                "Failed to read request body"
            };
            return (status, message).into_response();
        }
    };

    tracing::debug!(
        invocation_id = %invocation.invocation_id,
        method = ?platform_request.method,
        url = %platform_request.url,
        "Invoking function"
    );

    let response = state.handler.call(platform_request, invocation).await;
    into_http_response(response)
}

/// Buffer the body and rebuild the absolute request URL.
///
/// The authority comes from the request target when it carries one
/// (absolute-form, HTTP/2), then the `Host` header, then `default_host`.
async fn into_platform_request(
    request: Request<Body>,
    function: &FunctionConfig,
) -> Result<PlatformRequest, StatusCode> {
    let (parts, body) = request.into_parts();

    let bytes = axum::body::to_bytes(body, function.max_body_size)
        .await
        .map_err(|e| body_error_status(&e))?;

    let scheme = parts.uri.scheme_str().unwrap_or("http");
    let host = parts
        .uri
        .authority()
        .map(|a| a.as_str())
        .or_else(|| parts.headers.get(header::HOST).and_then(|v| v.to_str().ok()))
        .unwrap_or(&function.default_host);
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    Ok(PlatformRequest {
        method: Some(parts.method.to_string()),
        url: format!("{scheme}://{host}{path_and_query}"),
        headers: parts.headers,
        body: PlatformBody::new(bytes),
    })
}

/// 413 when the body hit the size limit, 400 for any other read failure.
fn body_error_status(error: &axum::Error) -> StatusCode {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(error);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return StatusCode::PAYLOAD_TOO_LARGE;
        }
        source = e.source();
    }
    StatusCode::BAD_REQUEST
}

fn into_http_response(response: PlatformResponse) -> Response {
    let status = StatusCode::from_u16(response.status).unwrap_or_else(|_| {
        tracing::error!(status = response.status, "Handler returned an invalid status code");
        StatusCode::INTERNAL_SERVER_ERROR
    });

    let mut http_response = Response::new(Body::from(response.body));
    *http_response.status_mut() = status;

    let headers = http_response.headers_mut();
    for (name, value) in &response.headers {
        match (
            HeaderName::try_from(name.as_str()),
            HeaderValue::try_from(value.as_str()),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => tracing::warn!(header = %name, "Dropping invalid response header"),
        }
    }

    http_response
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
