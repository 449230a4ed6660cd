//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use graphql_function_adapter::config::HostConfig;
use graphql_function_adapter::http::FunctionHost;
use graphql_function_adapter::{
    BoxError, ContextThunk, GraphQLEngine, GraphQLRequest, GraphQLResponse, HttpHandler,
};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Context type used by the integration tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestContext {
    pub user: String,
}

type Respond = dyn Fn(&GraphQLRequest, Option<&TestContext>) -> Result<GraphQLResponse, BoxError>
    + Send
    + Sync;

/// Engine that records what it was given and answers from a script.
pub struct ScriptedEngine {
    resolve_context: bool,
    respond: Box<Respond>,
    pub requests: Arc<Mutex<Vec<GraphQLRequest>>>,
    pub contexts: Arc<Mutex<Vec<TestContext>>>,
    pub starts: Arc<AtomicU32>,
}

impl ScriptedEngine {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&GraphQLRequest, Option<&TestContext>) -> Result<GraphQLResponse, BoxError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            resolve_context: false,
            respond: Box::new(respond),
            requests: Arc::default(),
            contexts: Arc::default(),
            starts: Arc::default(),
        }
    }

    /// Always answer `body` with status `status`.
    pub fn fixed(status: u16, body: &'static str) -> Self {
        Self::new(move |_, _| Ok(GraphQLResponse::complete(body).with_status(status)))
    }

    /// Resolve the context thunk before answering.
    pub fn resolving_context(mut self) -> Self {
        self.resolve_context = true;
        self
    }
}

#[async_trait]
impl GraphQLEngine<TestContext> for ScriptedEngine {
    async fn execute_http_request(
        &self,
        request: GraphQLRequest,
        context: ContextThunk<'_, TestContext>,
    ) -> Result<GraphQLResponse, BoxError> {
        let context = if self.resolve_context {
            let context = context.resolve().await?;
            self.contexts.lock().unwrap().push(context.clone());
            Some(context)
        } else {
            None
        };

        let response = (self.respond)(&request, context.as_ref());
        self.requests.lock().unwrap().push(request);
        response
    }

    fn start_in_background(&self) {
        self.starts.fetch_add(1, Ordering::SeqCst);
    }
}

/// Start a function host on an ephemeral port. Dropping the sender stops it.
pub async fn start_host(
    config: HostConfig,
    handler: Arc<dyn HttpHandler>,
) -> (SocketAddr, oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let host = FunctionHost::new(config, handler);
    tokio::spawn(async move {
        let _ = host
            .run_with_shutdown(listener, async move {
                let _ = stop_rx.await;
            })
            .await;
    });

    (addr, stop_tx)
}
