//! Transport seam and its reqwest-backed implementation.
//!
//! # Design
//! A `Transport` accepts a request together with a one-shot completion
//! callback. `execute` either rejects the request synchronously (and never
//! calls the completion) or accepts it and calls the completion exactly once,
//! from whatever thread finishes the round-trip.
//!
//! `ReqwestTransport` runs each round-trip as a task on a tokio runtime.
//! Redirects are not followed: a 3xx response is handed back as-is.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use reqwest::redirect::Policy;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Callback invoked once with the result of an accepted request.
pub type Completion = Box<dyn FnOnce(Result<HttpResponse, TransportError>) + Send + 'static>;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Start `request`. On `Ok`, `completion` will be called exactly once.
    /// On `Err`, it is dropped without being called.
    fn execute(&self, request: HttpRequest, completion: Completion) -> Result<(), TransportError>;

    /// Stop accepting requests and abort the ones in flight.
    fn close(&self) {}

    /// Stop accepting requests and wait for the ones in flight to finish.
    async fn close_gracefully(&self) {
        self.close();
    }
}

pub struct ReqwestTransport {
    client: reqwest::Client,
    runtime: Handle,
    closed: AtomicBool,
    shutdown: CancellationToken,
    tasks: TaskTracker,
}

impl ReqwestTransport {
    /// Build a transport on the runtime of the calling context.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let runtime = Handle::try_current().map_err(|e| TransportError::Setup(e.to_string()))?;
        Self::with_handle(config, runtime)
    }

    pub fn with_handle(config: &ClientConfig, runtime: Handle) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.as_str())
            .redirect(Policy::none())
            .build()
            .map_err(|e| TransportError::Setup(e.to_string()))?;
        Ok(Self::with_client(client, runtime))
    }

    /// Use a preconfigured reqwest client. Its redirect policy is kept as-is.
    pub fn with_client(client: reqwest::Client, runtime: Handle) -> Self {
        Self {
            client,
            runtime,
            closed: AtomicBool::new(false),
            shutdown: CancellationToken::new(),
            tasks: TaskTracker::new(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Number of requests currently in flight.
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    fn build(&self, request: &HttpRequest) -> Result<reqwest::Request, TransportError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        };
        let mut builder = self.client.request(method, &request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if !request.form.is_empty() {
            builder = builder.form(&request.form);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
            .build()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    fn execute(&self, request: HttpRequest, completion: Completion) -> Result<(), TransportError> {
        if self.is_closed() {
            return Err(TransportError::Closed);
        }
        let wire = self.build(&request)?;
        debug!(method = request.method.as_str(), url = %wire.url(), "dispatching request");

        let client = self.client.clone();
        let shutdown = self.shutdown.clone();
        self.tasks.spawn_on(
            async move {
                let result = tokio::select! {
                    result = round_trip(&client, wire) => result,
                    _ = shutdown.cancelled() => Err(TransportError::Cancelled),
                };
                match &result {
                    Ok(response) => {
                        debug!(url = %response.url, status = response.status, "request completed")
                    }
                    Err(e) => warn!(url = %request.url, error = %e, "request failed"),
                }
                completion(result);
            },
            &self.runtime,
        );
        Ok(())
    }

    fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.tasks.close();
        self.shutdown.cancel();
    }

    async fn close_gracefully(&self) {
        self.closed.store(true, Ordering::Release);
        self.tasks.close();
        self.tasks.wait().await;
    }
}

async fn round_trip(
    client: &reqwest::Client,
    request: reqwest::Request,
) -> Result<HttpResponse, TransportError> {
    let response = client.execute(request).await?;
    let status = response.status().as_u16();
    let url = response.url().to_string();
    let body = response.bytes().await?;
    Ok(HttpResponse { status, body, url })
}
