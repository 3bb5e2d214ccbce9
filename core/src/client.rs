//! Asynchronous client for the game API.
//!
//! # Design
//! `GameClient` holds a base URL and a `ResultBridge`. Endpoint methods build
//! an `HttpRequest` relative to the base URL and return the bridge's
//! `OutcomeFuture` right away; the round-trip runs on the transport.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::bridge::ResultBridge;
use crate::config::{ClientConfig, DEFAULT_BASE_URL};
use crate::decode::ResponseDecoder;
use crate::error::TransportError;
use crate::http::HttpRequest;
use crate::outcome::OutcomeFuture;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::GameState;

#[derive(Clone)]
pub struct GameClient {
    base_url: String,
    bridge: ResultBridge,
}

impl GameClient {
    /// Client backed by reqwest on the current tokio runtime.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(&config.base_url, Arc::new(transport)))
    }

    /// Client for the public game service with default settings.
    pub fn create_default() -> Result<Self, TransportError> {
        Self::new(&ClientConfig::new(DEFAULT_BASE_URL))
    }

    pub fn with_transport(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            bridge: ResultBridge::new(transport, ResponseDecoder::new()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `base_url + resource` with `query` and decode the body as `T`.
    pub fn get<T>(&self, resource: &str, query: &[(&str, &str)]) -> OutcomeFuture<T>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        let request = HttpRequest::get(self.url(resource)).with_query(query.iter().copied());
        self.bridge.submit(request)
    }

    /// POST `base_url + resource` with url-encoded `form` and decode the body as `T`.
    pub fn post<T>(&self, resource: &str, form: &[(&str, &str)]) -> OutcomeFuture<T>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        let request = HttpRequest::post(self.url(resource)).with_form(form.iter().copied());
        self.bridge.submit(request)
    }

    /// Start a new game.
    pub fn start_game(&self) -> OutcomeFuture<GameState> {
        self.get("", &[])
    }

    /// Current state of an existing game.
    pub fn game(&self, game_id: &str) -> OutcomeFuture<GameState> {
        self.get(&format!("/{game_id}"), &[])
    }

    /// Shut the transport down, aborting requests in flight.
    pub fn close(&self) {
        self.bridge.transport().close();
    }

    /// Shut the transport down after requests in flight have finished.
    pub async fn close_gracefully(&self) {
        self.bridge.transport().close_gracefully().await;
    }

    fn url(&self, resource: &str) -> String {
        format!("{}{resource}", self.base_url)
    }
}
