//! Error types for the game API client.
//!
//! # Design
//! Every failure reaches the caller through a failed `OutcomeFuture`, so
//! `ClientError` is `Clone`: each observer of a shared future gets its own
//! copy. Non-cloneable sources are held behind `Arc`.
//!
//! `TransportError` is what a `Transport` reports, either synchronously from
//! `execute` (mapped to `ClientError::Dispatch`) or through the completion
//! (mapped to `ClientError::Transport`).

use std::sync::Arc;

use thiserror::Error;

use crate::types::ErrorPayload;

/// Failures reported by a `Transport`.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The transport has been shut down and accepts no more requests.
    #[error("transport is closed")]
    Closed,

    /// The request could not be turned into a wire request (e.g. a bad URL).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The HTTP engine failed before a complete response was received.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The request was in flight when the transport was closed.
    #[error("request cancelled by transport shutdown")]
    Cancelled,

    /// The transport could not be constructed.
    #[error("transport setup failed: {0}")]
    Setup(String),
}

/// Errors a request outcome can fail with.
#[derive(Error, Debug, Clone)]
pub enum ClientError {
    /// The request could not be handed to the transport.
    #[error("failed to dispatch request to {url}: {source}")]
    Dispatch {
        url: String,
        #[source]
        source: Arc<TransportError>,
    },

    /// The transport failed after the request was sent.
    #[error("transport failure for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: Arc<TransportError>,
    },

    /// A response body (success or error shape) did not decode.
    #[error("failed to decode HTTP {status} response from {url}: {source}")]
    Decode {
        url: String,
        status: u16,
        #[source]
        source: Arc<serde_json::Error>,
    },

    /// The service answered with a well-formed error body.
    #[error("API error (HTTP {status}) from {url}: {payload}")]
    Api {
        url: String,
        status: u16,
        payload: ErrorPayload,
    },

    /// The resolving side went away without reporting an outcome.
    #[error("request to {url} was abandoned without an outcome")]
    Abandoned { url: String },
}

impl ClientError {
    pub fn url(&self) -> &str {
        match self {
            ClientError::Dispatch { url, .. }
            | ClientError::Transport { url, .. }
            | ClientError::Decode { url, .. }
            | ClientError::Api { url, .. }
            | ClientError::Abandoned { url } => url,
        }
    }

    pub fn is_api(&self) -> bool {
        matches!(self, ClientError::Api { .. })
    }

    /// The decoded error body, if the service returned one.
    pub fn api_payload(&self) -> Option<&ErrorPayload> {
        match self {
            ClientError::Api { payload, .. } => Some(payload),
            _ => None,
        }
    }
}
