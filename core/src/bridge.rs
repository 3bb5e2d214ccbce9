//! Turns a transport completion callback into an `OutcomeFuture`.
//!
//! # Design
//! `submit` pairs a `Resolver` with an `OutcomeFuture`, moves the resolver
//! into the completion callback and hands the request to the transport.
//! Every path consumes the resolver exactly once:
//!
//! - `execute` returns `Err`: the callback is dropped unused, taking the
//!   pending future with it, and `submit` returns an already-failed
//!   `Dispatch` future instead.
//! - transport error: `Transport`.
//! - response: decoded by the shared `ResponseDecoder`.
//!
//! A transport that drops an accepted callback leaves the future failed
//! with `Abandoned` rather than pending.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::decode::ResponseDecoder;
use crate::error::ClientError;
use crate::http::HttpRequest;
use crate::outcome::{outcome, OutcomeFuture, Resolver};
use crate::transport::Transport;

#[derive(Clone)]
pub struct ResultBridge {
    transport: Arc<dyn Transport>,
    decoder: Arc<ResponseDecoder>,
}

impl ResultBridge {
    pub fn new(transport: Arc<dyn Transport>, decoder: ResponseDecoder) -> Self {
        Self {
            transport,
            decoder: Arc::new(decoder),
        }
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    pub fn decoder(&self) -> &ResponseDecoder {
        &self.decoder
    }

    /// Dispatch `request` and return a future for its decoded body.
    ///
    /// Never blocks and never panics; a request that cannot be dispatched
    /// yields an already-failed future.
    pub fn submit<T>(&self, request: HttpRequest) -> OutcomeFuture<T>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        let url = request.url.clone();
        let (resolver, future) = outcome::<T>(url.clone());
        let decoder = Arc::clone(&self.decoder);
        let request_url = url.clone();

        let dispatched = self.transport.execute(
            request,
            Box::new(move |result| {
                let outcome = match result {
                    Ok(response) => decoder.into_result::<T>(&response, &request_url),
                    Err(e) => Err(ClientError::Transport {
                        url: request_url.clone(),
                        source: Arc::new(e),
                    }),
                };
                complete(&request_url, resolver, outcome);
            }),
        );

        match dispatched {
            Ok(()) => future,
            Err(e) => {
                warn!(url = %url, error = %e, "request could not be dispatched");
                OutcomeFuture::failed(ClientError::Dispatch {
                    url,
                    source: Arc::new(e),
                })
            }
        }
    }
}

fn complete<T>(url: &str, resolver: Resolver<T>, outcome: Result<T, ClientError>) {
    match &outcome {
        Ok(_) => debug!(url, "outcome resolved"),
        Err(e) => debug!(url, error = %e, "outcome failed"),
    }
    resolver.complete_with(outcome);
}
