//! Status classification and JSON decoding of transport responses.
//!
//! # Design
//! A `ResponseDecoder` is built once and shared read-only by every request
//! (the bridge holds it behind an `Arc`). The status branch is expressed as
//! a two-variant `Reply`: a success body decoded into the caller's type, or
//! an error body decoded into `ErrorPayload`.
//!
//! Statuses 200 through 399 count as success. 3xx responses are decoded as
//! success bodies and are not followed.

use std::ops::RangeInclusive;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::ClientError;
use crate::http::HttpResponse;
use crate::types::ErrorPayload;

/// Default success range, inclusive of redirects.
pub const SUCCESS_STATUSES: RangeInclusive<u16> = 200..=399;

/// A response body decoded according to its status class.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    Success(T),
    Failure(ErrorPayload),
}

#[derive(Debug, Clone)]
pub struct ResponseDecoder {
    success: RangeInclusive<u16>,
}

impl Default for ResponseDecoder {
    fn default() -> Self {
        Self {
            success: SUCCESS_STATUSES,
        }
    }
}

impl ResponseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_success(&self, status: u16) -> bool {
        self.success.contains(&status)
    }

    /// Decode `response` as `T` or as `ErrorPayload`, depending on its status.
    ///
    /// Unknown JSON fields are ignored in both shapes. Errors are reported
    /// against `request_url`, the URL the caller asked for.
    pub fn decode<T: DeserializeOwned>(
        &self,
        response: &HttpResponse,
        request_url: &str,
    ) -> Result<Reply<T>, ClientError> {
        if self.is_success(response.status) {
            self.parse(response, request_url).map(Reply::Success)
        } else {
            self.parse(response, request_url).map(Reply::Failure)
        }
    }

    /// Decode and fold `Reply::Failure` into `ClientError::Api`.
    pub fn into_result<T: DeserializeOwned>(
        &self,
        response: &HttpResponse,
        request_url: &str,
    ) -> Result<T, ClientError> {
        match self.decode(response, request_url)? {
            Reply::Success(value) => Ok(value),
            Reply::Failure(payload) => Err(ClientError::Api {
                url: request_url.to_string(),
                status: response.status,
                payload,
            }),
        }
    }

    fn parse<U: DeserializeOwned>(
        &self,
        response: &HttpResponse,
        request_url: &str,
    ) -> Result<U, ClientError> {
        serde_json::from_slice(&response.body).map_err(|e| {
            warn!(
                url = %request_url,
                response_url = %response.url,
                status = response.status,
                error = %e,
                "response body did not decode"
            );
            ClientError::Decode {
                url: request_url.to_string(),
                status: response.status,
                source: Arc::new(e),
            }
        })
    }
}
