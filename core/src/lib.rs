//! Asynchronous client for the Dragons of Mugloar game API.
//!
//! # Overview
//! Each call builds an `HttpRequest`, hands it to a `Transport` together with
//! a completion callback, and immediately returns an `OutcomeFuture`. When the
//! transport reports back, the response is classified by status and decoded
//! into either the caller's type or an `ErrorPayload`, and the future is
//! resolved or failed exactly once.
//!
//! # Design
//! - `GameClient` is the entry point; it owns a `ResultBridge`.
//! - `ResultBridge` does the callback-to-future bridging.
//! - `ResponseDecoder` is built once and shared read-only.
//! - `Transport` is the seam to the HTTP engine; `ReqwestTransport` is the
//!   production implementation and tests plug in scripted ones.
//! - Statuses 200..=399 are success. Redirects are not followed.

pub mod bridge;
pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod http;
pub mod outcome;
pub mod transport;
pub mod types;

pub use bridge::ResultBridge;
pub use client::GameClient;
pub use config::{ClientConfig, ConfigError};
pub use decode::{Reply, ResponseDecoder};
pub use error::{ClientError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use outcome::{outcome, Outcome, OutcomeFuture, Resolver};
pub use transport::{Completion, ReqwestTransport, Transport};
pub use types::{ErrorDetail, ErrorPayload, GameState};
