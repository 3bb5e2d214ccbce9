//! Single-assignment result cell shared between a resolver and its observers.
//!
//! # Design
//! `outcome(url)` returns a `Resolver` and an `OutcomeFuture` backed by a
//! `tokio::sync::watch` channel holding `Option<Outcome<T>>`.
//!
//! - `Resolver::resolve` / `Resolver::fail` take `self`, so an outcome can be
//!   written at most once.
//! - Dropping a `Resolver` without writing fails the future with
//!   `ClientError::Abandoned`, so no future stays pending forever.
//! - `OutcomeFuture` clones share the cell; any number of tasks or threads
//!   may wait on it concurrently.

use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::watch;

use crate::error::ClientError;

pub type Outcome<T> = Result<T, ClientError>;

/// Create a linked resolver/future pair for a request to `url`.
pub fn outcome<T>(url: impl Into<String>) -> (Resolver<T>, OutcomeFuture<T>) {
    let url = url.into();
    let (tx, rx) = watch::channel(None);
    (
        Resolver {
            tx: Some(tx),
            url: url.clone(),
        },
        OutcomeFuture {
            rx,
            url: url.into(),
        },
    )
}

/// Write side of an outcome cell.
#[derive(Debug)]
pub struct Resolver<T> {
    tx: Option<watch::Sender<Option<Outcome<T>>>>,
    url: String,
}

impl<T> Resolver<T> {
    pub fn resolve(mut self, value: T) {
        self.complete(Ok(value));
    }

    pub fn fail(mut self, error: ClientError) {
        self.complete(Err(error));
    }

    pub fn complete_with(mut self, outcome: Outcome<T>) {
        self.complete(outcome);
    }

    fn complete(&mut self, outcome: Outcome<T>) {
        if let Some(tx) = self.tx.take() {
            tx.send_replace(Some(outcome));
        }
    }
}

impl<T> Drop for Resolver<T> {
    fn drop(&mut self) {
        if self.tx.is_some() {
            let url = std::mem::take(&mut self.url);
            self.complete(Err(ClientError::Abandoned { url }));
        }
    }
}

/// Read side of an outcome cell.
///
/// Await it directly (consumes this handle) or call [`OutcomeFuture::wait`]
/// on a clone. Both yield a clone of the stored outcome.
#[derive(Debug)]
pub struct OutcomeFuture<T> {
    rx: watch::Receiver<Option<Outcome<T>>>,
    url: Arc<str>,
}

impl<T> Clone for OutcomeFuture<T> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
            url: Arc::clone(&self.url),
        }
    }
}

impl<T> OutcomeFuture<T> {
    /// An already-failed future.
    pub fn failed(error: ClientError) -> Self {
        let url = Arc::from(error.url());
        let (_, rx) = watch::channel(Some(Err(error)));
        Self { rx, url }
    }

    /// URL of the request this future belongs to.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_done(&self) -> bool {
        self.rx.borrow().is_some()
    }
}

impl<T: Clone> OutcomeFuture<T> {
    /// The outcome, if it has been written.
    pub fn try_outcome(&self) -> Option<Outcome<T>> {
        self.rx.borrow().clone()
    }

    /// Wait until the outcome is written and return a copy of it.
    pub async fn wait(&mut self) -> Outcome<T> {
        let written = match self.rx.wait_for(Option::is_some).await {
            Ok(slot) => slot.clone(),
            Err(_) => None,
        };
        // A resolver writes before its sender drops, so the slot is only
        // empty here if the channel was torn down some other way.
        written
            .or_else(|| self.rx.borrow().clone())
            .unwrap_or_else(|| {
                Err(ClientError::Abandoned {
                    url: self.url.to_string(),
                })
            })
    }
}

impl<T> IntoFuture for OutcomeFuture<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Output = Outcome<T>;
    type IntoFuture = Pin<Box<dyn Future<Output = Outcome<T>> + Send>>;

    fn into_future(mut self) -> Self::IntoFuture {
        async move { self.wait().await }.boxed()
    }
}
