//! Fetch-and-normalize pipeline for the users endpoint.
//!
//! # Design
//! A fetch is four steps: parse the URL, GET it through the transport, decode
//! the body, and fold every failure into `ServiceError`. Each folding step is
//! a small pure function (`parse_url`, `classify_transport`,
//! `classify_decode`) and `run_pipeline` chains them.
//!
//! `FetchService` offers two calling conventions over that one pipeline.
//! `fetch_users_async` awaits it directly; `fetch_users` spawns the very same
//! future on the service's runtime and hands its result to a callback. The
//! callback form therefore cannot disagree with the async form about which
//! scenario maps to which error.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ServiceError, TransportError};
use crate::http::{HttpTransport, ReqwestTransport};
use crate::types::{decode_users, User};

/// Result of a fetch: the payload or exactly one `ServiceError`.
pub type FetchOutcome<T> = Result<T, ServiceError>;

/// Callback invoked once with the outcome of a callback-style fetch.
pub type Completion = Box<dyn FnOnce(FetchOutcome<Vec<User>>) + Send + 'static>;

/// The users service as consumed by presentation state.
///
/// Implemented by `FetchService`; tests substitute doubles to drive
/// `UserListState` through each outcome.
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// Start a fetch and invoke `on_complete` exactly once when it resolves.
    /// Delivery may happen on another thread, after this call returns.
    fn fetch_users(&self, url: &str, on_complete: Completion);

    /// Fetch and return the outcome. Never panics on transport or decode
    /// failure; the outcome carries the error.
    async fn fetch_users_async(&self, url: &str) -> FetchOutcome<Vec<User>>;
}

/// Network-backed users service over an injectable transport.
pub struct FetchService<T> {
    transport: Arc<T>,
    runtime: Handle,
}

impl<T: HttpTransport + 'static> FetchService<T> {
    /// Callback-style fetches are spawned on `runtime`.
    pub fn new(transport: T, runtime: Handle) -> Self {
        Self {
            transport: Arc::new(transport),
            runtime,
        }
    }

    /// Spawn a fetch of `url` and call `on_complete` with its outcome.
    ///
    /// The callback normally runs on a runtime worker once the fetch
    /// resolves. If the task is dropped before it finishes (the runtime is
    /// shut down before or during the fetch), the callback is still invoked
    /// once, with `Unexpected`, on whichever thread dropped the task.
    /// Awaiting the returned handle is optional and only signals that the
    /// task ended.
    pub fn fetch_users<F>(&self, url: &str, on_complete: F) -> JoinHandle<()>
    where
        F: FnOnce(FetchOutcome<Vec<User>>) + Send + 'static,
    {
        let transport = Arc::clone(&self.transport);
        let url = url.to_string();
        let completion = CompletionGuard::new(on_complete);
        self.runtime.spawn(async move {
            let outcome = run_pipeline(transport.as_ref(), &url).await;
            completion.complete(outcome);
        })
    }

    pub async fn fetch_users_async(&self, url: &str) -> FetchOutcome<Vec<User>> {
        run_pipeline(self.transport.as_ref(), url).await
    }
}

impl FetchService<ReqwestTransport> {
    /// Build a service over a reqwest transport configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn from_config(config: &ClientConfig, runtime: Handle) -> Result<Self, TransportError> {
        Ok(Self::new(ReqwestTransport::from_config(config)?, runtime))
    }
}

#[async_trait]
impl<T: HttpTransport + 'static> UsersApi for FetchService<T> {
    fn fetch_users(&self, url: &str, on_complete: Completion) {
        let task = FetchService::fetch_users(self, url, on_complete);
        // Surfaces panics raised inside the caller's callback.
        self.runtime.spawn(async move {
            if let Err(err) = task.await {
                warn!(error = %err, "users fetch task ended abnormally");
            }
        });
    }

    async fn fetch_users_async(&self, url: &str) -> FetchOutcome<Vec<User>> {
        FetchService::fetch_users_async(self, url).await
    }
}

/// Holds a fetch callback until it is invoked. Dropping the guard without
/// completing it delivers `Unexpected`, so the callback runs exactly once
/// even when the task carrying it never finishes.
struct CompletionGuard<F: FnOnce(FetchOutcome<Vec<User>>)> {
    on_complete: Option<F>,
}

impl<F: FnOnce(FetchOutcome<Vec<User>>)> CompletionGuard<F> {
    fn new(on_complete: F) -> Self {
        Self {
            on_complete: Some(on_complete),
        }
    }

    fn complete(mut self, outcome: FetchOutcome<Vec<User>>) {
        if let Some(on_complete) = self.on_complete.take() {
            on_complete(outcome);
        }
    }
}

impl<F: FnOnce(FetchOutcome<Vec<User>>)> Drop for CompletionGuard<F> {
    fn drop(&mut self) {
        if let Some(on_complete) = self.on_complete.take() {
            warn!("users fetch dropped before completing");
            on_complete(Err(ServiceError::Unexpected));
        }
    }
}

#[instrument(level = "debug", skip(transport))]
async fn run_pipeline<T: HttpTransport + ?Sized>(transport: &T, url: &str) -> FetchOutcome<Vec<User>> {
    let url = parse_url(url)?;
    let body = classify_transport(transport.get(&url).await)?;
    let users = classify_decode(decode_users(&body))?;
    debug!(count = users.len(), "fetched users");
    Ok(users)
}

/// Step 1: only absolute, well-formed URLs reach the transport.
pub fn parse_url(raw: &str) -> FetchOutcome<Url> {
    Url::parse(raw).map_err(|err| {
        warn!(url = raw, error = %err, "rejecting malformed url");
        ServiceError::InvalidUrl
    })
}

/// Step 3: any transport failure is `Unexpected`, whatever its cause.
pub fn classify_transport(result: Result<Vec<u8>, TransportError>) -> FetchOutcome<Vec<u8>> {
    result.map_err(|err| {
        warn!(error = %err, "transport failed");
        ServiceError::Unexpected
    })
}

/// Step 4: any decode failure is `ParsingError`.
pub fn classify_decode(result: Result<Vec<User>, serde_json::Error>) -> FetchOutcome<Vec<User>> {
    result.map_err(|err| {
        warn!(error = %err, "response body is not a user list");
        ServiceError::ParsingError
    })
}
