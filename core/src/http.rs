//! HTTP transport capability.
//!
//! # Design
//! The service never talks to the network directly. It asks an
//! `HttpTransport` for the body at a URL and gets back bytes or a
//! `TransportError`. Production code uses `ReqwestTransport`; tests inject
//! doubles that return canned bytes or canned errors.
//!
//! The transport does not interpret status codes. Whatever body arrives is
//! handed to the decoder, so an HTML error page surfaces as a parsing failure
//! rather than a transport failure.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::TransportError;

/// Performs a single HTTP GET and yields the raw response body.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<Vec<u8>, TransportError>;
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    async fn get(&self, url: &Url) -> Result<Vec<u8>, TransportError> {
        (**self).get(url).await
    }
}

/// `HttpTransport` backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        Self::new(config.request_timeout, &config.user_agent)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<Vec<u8>, TransportError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(%url, %status, bytes = body.len(), "received response");
        Ok(body.to_vec())
    }
}
