//! Client configuration.
//!
//! Only the pieces the production transport and the state component need:
//! where the users live and how long a single request may take. Everything
//! else is per-call.

use std::time::Duration;

/// Users endpoint queried by `UserListState` unless overridden.
pub const DEFAULT_USERS_URL: &str = "https://jsonplaceholder.typicode.com/users";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for building a `FetchService` over `ReqwestTransport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub users_url: String,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            users_url: DEFAULT_USERS_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_users_url(mut self, users_url: impl Into<String>) -> Self {
        self.users_url = users_url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
