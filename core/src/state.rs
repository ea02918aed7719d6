//! Presentation state for a list of users.
//!
//! # Design
//! `UserListState` owns the visible user list and error message behind one
//! mutex, so a completed fetch always updates both fields together. Fetches
//! are not queued or cancelled: when calls overlap, each applies its outcome
//! as it completes and the last one to complete wins. Callers that need
//! ordering must serialize their own calls.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::config::DEFAULT_USERS_URL;
use crate::service::{FetchOutcome, UsersApi};
use crate::types::User;

#[derive(Debug, Default)]
struct Snapshot {
    users: Vec<User>,
    error_message: Option<String>,
}

impl Snapshot {
    /// Success replaces the list and clears the message. Failure only sets
    /// the message; previously fetched users stay visible.
    fn apply(&mut self, outcome: FetchOutcome<Vec<User>>) {
        match outcome {
            Ok(users) => {
                debug!(count = users.len(), "replacing users");
                self.users = users;
                self.error_message = None;
            }
            Err(err) => {
                debug!(error = %err, "fetch failed, keeping current users");
                self.error_message = Some(err.display_message().to_string());
            }
        }
    }
}

/// Users and error message shown to the user, refreshed through a `UsersApi`.
pub struct UserListState {
    api: Arc<dyn UsersApi>,
    url: String,
    snapshot: Arc<Mutex<Snapshot>>,
}

impl UserListState {
    /// State that fetches from `DEFAULT_USERS_URL`.
    pub fn new(api: Arc<dyn UsersApi>) -> Self {
        Self::with_url(api, DEFAULT_USERS_URL)
    }

    pub fn with_url(api: Arc<dyn UsersApi>, url: impl Into<String>) -> Self {
        Self {
            api,
            url: url.into(),
            snapshot: Arc::new(Mutex::new(Snapshot::default())),
        }
    }

    /// Issue one fetch through the service. `on_complete` runs exactly once,
    /// after the outcome has been applied, on whatever thread the service
    /// delivered it.
    pub fn fetch_users<F>(&self, on_complete: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let snapshot = Arc::clone(&self.snapshot);
        self.api.fetch_users(
            &self.url,
            Box::new(move |outcome: FetchOutcome<Vec<User>>| {
                lock(&snapshot).apply(outcome);
                on_complete();
            }),
        );
    }

    /// Same as `fetch_users`, awaiting the service instead of taking a callback.
    pub async fn fetch_users_async(&self) {
        let outcome = self.api.fetch_users_async(&self.url).await;
        lock(&self.snapshot).apply(outcome);
    }

    /// Empty the list. The error message is left as is.
    pub fn clear_users(&self) {
        lock(&self.snapshot).users.clear();
    }

    pub fn users(&self) -> Vec<User> {
        lock(&self.snapshot).users.clone()
    }

    pub fn error_message(&self) -> Option<String> {
        lock(&self.snapshot).error_message.clone()
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

// A panic in a caller's callback must not wedge the state.
fn lock(snapshot: &Mutex<Snapshot>) -> MutexGuard<'_, Snapshot> {
    snapshot.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::service::Completion;
    use async_trait::async_trait;

    /// Delivers a fixed outcome synchronously.
    struct Fixed(FetchOutcome<Vec<User>>);

    #[async_trait]
    impl UsersApi for Fixed {
        fn fetch_users(&self, _url: &str, on_complete: Completion) {
            on_complete(self.0.clone());
        }

        async fn fetch_users_async(&self, _url: &str) -> FetchOutcome<Vec<User>> {
            self.0.clone()
        }
    }

    fn user(id: i64, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
            username: format!("{name}_handle"),
            email: format!("{name}@example.com"),
        }
    }

    #[test]
    fn starts_empty_without_message() {
        let state = UserListState::new(Arc::new(Fixed(Ok(Vec::new()))));
        assert!(state.users().is_empty());
        assert!(state.error_message().is_none());
        assert_eq!(state.url(), DEFAULT_USERS_URL);
    }

    #[test]
    fn success_after_failure_clears_message() {
        let mut snapshot = Snapshot::default();
        snapshot.apply(Err(ServiceError::ParsingError));
        assert_eq!(snapshot.error_message.as_deref(), Some("Error parsing JSON"));

        snapshot.apply(Ok(vec![user(1, "ada")]));
        assert!(snapshot.error_message.is_none());
        assert_eq!(snapshot.users.len(), 1);
    }

    #[test]
    fn failure_keeps_previous_users() {
        let mut snapshot = Snapshot::default();
        snapshot.apply(Ok(vec![user(1, "ada"), user(2, "grace")]));
        snapshot.apply(Err(ServiceError::Unexpected));
        assert_eq!(snapshot.users.len(), 2);
        assert_eq!(snapshot.error_message.as_deref(), Some("Unexpected error"));
    }

    #[test]
    fn completion_runs_after_state_is_applied() {
        let state = Arc::new(UserListState::new(Arc::new(Fixed(Ok(vec![user(7, "linus")])))));
        let observed = Arc::new(Mutex::new(None));

        let state_in_callback = Arc::clone(&state);
        let observed_in_callback = Arc::clone(&observed);
        state.fetch_users(move || {
            *observed_in_callback.lock().unwrap() = Some(state_in_callback.users().len());
        });

        assert_eq!(*observed.lock().unwrap(), Some(1));
    }

    #[test]
    fn clear_users_keeps_error_message() {
        let state = UserListState::new(Arc::new(Fixed(Err(ServiceError::InvalidUrl))));
        state.fetch_users(|| {});
        state.clear_users();
        assert!(state.users().is_empty());
        assert_eq!(state.error_message().as_deref(), Some("Unexpected error"));
    }

    #[tokio::test]
    async fn async_fetch_applies_outcome() {
        let state = UserListState::with_url(
            Arc::new(Fixed(Ok(vec![user(1, "ada")]))),
            "http://localhost/users",
        );
        state.fetch_users_async().await;
        assert_eq!(state.users(), vec![user(1, "ada")]);
        assert_eq!(state.url(), "http://localhost/users");
    }
}
