//! Users API client core.
//!
//! # Overview
//! Fetches a list of users from a remote endpoint, folds every failure into
//! the closed `ServiceError` taxonomy, and keeps presentation state
//! (`UserListState`) in sync with the latest outcome.
//!
//! # Design
//! - The network is behind the `HttpTransport` trait; `ReqwestTransport` is
//!   the production implementation and tests inject doubles.
//! - `FetchService` runs one pipeline and exposes it both as a callback
//!   (`fetch_users`) and as an async call (`fetch_users_async`).
//! - `UserListState` depends on the `UsersApi` trait, not on `FetchService`,
//!   so it can be driven through every outcome without a transport.
//! - `User` is defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod calculator;
pub mod config;
pub mod error;
pub mod http;
pub mod service;
pub mod state;
pub mod types;

pub use config::{ClientConfig, DEFAULT_USERS_URL};
pub use error::{CalculatorError, ServiceError, TransportError};
pub use http::{HttpTransport, ReqwestTransport};
pub use service::{Completion, FetchOutcome, FetchService, UsersApi};
pub use state::UserListState;
pub use types::{decode_users, User};
