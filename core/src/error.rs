//! Error types for the users client.
//!
//! # Design
//! `ServiceError` is the closed taxonomy every fetch resolves to. Transport
//! and decoding failures are caught at the `FetchService` boundary and
//! flattened into one of its three variants, so no wrapped error ever reaches
//! a caller. `TransportError` only exists on the inside of that boundary.

use thiserror::Error;

/// Display string shown for `InvalidUrl` and `Unexpected`.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Unexpected error";

/// Display string shown for `ParsingError`.
pub const PARSING_ERROR_MESSAGE: &str = "Error parsing JSON";

/// Every way a users fetch can fail, as seen by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ServiceError {
    /// The URL string did not parse into an absolute URL. The transport was
    /// never invoked.
    #[error("invalid url")]
    InvalidUrl,

    /// The response body did not decode into a list of users.
    #[error("response body is not a valid user list")]
    ParsingError,

    /// The transport reported an error of any kind.
    #[error("unexpected transport failure")]
    Unexpected,
}

impl ServiceError {
    /// Human-readable message for presentation state.
    ///
    /// `InvalidUrl` and `Unexpected` intentionally share one message.
    pub fn display_message(self) -> &'static str {
        match self {
            ServiceError::InvalidUrl | ServiceError::Unexpected => UNEXPECTED_ERROR_MESSAGE,
            ServiceError::ParsingError => PARSING_ERROR_MESSAGE,
        }
    }
}

/// Failure reported by an `HttpTransport`.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Free-form failure for transports that are not backed by reqwest.
    #[error("{0}")]
    Other(String),
}

/// Errors returned by the arithmetic helpers in `calculator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalculatorError {
    #[error("division by zero")]
    DivisionByZero,

    /// The quotient does not fit in an `i64` (`i64::MIN / -1`).
    #[error("arithmetic overflow")]
    Overflow,
}
