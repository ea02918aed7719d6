//! Domain DTOs for the users API.
//!
//! # Design
//! `User` mirrors the mock-server's schema but is defined independently;
//! integration tests catch any schema drift between the two crates. Serde's
//! default behavior gives the decoding rules we want: every field is
//! required, extra fields are ignored, and one bad record fails the whole
//! array.

use serde::{Deserialize, Serialize};

/// A single user record returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
}

/// Decode a response body into users, preserving response order.
pub fn decode_users(body: &[u8]) -> Result<Vec<User>, serde_json::Error> {
    serde_json::from_slice(body)
}
