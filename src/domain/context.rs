//! Request identity
//!
//! The caller identity is resolved once from the bearer token at the HTTP
//! boundary and passed explicitly into every service call.

use serde::{Deserialize, Serialize};

/// The user on whose behalf a request is executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub username: String,
}

impl AuthenticatedUser {
    pub fn new(user_id: i64, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
        }
    }
}
