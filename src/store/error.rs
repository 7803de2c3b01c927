//! Store Errors
//!
//! Error types for store operations.

use std::fmt;

use crate::domain::DomainError;

/// A user column with a uniqueness constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Username,
    Email,
}

impl UniqueField {
    /// Message returned to a client whose registration collided
    pub fn conflict_message(&self) -> &'static str {
        match self {
            UniqueField::Username => "Error: Username is already taken!",
            UniqueField::Email => "Error: Email is already in use!",
        }
    }
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniqueField::Username => f.write_str("username"),
            UniqueField::Email => f.write_str("email"),
        }
    }
}

/// Errors that can occur in a store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Lookup or ownership failure detected inside the store's transaction
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Unique constraint violation
    #[error("Duplicate {0}")]
    Duplicate(UniqueField),

    /// Stored row could not be mapped to a domain value
    #[error("Invalid stored data: {0}")]
    InvalidData(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
