//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;

/// Domain-specific errors
///
/// These represent lookup, ownership and field validation failures. They are
/// independent of the web/infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// No transaction with this id exists
    #[error("Transaction not found: {0}")]
    TransactionNotFound(i64),

    /// Caller is not the owner of the transaction
    #[error("Not authorized to access transaction {transaction_id}")]
    NotOwner { transaction_id: i64 },

    /// A submitted or stored field value is outside what can be recorded
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}
