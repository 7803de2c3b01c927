//! Ownership guard
//!
//! Every path that reads, updates or deletes a transaction goes through
//! [`ensure_owner`] before acting on it.

use super::context::AuthenticatedUser;
use super::error::DomainError;
use super::transaction::Transaction;

/// Fail with [`DomainError::NotOwner`] unless `caller` owns `transaction`.
pub fn ensure_owner(transaction: &Transaction, caller: &AuthenticatedUser) -> Result<(), DomainError> {
    if transaction.user_id != caller.user_id {
        return Err(DomainError::NotOwner {
            transaction_id: transaction.id,
        });
    }
    Ok(())
}
