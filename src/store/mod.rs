//! Store module
//!
//! Persistence ports for users and transactions, with a PostgreSQL adapter
//! and an in-memory adapter.

mod error;
mod memory;
mod postgres;

use async_trait::async_trait;

use crate::domain::{AuthenticatedUser, NewUser, Transaction, TransactionFields, User};

pub use error::{StoreError, UniqueField};
pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Credential storage.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn username_exists(&self, username: &str) -> Result<bool, StoreError>;

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError>;

    /// Persist a new user.
    ///
    /// Fails with [`StoreError::Duplicate`] when the username or email is
    /// already taken, even if a prior existence check passed.
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError>;
}

/// Transaction storage.
///
/// `update_transaction` and `delete_transaction` run lookup, ownership guard
/// and write as one atomic unit.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// All transactions of a user, newest date first (ties: newest id first).
    async fn list_transactions(&self, user_id: i64) -> Result<Vec<Transaction>, StoreError>;

    async fn insert_transaction(
        &self,
        user_id: i64,
        fields: &TransactionFields,
    ) -> Result<Transaction, StoreError>;

    async fn update_transaction(
        &self,
        id: i64,
        caller: &AuthenticatedUser,
        fields: &TransactionFields,
    ) -> Result<Transaction, StoreError>;

    async fn delete_transaction(&self, id: i64, caller: &AuthenticatedUser) -> Result<(), StoreError>;
}
