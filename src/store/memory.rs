//! In-memory store
//!
//! Keeps users and transactions in maps behind one async mutex. Every
//! operation holds the lock for its whole read-check-write, which gives the
//! same all-or-nothing behaviour as a database transaction.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::domain::{
    ensure_owner, AuthenticatedUser, DomainError, NewUser, Transaction, TransactionFields, User,
};

use super::{StoreError, TransactionStore, UniqueField, UserStore};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    transactions: BTreeMap<i64, Transaction>,
    last_user_id: i64,
    last_transaction_id: i64,
}

/// Store backed by process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.users.values().any(|user| user.username == username))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.users.values().any(|user| user.email == email))
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.lock().await;

        if tables.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::Duplicate(UniqueField::Username));
        }
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate(UniqueField::Email));
        }

        tables.last_user_id += 1;
        let stored = User {
            id: tables.last_user_id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        tables.users.insert(stored.id, stored.clone());

        Ok(stored)
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn list_transactions(&self, user_id: i64) -> Result<Vec<Transaction>, StoreError> {
        let tables = self.tables.lock().await;

        let mut transactions: Vec<Transaction> = tables
            .transactions
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

        Ok(transactions)
    }

    async fn insert_transaction(
        &self,
        user_id: i64,
        fields: &TransactionFields,
    ) -> Result<Transaction, StoreError> {
        let mut tables = self.tables.lock().await;

        tables.last_transaction_id += 1;
        let transaction = Transaction {
            id: tables.last_transaction_id,
            amount: fields.amount,
            date: fields.date,
            description: fields.description.clone(),
            kind: fields.kind,
            category: fields.category.clone(),
            user_id,
            created_at: Utc::now(),
        };
        tables.transactions.insert(transaction.id, transaction.clone());

        Ok(transaction)
    }

    async fn update_transaction(
        &self,
        id: i64,
        caller: &AuthenticatedUser,
        fields: &TransactionFields,
    ) -> Result<Transaction, StoreError> {
        let mut tables = self.tables.lock().await;

        let transaction = tables
            .transactions
            .get_mut(&id)
            .ok_or(DomainError::TransactionNotFound(id))?;
        ensure_owner(transaction, caller)?;

        transaction.amount = fields.amount;
        transaction.date = fields.date;
        transaction.description = fields.description.clone();
        transaction.kind = fields.kind;
        transaction.category = fields.category.clone();

        Ok(transaction.clone())
    }

    async fn delete_transaction(&self, id: i64, caller: &AuthenticatedUser) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;

        let transaction = tables
            .transactions
            .get(&id)
            .ok_or(DomainError::TransactionNotFound(id))?;
        ensure_owner(transaction, caller)?;

        tables.transactions.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransactionType;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn new_user(name: &str) -> NewUser {
        NewUser {
            username: name.to_string(),
            email: format!("{name}@example.com"),
            password_hash: "hash".to_string(),
        }
    }

    fn fields(day: u32) -> TransactionFields {
        TransactionFields::new(
            dec!(10),
            NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            TransactionType::Expense,
        )
        .with_category("food")
    }

    #[tokio::test]
    async fn test_insert_user_assigns_ids() {
        let store = MemoryStore::new();

        let alice = store.insert_user(new_user("alice")).await.unwrap();
        let bob = store.insert_user(new_user("bob")).await.unwrap();

        assert_eq!(alice.id, 1);
        assert_eq!(bob.id, 2);
        assert!(store.username_exists("alice").await.unwrap());
        assert!(store.email_exists("bob@example.com").await.unwrap());
        assert!(!store.username_exists("carol").await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_user_rejects_duplicates() {
        let store = MemoryStore::new();
        store.insert_user(new_user("alice")).await.unwrap();

        let same_name = store.insert_user(new_user("alice")).await;
        assert!(matches!(
            same_name,
            Err(StoreError::Duplicate(UniqueField::Username))
        ));

        let mut same_email = new_user("alicia");
        same_email.email = "alice@example.com".to_string();
        let result = store.insert_user(same_email).await;
        assert!(matches!(result, Err(StoreError::Duplicate(UniqueField::Email))));
    }

    #[tokio::test]
    async fn test_list_is_scoped_and_date_descending() {
        let store = MemoryStore::new();
        store.insert_transaction(1, &fields(3)).await.unwrap();
        store.insert_transaction(1, &fields(20)).await.unwrap();
        store.insert_transaction(2, &fields(25)).await.unwrap();
        store.insert_transaction(1, &fields(11)).await.unwrap();

        let listed = store.list_transactions(1).await.unwrap();
        let days: Vec<_> = listed.iter().map(|t| t.date.format("%d").to_string()).collect();

        assert_eq!(days, vec!["20", "11", "03"]);
        assert!(listed.iter().all(|t| t.user_id == 1));
    }

    #[tokio::test]
    async fn test_same_date_lists_newest_id_first() {
        let store = MemoryStore::new();
        let first = store.insert_transaction(1, &fields(9)).await.unwrap();
        let second = store.insert_transaction(1, &fields(9)).await.unwrap();
        let later = store.insert_transaction(1, &fields(10)).await.unwrap();

        let ids: Vec<i64> = store
            .list_transactions(1)
            .await
            .unwrap()
            .iter()
            .map(|t| t.id)
            .collect();

        assert_eq!(ids, vec![later.id, second.id, first.id]);
    }

    #[tokio::test]
    async fn test_update_and_delete_check_owner() {
        let store = MemoryStore::new();
        let created = store.insert_transaction(1, &fields(1)).await.unwrap();
        let intruder = AuthenticatedUser::new(2, "mallory");

        let update = store
            .update_transaction(created.id, &intruder, &fields(2))
            .await;
        assert!(matches!(
            update,
            Err(StoreError::Domain(DomainError::NotOwner { .. }))
        ));

        let delete = store.delete_transaction(created.id, &intruder).await;
        assert!(matches!(
            delete,
            Err(StoreError::Domain(DomainError::NotOwner { .. }))
        ));

        // Untouched
        let listed = store.list_transactions(1).await.unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn test_missing_transaction_is_not_found() {
        let store = MemoryStore::new();
        let caller = AuthenticatedUser::new(1, "alice");

        let result = store.delete_transaction(99, &caller).await;
        assert!(matches!(
            result,
            Err(StoreError::Domain(DomainError::TransactionNotFound(99)))
        ));
    }
}
