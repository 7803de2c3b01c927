//! PostgreSQL store
//!
//! `sqlx`-backed implementation of the user and transaction stores.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::{
    ensure_owner, AuthenticatedUser, DomainError, NewUser, Transaction, TransactionFields, User,
};

use super::{StoreError, TransactionStore, UniqueField, UserStore};

const TRANSACTION_COLUMNS: &str =
    "id, amount, date, description, type, category, user_id, created_at";

/// Store backed by a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a new PgStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: i64,
    amount: Decimal,
    date: NaiveDate,
    description: String,
    #[sqlx(rename = "type")]
    kind: String,
    category: String,
    user_id: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = StoreError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let kind = row
            .kind
            .parse()
            .map_err(|e: DomainError| StoreError::InvalidData(e.to_string()))?;

        Ok(Self {
            id: row.id,
            amount: row.amount,
            date: row.date,
            description: row.description,
            kind,
            category: row.category,
            user_id: row.user_id,
            created_at: row.created_at,
        })
    }
}

/// Map a unique violation on `users` to the column that collided
fn map_user_insert_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let field = match db_err.constraint() {
                Some("users_email_key") => UniqueField::Email,
                _ => UniqueField::Username,
            };
            return StoreError::Duplicate(field);
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn username_exists(&self, username: &str) -> Result<bool, StoreError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (username, email, password_hash, created_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING id, username, email, password_hash, created_at
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_insert_error)?;

        tracing::debug!("Inserted user {} ({})", row.username, row.id);

        Ok(row.into())
    }
}

#[async_trait]
impl TransactionStore for PgStore {
    async fn list_transactions(&self, user_id: i64) -> Result<Vec<Transaction>, StoreError> {
        let rows: Vec<TransactionRow> = sqlx::query_as(&format!(
            r#"
            SELECT {TRANSACTION_COLUMNS}
            FROM transactions
            WHERE user_id = $1
            ORDER BY date DESC, id DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Transaction::try_from).collect()
    }

    async fn insert_transaction(
        &self,
        user_id: i64,
        fields: &TransactionFields,
    ) -> Result<Transaction, StoreError> {
        let row: TransactionRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO transactions (amount, date, description, type, category, user_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            RETURNING {TRANSACTION_COLUMNS}
            "#
        ))
        .bind(fields.amount)
        .bind(fields.date)
        .bind(&fields.description)
        .bind(fields.kind.as_str())
        .bind(&fields.category)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn update_transaction(
        &self,
        id: i64,
        caller: &AuthenticatedUser,
        fields: &TransactionFields,
    ) -> Result<Transaction, StoreError> {
        let mut tx = self.pool.begin().await?;

        // Lock the row so the ownership check and the write see the same state
        let existing: Option<TransactionRow> = sqlx::query_as(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let existing: Transaction = existing
            .ok_or(DomainError::TransactionNotFound(id))?
            .try_into()?;
        ensure_owner(&existing, caller)?;

        let row: TransactionRow = sqlx::query_as(&format!(
            r#"
            UPDATE transactions
            SET amount = $2, date = $3, description = $4, type = $5, category = $6
            WHERE id = $1
            RETURNING {TRANSACTION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(fields.amount)
        .bind(fields.date)
        .bind(&fields.description)
        .bind(fields.kind.as_str())
        .bind(&fields.category)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        row.try_into()
    }

    async fn delete_transaction(&self, id: i64, caller: &AuthenticatedUser) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<TransactionRow> = sqlx::query_as(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let existing: Transaction = existing
            .ok_or(DomainError::TransactionNotFound(id))?
            .try_into()?;
        ensure_owner(&existing, caller)?;

        sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}
