//! Transaction types
//!
//! A transaction is a single income or expense entry owned by one user.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::amount::{check_amount, normalize_amount};
use super::error::DomainError;

/// Direction of money flow for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Stored/wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INCOME" => Ok(TransactionType::Income),
            "EXPENSE" => Ok(TransactionType::Expense),
            other => Err(DomainError::InvalidField {
                field: "type",
                reason: format!("{other} is neither INCOME nor EXPENSE"),
            }),
        }
    }
}

/// Longest category accepted, in characters
pub const MAX_CATEGORY_CHARS: usize = 100;

/// A persisted transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    /// Owner of the transaction. Never exposed on the wire.
    #[serde(skip)]
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

/// The caller-editable fields of a transaction.
///
/// Used for both creation and in-place update; the owner and identity are
/// never part of the editable set.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFields {
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: String,
    pub kind: TransactionType,
    pub category: String,
}

impl TransactionFields {
    pub fn new(amount: Decimal, date: NaiveDate, kind: TransactionType) -> Self {
        Self {
            amount,
            date,
            description: String::new(),
            kind,
            category: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Round the amount to the stored monetary scale.
    pub fn normalized(mut self) -> Self {
        self.amount = normalize_amount(self.amount);
        self
    }

    /// Check every field fits what the stores can hold.
    pub fn validate(&self) -> Result<(), DomainError> {
        check_amount(self.amount)?;

        if self.category.chars().count() > MAX_CATEGORY_CHARS {
            return Err(DomainError::InvalidField {
                field: "category",
                reason: format!("at most {MAX_CATEGORY_CHARS} characters"),
            });
        }

        Ok(())
    }
}
