//! Income/expense summary
//!
//! Derived aggregation over a user's transactions. Never persisted; callers
//! recompute it from the full transaction set on every request.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transaction::{Transaction, TransactionType};

/// Totals per transaction type, plus per-category breakdowns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    /// `total_income - total_expense`
    pub balance: Decimal,
    pub income_by_category: BTreeMap<String, Decimal>,
    pub expense_by_category: BTreeMap<String, Decimal>,
}

impl Summary {
    /// Summary of no transactions: all zero, no categories.
    pub fn empty() -> Self {
        Self {
            total_income: Decimal::ZERO,
            total_expense: Decimal::ZERO,
            balance: Decimal::ZERO,
            income_by_category: BTreeMap::new(),
            expense_by_category: BTreeMap::new(),
        }
    }

    /// Aggregate a set of transactions.
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut summary = Self::empty();

        for transaction in transactions {
            let (total, by_category) = match transaction.kind {
                TransactionType::Income => {
                    (&mut summary.total_income, &mut summary.income_by_category)
                }
                TransactionType::Expense => {
                    (&mut summary.total_expense, &mut summary.expense_by_category)
                }
            };

            *total += transaction.amount;
            *by_category
                .entry(transaction.category.clone())
                .or_insert(Decimal::ZERO) += transaction.amount;
        }

        summary.balance = summary.total_income - summary.total_expense;
        summary
    }
}

impl Default for Summary {
    fn default() -> Self {
        Self::empty()
    }
}
