//! Transaction Service
//!
//! CRUD over a user's own transactions and the income/expense summary.

use std::sync::Arc;

use crate::domain::{ensure_owner, AuthenticatedUser, Summary, Transaction, TransactionFields};
use crate::error::AppResult;
use crate::store::TransactionStore;

/// Transaction operations scoped to the caller.
#[derive(Clone)]
pub struct TransactionService {
    store: Arc<dyn TransactionStore>,
}

impl TransactionService {
    pub fn new(store: Arc<dyn TransactionStore>) -> Self {
        Self { store }
    }

    /// The caller's transactions, newest date first.
    pub async fn list(&self, caller: &AuthenticatedUser) -> AppResult<Vec<Transaction>> {
        let transactions = self.store.list_transactions(caller.user_id).await?;

        for transaction in &transactions {
            ensure_owner(transaction, caller)?;
        }

        Ok(transactions)
    }

    /// Record a new transaction owned by the caller.
    pub async fn create(
        &self,
        caller: &AuthenticatedUser,
        fields: TransactionFields,
    ) -> AppResult<Transaction> {
        let fields = fields.normalized();
        fields.validate()?;
        let transaction = self.store.insert_transaction(caller.user_id, &fields).await?;

        tracing::info!(
            user_id = caller.user_id,
            transaction_id = transaction.id,
            kind = %transaction.kind,
            "Transaction created"
        );

        Ok(transaction)
    }

    /// Overwrite the editable fields of one of the caller's transactions.
    pub async fn update(
        &self,
        id: i64,
        caller: &AuthenticatedUser,
        fields: TransactionFields,
    ) -> AppResult<Transaction> {
        let fields = fields.normalized();
        fields.validate()?;
        let transaction = self.store.update_transaction(id, caller, &fields).await?;

        tracing::info!(user_id = caller.user_id, transaction_id = id, "Transaction updated");

        Ok(transaction)
    }

    /// Remove one of the caller's transactions.
    pub async fn delete(&self, id: i64, caller: &AuthenticatedUser) -> AppResult<()> {
        self.store.delete_transaction(id, caller).await?;

        tracing::info!(user_id = caller.user_id, transaction_id = id, "Transaction deleted");

        Ok(())
    }

    /// Totals and per-category breakdown over all of the caller's transactions.
    pub async fn summary(&self, caller: &AuthenticatedUser) -> AppResult<Summary> {
        let transactions = self.list(caller).await?;
        Ok(Summary::from_transactions(&transactions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, TransactionType};
    use crate::error::AppError;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn fields(amount: Decimal, day: u32, kind: TransactionType, category: &str) -> TransactionFields {
        TransactionFields::new(amount, NaiveDate::from_ymd_opt(2024, 4, day).unwrap(), kind)
            .with_category(category)
    }

    fn alice() -> AuthenticatedUser {
        AuthenticatedUser::new(1, "alice")
    }

    fn bob() -> AuthenticatedUser {
        AuthenticatedUser::new(2, "bob")
    }

    #[tokio::test]
    async fn test_summary_example() {
        let service = TransactionService::new(Arc::new(MemoryStore::new()));
        let caller = alice();

        service
            .create(&caller, fields(dec!(100), 1, TransactionType::Income, "salary"))
            .await
            .unwrap();
        service
            .create(&caller, fields(dec!(40), 2, TransactionType::Expense, "food"))
            .await
            .unwrap();
        service
            .create(&caller, fields(dec!(10), 3, TransactionType::Expense, "food"))
            .await
            .unwrap();

        let summary = service.summary(&caller).await.unwrap();
        assert_eq!(summary.total_income, dec!(100));
        assert_eq!(summary.total_expense, dec!(50));
        assert_eq!(summary.balance, dec!(50));
        assert_eq!(summary.income_by_category["salary"], dec!(100));
        assert_eq!(summary.expense_by_category["food"], dec!(50));
    }

    #[tokio::test]
    async fn test_summary_ignores_other_users() {
        let service = TransactionService::new(Arc::new(MemoryStore::new()));
        service
            .create(&bob(), fields(dec!(999), 1, TransactionType::Income, "bonus"))
            .await
            .unwrap();

        let summary = service.summary(&alice()).await.unwrap();
        assert_eq!(summary, Summary::empty());
    }

    #[tokio::test]
    async fn test_list_orders_by_date_descending() {
        let service = TransactionService::new(Arc::new(MemoryStore::new()));
        let caller = alice();
        for day in [5, 28, 1, 17] {
            service
                .create(&caller, fields(dec!(1), day, TransactionType::Expense, "misc"))
                .await
                .unwrap();
        }

        let dates: Vec<NaiveDate> = service
            .list(&caller)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.date)
            .collect();

        let mut expected = dates.clone();
        expected.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, expected);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2024, 4, 28).unwrap());
    }

    #[tokio::test]
    async fn test_update_overwrites_fields() {
        let service = TransactionService::new(Arc::new(MemoryStore::new()));
        let caller = alice();
        let created = service
            .create(&caller, fields(dec!(12), 1, TransactionType::Expense, "food"))
            .await
            .unwrap();

        let updated = service
            .update(
                created.id,
                &caller,
                fields(dec!(15.5), 2, TransactionType::Income, "refund").with_description("Returned"),
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.amount, dec!(15.50));
        assert_eq!(updated.kind, TransactionType::Income);
        assert_eq!(updated.category, "refund");
        assert_eq!(updated.description, "Returned");
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_other_user_cannot_update_or_delete() {
        let service = TransactionService::new(Arc::new(MemoryStore::new()));
        let created = service
            .create(&alice(), fields(dec!(12), 1, TransactionType::Expense, "food"))
            .await
            .unwrap();

        let update = service
            .update(created.id, &bob(), fields(dec!(1), 1, TransactionType::Expense, "x"))
            .await;
        assert!(matches!(
            update,
            Err(AppError::Domain(DomainError::NotOwner { .. }))
        ));

        let delete = service.delete(created.id, &bob()).await;
        assert!(matches!(
            delete,
            Err(AppError::Domain(DomainError::NotOwner { .. }))
        ));

        assert_eq!(service.list(&alice()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let service = TransactionService::new(Arc::new(MemoryStore::new()));

        let update = service
            .update(404, &alice(), fields(dec!(1), 1, TransactionType::Expense, "x"))
            .await;
        assert!(matches!(
            update,
            Err(AppError::Domain(DomainError::TransactionNotFound(404)))
        ));

        let delete = service.delete(404, &alice()).await;
        assert!(matches!(
            delete,
            Err(AppError::Domain(DomainError::TransactionNotFound(404)))
        ));
    }

    #[tokio::test]
    async fn test_oversized_fields_are_rejected_before_storage() {
        let service = TransactionService::new(Arc::new(MemoryStore::new()));
        let caller = alice();

        let long_category = "c".repeat(crate::domain::MAX_CATEGORY_CHARS + 1);
        let create = service
            .create(&caller, fields(dec!(1), 1, TransactionType::Expense, &long_category))
            .await;
        assert!(matches!(
            create,
            Err(AppError::Domain(DomainError::InvalidField { field: "category", .. }))
        ));

        let created = service
            .create(&caller, fields(dec!(1), 1, TransactionType::Expense, "food"))
            .await
            .unwrap();
        let update = service
            .update(
                created.id,
                &caller,
                fields(dec!(100000000000000000), 1, TransactionType::Expense, "food"),
            )
            .await;
        assert!(matches!(
            update,
            Err(AppError::Domain(DomainError::InvalidField { field: "amount", .. }))
        ));

        let stored = service.list(&caller).await.unwrap();
        assert_eq!(stored, vec![created]);
    }

    #[tokio::test]
    async fn test_delete_removes() {
        let service = TransactionService::new(Arc::new(MemoryStore::new()));
        let caller = alice();
        let created = service
            .create(&caller, fields(dec!(3), 1, TransactionType::Expense, "misc"))
            .await
            .unwrap();

        service.delete(created.id, &caller).await.unwrap();

        assert!(service.list(&caller).await.unwrap().is_empty());
    }
}
