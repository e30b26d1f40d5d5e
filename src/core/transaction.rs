//! Transaction store - Persists transaction rows.
//!
//! These functions only read and write the `transactions` table. They never touch
//! budgets; callers that need budget bookkeeping go through [`crate::core::accounting`].

use crate::{
    entities::{DEFAULT_CATEGORY, Transaction, TransactionType, transaction},
    errors::{Error, Result},
    models::{NewTransaction, TransactionFilters},
};
use sea_orm::{Condition, QueryOrder, QuerySelect, Set, prelude::*};

/// Inserts a validated transaction and returns the stored row.
pub async fn insert_transaction<C>(db: &C, data: NewTransaction) -> Result<transaction::Model>
where
    C: ConnectionTrait,
{
    let transaction_model = transaction::ActiveModel {
        description: Set(data.description),
        category: Set(Some(data.category)),
        amount: Set(data.amount),
        date: Set(data.date),
        transaction_type: Set(Some(data.transaction_type)),
        ..Default::default()
    };

    transaction_model.insert(db).await.map_err(Into::into)
}

/// Retrieves a specific transaction by its unique ID.
///
/// Returns None if the transaction doesn't exist, allowing callers to decide how
/// a missing row should be reported.
pub async fn get_transaction_by_id<C>(
    db: &C,
    transaction_id: i64,
) -> Result<Option<transaction::Model>>
where
    C: ConnectionTrait,
{
    Transaction::find_by_id(transaction_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every transaction, newest first.
pub async fn get_all_transactions<C>(db: &C) -> Result<Vec<transaction::Model>>
where
    C: ConnectionTrait,
{
    get_transactions(db, &TransactionFilters::default()).await
}

/// Retrieves transactions matching `filters`, ordered by date (newest first).
///
/// Type and category filters use the legacy defaults: filtering on expenses includes
/// rows with no stored type, and filtering on [`DEFAULT_CATEGORY`] includes rows with
/// a missing or empty category.
pub async fn get_transactions<C>(
    db: &C,
    filters: &TransactionFilters,
) -> Result<Vec<transaction::Model>>
where
    C: ConnectionTrait,
{
    let mut condition = Condition::all();

    if let Some(transaction_type) = filters.transaction_type {
        let by_type = transaction::Column::TransactionType.eq(transaction_type);
        condition = condition.add(match transaction_type {
            TransactionType::Expense => Condition::any()
                .add(by_type)
                .add(transaction::Column::TransactionType.is_null()),
            TransactionType::Income => Condition::all().add(by_type),
        });
    }

    if let Some(category) = filters.category.as_deref() {
        let by_category = transaction::Column::Category.eq(category);
        condition = condition.add(if category == DEFAULT_CATEGORY {
            Condition::any()
                .add(by_category)
                .add(transaction::Column::Category.is_null())
                .add(transaction::Column::Category.eq(""))
        } else {
            Condition::all().add(by_category)
        });
    }

    if let Some(from) = filters.date_from {
        condition = condition.add(transaction::Column::Date.gte(from));
    }

    if let Some(to) = filters.date_to {
        condition = condition.add(transaction::Column::Date.lte(to));
    }

    let mut query = Transaction::find()
        .filter(condition)
        .order_by_desc(transaction::Column::Date)
        .order_by_desc(transaction::Column::Id);

    if let Some(limit) = filters.limit {
        query = query.limit(limit);
    }

    query.all(db).await.map_err(Into::into)
}

/// Replaces every user-editable field of an existing transaction.
///
/// Fails with [`Error::TransactionNotFound`] if the row no longer exists.
pub async fn update_transaction<C>(
    db: &C,
    existing: transaction::Model,
    data: NewTransaction,
) -> Result<transaction::Model>
where
    C: ConnectionTrait,
{
    let id = existing.id;
    let mut active_model: transaction::ActiveModel = existing.into();
    active_model.description = Set(data.description);
    active_model.category = Set(Some(data.category));
    active_model.amount = Set(data.amount);
    active_model.date = Set(data.date);
    active_model.transaction_type = Set(Some(data.transaction_type));

    active_model.update(db).await.map_err(|e| match e {
        DbErr::RecordNotUpdated => Error::TransactionNotFound { id },
        other => other.into(),
    })
}

/// Permanently deletes a transaction. Returns false if no row had that ID.
pub async fn delete_transaction_by_id<C>(db: &C, transaction_id: i64) -> Result<bool>
where
    C: ConnectionTrait,
{
    let result = Transaction::delete_by_id(transaction_id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
