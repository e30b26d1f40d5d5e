//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and building transactions and budgets with sensible defaults.

use crate::{
    entities::{TransactionType, transaction},
    errors::Result,
    models::{NewBudget, NewTransaction},
    money::Money,
};
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Date used by helpers that do not care about dates.
#[must_use]
pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 15).unwrap_or_default()
}

/// Money from a decimal amount, or zero if it has fractions of a cent.
#[must_use]
pub fn money(amount: f64) -> Money {
    Money::from_decimal(amount).unwrap_or_default()
}

/// Validated transaction data with description `"Test transaction"`.
#[must_use]
pub fn new_transaction(
    category: &str,
    amount: f64,
    transaction_type: TransactionType,
    date: NaiveDate,
) -> NewTransaction {
    NewTransaction {
        description: "Test transaction".to_string(),
        category: category.to_string(),
        amount: money(amount),
        date,
        transaction_type,
    }
}

/// Validated budget data.
#[must_use]
pub fn new_budget(category: &str, cap: f64) -> NewBudget {
    NewBudget {
        category: category.to_string(),
        cap: money(cap),
    }
}

/// An unsaved transaction row for pure-function tests, dated [`test_date`].
#[must_use]
pub fn transaction_row(
    id: i64,
    category: Option<&str>,
    amount: f64,
    transaction_type: Option<TransactionType>,
) -> transaction::Model {
    transaction::Model {
        id,
        description: "Test transaction".to_string(),
        category: category.map(str::to_string),
        amount: money(amount),
        date: test_date(),
        transaction_type,
    }
}

/// Inserts a row directly, bypassing validation, the way older versions stored data.
pub async fn insert_raw_transaction(
    db: &DatabaseConnection,
    category: Option<&str>,
    transaction_type: Option<TransactionType>,
    amount: f64,
) -> Result<transaction::Model> {
    let row = transaction::ActiveModel {
        description: Set("Legacy transaction".to_string()),
        category: Set(category.map(str::to_string)),
        amount: Set(money(amount)),
        date: Set(test_date()),
        transaction_type: Set(transaction_type),
        ..Default::default()
    };
    row.insert(db).await.map_err(Into::into)
}

/// Inserts a row with no category, and optionally no type.
pub async fn insert_legacy_transaction(
    db: &DatabaseConnection,
    transaction_type: Option<TransactionType>,
    amount: f64,
    date: NaiveDate,
) -> Result<transaction::Model> {
    let row = transaction::ActiveModel {
        description: Set("Legacy transaction".to_string()),
        category: Set(None),
        amount: Set(money(amount)),
        date: Set(date),
        transaction_type: Set(transaction_type),
        ..Default::default()
    };
    row.insert(db).await.map_err(Into::into)
}
