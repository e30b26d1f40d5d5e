//! Finance tracker facade - the operations exposed to the surrounding application.
//!
//! [`FinanceTracker`] owns the store client. The process entry point constructs it with
//! [`FinanceTracker::connect`] and tears it down with [`FinanceTracker::close`]; every
//! operation borrows its connection and hands it to the accounting engine.
//!
//! Operations never return errors. Mutations return an [`ActionResult`] and listings
//! fall back to an empty list, with the underlying failure logged.

use crate::{
    config::budgets::BudgetConfig,
    core::{
        accounting, budget as budget_store, dashboard, demo, migration,
        transaction as transaction_store,
    },
    entities::{budget, transaction},
    errors::{Error, FieldErrors, Result},
    models::{BudgetInput, TransactionFilters, TransactionInput},
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::{error, info};

/// Message reported for failures that are not the caller's fault.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Result of a tracker operation as seen by the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "body", rename_all = "snake_case")]
pub enum ActionResult<T> {
    /// The operation completed
    Success(T),
    /// Input was rejected before any write
    Invalid(FieldErrors),
    /// The operation failed; the message is safe to show to users
    Failed(String),
}

impl<T> ActionResult<T> {
    /// Returns true for [`ActionResult::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The success value, if any.
    #[must_use]
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Invalid(_) | Self::Failed(_) => None,
        }
    }
}

impl<T> From<Result<T>> for ActionResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(Error::Validation { errors }) => Self::Invalid(errors),
            Err(Error::TransactionNotFound { .. }) => {
                Self::Failed("Transaction not found".to_string())
            }
            Err(Error::BudgetNotFound { .. }) => Self::Failed("Budget not found".to_string()),
            Err(e) => {
                error!("Operation failed: {}", e);
                Self::Failed(UNEXPECTED_ERROR_MESSAGE.to_string())
            }
        }
    }
}

/// Owner of the store connection and entry point for every tracker operation.
#[derive(Debug)]
pub struct FinanceTracker {
    db: DatabaseConnection,
}

impl FinanceTracker {
    /// Wraps an already established connection. Tables must already exist.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Connects to `database_url` and creates any missing tables.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let db = crate::config::database::create_connection(database_url).await?;
        Ok(Self::new(db))
    }

    /// Closes the underlying connection.
    pub async fn close(self) -> Result<()> {
        self.db.close().await?;
        info!("Database connection closed");
        Ok(())
    }

    /// The underlying connection, for callers that need direct store access.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Validates and records a transaction, charging its category's budget if it is an expense.
    pub async fn add_transaction(
        &self,
        input: TransactionInput,
    ) -> ActionResult<transaction::Model> {
        let result: Result<transaction::Model> = async {
            let data = input.validate()?;
            accounting::record_transaction(&self.db, data).await
        }
        .await;
        result.into()
    }

    /// Validates and replaces a transaction, moving its budget effect accordingly.
    pub async fn edit_transaction(
        &self,
        transaction_id: i64,
        input: TransactionInput,
    ) -> ActionResult<transaction::Model> {
        let result: Result<transaction::Model> = async {
            let data = input.validate()?;
            accounting::edit_transaction(&self.db, transaction_id, data).await
        }
        .await;
        result.into()
    }

    /// Deletes a transaction and reverses its budget effect.
    pub async fn delete_transaction(&self, transaction_id: i64) -> ActionResult<()> {
        accounting::remove_transaction(&self.db, transaction_id)
            .await
            .into()
    }

    /// Lists transactions newest first. Returns an empty list if the store fails.
    pub async fn get_transactions(&self, filters: &TransactionFilters) -> Vec<transaction::Model> {
        transaction_store::get_transactions(&self.db, filters)
            .await
            .unwrap_or_else(|e| {
                error!("Failed to load transactions: {}", e);
                Vec::new()
            })
    }

    /// Creates or updates the budget for a category with a freshly computed spent total.
    pub async fn add_or_update_budget(&self, input: BudgetInput) -> ActionResult<budget::Model> {
        let result: Result<budget::Model> = async {
            let data = input.validate()?;
            accounting::upsert_budget(&self.db, data).await
        }
        .await;
        result.into()
    }

    /// Lists budgets by category. Returns an empty list if the store fails.
    pub async fn get_budgets(&self) -> Vec<budget::Model> {
        budget_store::get_all_budgets(&self.db)
            .await
            .unwrap_or_else(|e| {
                error!("Failed to load budgets: {}", e);
                Vec::new()
            })
    }

    /// Deletes a budget. Its category's transactions are kept.
    pub async fn delete_budget(&self, budget_id: i64) -> ActionResult<()> {
        accounting::remove_budget(&self.db, budget_id).await.into()
    }

    /// Rebuilds every budget's spent total from transactions. Returns how many were rewritten.
    pub async fn recalculate_budget_spent(&self) -> ActionResult<usize> {
        accounting::recalculate_all_budgets(&self.db).await.into()
    }

    /// Builds the dashboard from the current store contents.
    pub async fn get_dashboard(&self) -> ActionResult<dashboard::Dashboard> {
        dashboard::load_dashboard(&self.db).await.into()
    }

    /// Backfills legacy rows, then recomputes budgets if any amounts may have changed.
    pub async fn migrate_legacy_transactions(&self) -> ActionResult<migration::MigrationReport> {
        let result: Result<migration::MigrationReport> = async {
            let report = migration::migrate_legacy_transactions(&self.db).await?;
            if report.updated > 0 {
                accounting::recalculate_all_budgets(&self.db).await?;
            }
            Ok(report)
        }
        .await;
        result.into()
    }

    /// Creates configured budgets whose category has none yet. Returns how many were created.
    pub async fn seed_budgets(&self, configs: &[BudgetConfig]) -> ActionResult<usize> {
        accounting::seed_budgets(&self.db, configs).await.into()
    }

    /// Records the sample transactions, dated relative to today.
    pub async fn add_demo_data(&self) -> ActionResult<usize> {
        let today = chrono::Local::now().date_naive();
        demo::add_demo_transactions(&self.db, today).await.into()
    }
}
