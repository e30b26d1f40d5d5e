//! Budget accounting engine - Keeps cached budget `spent` totals in line with transactions.
//!
//! Two strategies maintain `spent`, exposed as separate entry points:
//!
//! * Incremental adjustment. [`record_transaction`], [`edit_transaction`] and
//!   [`remove_transaction`] write the transaction first and then apply signed deltas to
//!   the affected budgets with an atomic increment. The writes are sequential and
//!   independent: if an adjustment fails it is logged and the transaction write stands.
//! * Full recomputation. [`recalculate_all_budgets`] and [`recalculate_budget`] discard
//!   the cached value and rebuild it from the transactions table. This is authoritative
//!   and repairs any drift left by failed or interleaved adjustments.
//!
//! Budget upserts always go through recomputation, so callers can never set `spent`.

use crate::{
    config::budgets::BudgetConfig,
    core::{budget as budget_store, spend, transaction as transaction_store},
    entities::{budget, transaction},
    errors::{Error, Result},
    models::{NewBudget, NewTransaction},
    money::Money,
};
use sea_orm::DatabaseConnection;
use tracing::{debug, info, instrument, warn};

/// Budget change caused by a single transaction: `amount` against `category`.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetEffect {
    pub category: String,
    pub amount: Money,
}

impl BudgetEffect {
    /// Effect of a stored transaction, or None if it does not count against budgets.
    #[must_use]
    pub fn of_transaction(transaction: &transaction::Model) -> Option<Self> {
        transaction.is_expense().then(|| Self {
            category: transaction.effective_category().to_string(),
            amount: transaction.amount,
        })
    }

    /// The same effect with the sign flipped, used to undo it.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            category: self.category.clone(),
            amount: -self.amount,
        }
    }
}

/// Applies one incremental adjustment, logging and swallowing any failure.
///
/// A missing budget for the category is a silent no-op.
async fn apply_effect(db: &DatabaseConnection, effect: &BudgetEffect) {
    match budget_store::adjust_budget_spent_atomic(db, &effect.category, effect.amount).await {
        Ok(true) => debug!(
            "Adjusted spent for budget '{}' by {}",
            effect.category, effect.amount
        ),
        Ok(false) => debug!(
            "No budget for category '{}', skipping adjustment of {}",
            effect.category, effect.amount
        ),
        Err(e) => warn!(
            "Failed to adjust spent for budget '{}' by {}; a recalculation will repair it: {}",
            effect.category, effect.amount, e
        ),
    }
}

/// Persists a new transaction, then adds its amount to its category's budget if it is
/// an expense.
#[instrument(skip(db))]
pub async fn record_transaction(
    db: &DatabaseConnection,
    data: NewTransaction,
) -> Result<transaction::Model> {
    let created = transaction_store::insert_transaction(db, data).await?;
    info!("Recorded transaction {}", created.id);

    if let Some(effect) = BudgetEffect::of_transaction(&created) {
        apply_effect(db, &effect).await;
    }

    Ok(created)
}

/// Replaces a transaction's data, then reverses its old budget effect and applies the
/// new one as two independent adjustments.
///
/// Fails with [`Error::TransactionNotFound`] before any write if `transaction_id` is unknown.
#[instrument(skip(db))]
pub async fn edit_transaction(
    db: &DatabaseConnection,
    transaction_id: i64,
    data: NewTransaction,
) -> Result<transaction::Model> {
    let existing = transaction_store::get_transaction_by_id(db, transaction_id)
        .await?
        .ok_or(Error::TransactionNotFound { id: transaction_id })?;

    let old_effect = BudgetEffect::of_transaction(&existing);
    let updated = transaction_store::update_transaction(db, existing, data).await?;
    info!("Updated transaction {}", updated.id);

    if let Some(effect) = old_effect {
        apply_effect(db, &effect.reversed()).await;
    }
    if let Some(effect) = BudgetEffect::of_transaction(&updated) {
        apply_effect(db, &effect).await;
    }

    Ok(updated)
}

/// Deletes a transaction, then subtracts its amount from its category's budget if it
/// was an expense.
///
/// Fails with [`Error::TransactionNotFound`] if `transaction_id` is unknown.
#[instrument(skip(db))]
pub async fn remove_transaction(db: &DatabaseConnection, transaction_id: i64) -> Result<()> {
    let existing = transaction_store::get_transaction_by_id(db, transaction_id)
        .await?
        .ok_or(Error::TransactionNotFound { id: transaction_id })?;

    if !transaction_store::delete_transaction_by_id(db, transaction_id).await? {
        return Err(Error::TransactionNotFound { id: transaction_id });
    }
    info!("Deleted transaction {}", transaction_id);

    if let Some(effect) = BudgetEffect::of_transaction(&existing) {
        apply_effect(db, &effect.reversed()).await;
    }

    Ok(())
}

/// Creates or updates the budget for a category.
///
/// The cap comes from the caller; `spent` is always recomputed from transactions, so an
/// upsert also repairs any drift the budget had accumulated.
#[instrument(skip(db))]
pub async fn upsert_budget(db: &DatabaseConnection, data: NewBudget) -> Result<budget::Model> {
    let spent = spend::calculate_category_spend(db, &data.category).await?;

    let saved = match budget_store::get_budget_by_category(db, &data.category).await? {
        Some(existing) => {
            info!(
                "Updating budget '{}': cap {} -> {}, spent {}",
                existing.category, existing.cap, data.cap, spent
            );
            budget_store::update_budget(db, existing, data.cap, spent).await?
        }
        None => {
            info!(
                "Creating budget '{}' with cap {}, spent {}",
                data.category, data.cap, spent
            );
            budget_store::insert_budget(db, data, spent).await?
        }
    };

    Ok(saved)
}

/// Deletes a budget. Fails with [`Error::BudgetNotFound`] if `budget_id` is unknown.
#[instrument(skip(db))]
pub async fn remove_budget(db: &DatabaseConnection, budget_id: i64) -> Result<()> {
    if budget_store::delete_budget_by_id(db, budget_id).await? {
        info!("Deleted budget {}", budget_id);
        Ok(())
    } else {
        Err(Error::BudgetNotFound { id: budget_id })
    }
}

/// Recomputes `spent` for the budget of one category. Returns None if there is no such budget.
#[instrument(skip(db))]
pub async fn recalculate_budget(
    db: &DatabaseConnection,
    category: &str,
) -> Result<Option<budget::Model>> {
    let Some(existing) = budget_store::get_budget_by_category(db, category).await? else {
        return Ok(None);
    };

    let spent = spend::calculate_category_spend(db, category).await?;
    budget_store::set_budget_spent(db, existing.id, spent).await?;

    Ok(Some(budget::Model { spent, ..existing }))
}

/// Recomputes `spent` for every budget from the transactions table.
///
/// Safe to run at any time and any number of times. Returns the number of budgets rewritten.
#[instrument(skip(db))]
pub async fn recalculate_all_budgets(db: &DatabaseConnection) -> Result<usize> {
    let transactions = transaction_store::get_all_transactions(db).await?;
    let budgets = budget_store::get_all_budgets(db).await?;

    for existing in &budgets {
        let spent = spend::category_spend(&transactions, &existing.category);
        if spent != existing.spent {
            debug!(
                "Budget '{}' drifted: cached {}, actual {}",
                existing.category, existing.spent, spent
            );
        }
        budget_store::set_budget_spent(db, existing.id, spent).await?;
    }

    info!("Recalculated spent for {} budgets", budgets.len());
    Ok(budgets.len())
}

/// Creates a budget for every configured category that does not have one yet.
///
/// Existing budgets keep their caps. Returns how many budgets were created.
#[instrument(skip(db, configs))]
pub async fn seed_budgets(db: &DatabaseConnection, configs: &[BudgetConfig]) -> Result<usize> {
    info!(
        "Starting to seed budgets. Found {} configurations.",
        configs.len()
    );

    let mut created = 0;
    for config in configs {
        let data = config.to_input().validate()?;
        if budget_store::get_budget_by_category(db, &data.category)
            .await?
            .is_some()
        {
            debug!("Budget '{}' already exists. Skipping.", data.category);
            continue;
        }
        upsert_budget(db, data).await?;
        created += 1;
    }

    info!("Finished seeding budgets, {} created.", created);
    Ok(created)
}
