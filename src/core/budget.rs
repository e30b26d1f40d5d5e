//! Budget store - Persists budget rows and their cached `spent` totals.
//!
//! Provides lookups, inserts and deletes for budgets, plus the two primitives the
//! accounting engine uses to maintain `spent`: an atomic increment and an overwrite.
//! All functions are async and return Result types for error handling.

use crate::{
    entities::{Budget, budget},
    errors::Result,
    models::NewBudget,
    money::Money,
};
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::Expr};

/// Retrieves all budgets, ordered alphabetically by category.
pub async fn get_all_budgets<C>(db: &C) -> Result<Vec<budget::Model>>
where
    C: ConnectionTrait,
{
    Budget::find()
        .order_by_asc(budget::Column::Category)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds the budget for a category, returning None if there is none.
pub async fn get_budget_by_category<C>(db: &C, category: &str) -> Result<Option<budget::Model>>
where
    C: ConnectionTrait,
{
    Budget::find()
        .filter(budget::Column::Category.eq(category))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a budget by its unique ID.
pub async fn get_budget_by_id<C>(db: &C, budget_id: i64) -> Result<Option<budget::Model>>
where
    C: ConnectionTrait,
{
    Budget::find_by_id(budget_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Inserts a new budget row with the given cached `spent`.
pub async fn insert_budget<C>(db: &C, data: NewBudget, spent: Money) -> Result<budget::Model>
where
    C: ConnectionTrait,
{
    let budget = budget::ActiveModel {
        category: Set(data.category),
        cap: Set(data.cap),
        spent: Set(spent),
        ..Default::default()
    };

    budget.insert(db).await.map_err(Into::into)
}

/// Replaces the cap and cached `spent` of an existing budget.
pub async fn update_budget<C>(
    db: &C,
    existing: budget::Model,
    cap: Money,
    spent: Money,
) -> Result<budget::Model>
where
    C: ConnectionTrait,
{
    let mut active_model: budget::ActiveModel = existing.into();
    active_model.cap = Set(cap);
    active_model.spent = Set(spent);
    active_model.update(db).await.map_err(Into::into)
}

/// Adds `amount_delta` to the cached `spent` of the budget for `category`.
///
/// This performs a single atomic integer statement instead of a read-modify-write:
/// `UPDATE budgets SET spent = spent + ? WHERE category = ?`
///
/// Returns false when no budget exists for the category, in which case nothing is written.
pub async fn adjust_budget_spent_atomic<C>(
    db: &C,
    category: &str,
    amount_delta: Money,
) -> Result<bool>
where
    C: ConnectionTrait,
{
    let result = Budget::update_many()
        .col_expr(
            budget::Column::Spent,
            Expr::col(budget::Column::Spent).add(amount_delta.cents()),
        )
        .filter(budget::Column::Category.eq(category))
        .exec(db)
        .await?;

    Ok(result.rows_affected > 0)
}

/// Overwrites the cached `spent` of a budget.
pub async fn set_budget_spent<C>(db: &C, budget_id: i64, spent: Money) -> Result<()>
where
    C: ConnectionTrait,
{
    Budget::update_many()
        .col_expr(budget::Column::Spent, Expr::value(spent.cents()))
        .filter(budget::Column::Id.eq(budget_id))
        .exec(db)
        .await?;

    Ok(())
}

/// Deletes a budget. Transactions in its category are left untouched.
///
/// Returns false if no row had that ID.
pub async fn delete_budget_by_id<C>(db: &C, budget_id: i64) -> Result<bool>
where
    C: ConnectionTrait,
{
    let result = Budget::delete_by_id(budget_id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
