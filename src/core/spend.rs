//! Category spend calculator.
//!
//! Sums expense amounts for a category straight from transaction rows. This is the
//! source of truth the cached budget totals are reconciled against, so it applies the
//! same legacy defaults as everything else: no stored type means expense, no stored
//! category means [`crate::entities::DEFAULT_CATEGORY`].

use crate::{entities::transaction, errors::Result, money::Money};
use sea_orm::ConnectionTrait;
use std::collections::BTreeMap;

/// Total expense amount recorded against `category`. Returns zero when nothing matches.
#[must_use]
pub fn category_spend(transactions: &[transaction::Model], category: &str) -> Money {
    transactions
        .iter()
        .filter(|t| t.is_expense() && t.effective_category() == category)
        .map(|t| t.amount)
        .sum()
}

/// Expense totals for every category that has at least one expense.
#[must_use]
pub fn spending_by_category(transactions: &[transaction::Model]) -> BTreeMap<String, Money> {
    let mut spending = BTreeMap::new();
    for t in transactions.iter().filter(|t| t.is_expense()) {
        *spending
            .entry(t.effective_category().to_string())
            .or_insert(Money::ZERO) += t.amount;
    }
    spending
}

/// Loads every transaction and returns [`category_spend`] for `category`.
pub async fn calculate_category_spend<C>(db: &C, category: &str) -> Result<Money>
where
    C: ConnectionTrait,
{
    let transactions = crate::core::transaction::get_all_transactions(db).await?;
    Ok(category_spend(&transactions, category))
}
