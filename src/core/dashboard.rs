//! Dashboard aggregation.
//!
//! Summaries are projections recomputed from the full transaction and budget lists on
//! every request; nothing here is persisted. [`build_dashboard`] is pure so the numbers
//! can be checked without a database.

use crate::{
    core::{budget as budget_store, spend, transaction as transaction_store},
    entities::{TransactionType, budget, transaction},
    errors::Result,
    money::Money,
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::collections::BTreeMap;

/// Share of the cap above which a budget is reported as nearly used up.
pub const NEAR_LIMIT_PERCENT: f64 = 80.0;

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub balance: Money,
    pub total_income: Money,
    pub total_expenses: Money,
    pub transaction_count: usize,
    /// Whole percent of income kept, 0 when there is no income
    pub savings_rate: i64,
}

/// Where a budget stands against its cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    UnderBudget,
    NearLimit,
    OverBudget,
}

/// Progress of a single budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetProgress {
    pub category: String,
    pub budget: Money,
    pub spent: Money,
    /// Negative when overspent
    pub remaining: Money,
    pub percent_spent: f64,
    pub status: BudgetStatus,
}

impl BudgetProgress {
    /// Derives progress figures from a stored budget's cap and cached spent total.
    #[must_use]
    pub fn from_budget(budget: &budget::Model) -> Self {
        let percent_spent = calculate_percent_spent(budget.spent, budget.cap);
        let spent_without_cap = budget.cap <= Money::ZERO && budget.spent > Money::ZERO;
        let status = if percent_spent > 100.0 || spent_without_cap {
            BudgetStatus::OverBudget
        } else if percent_spent > NEAR_LIMIT_PERCENT {
            BudgetStatus::NearLimit
        } else {
            BudgetStatus::UnderBudget
        };

        Self {
            category: budget.category.clone(),
            budget: budget.cap,
            spent: budget.spent,
            remaining: budget.cap - budget.spent,
            percent_spent,
            status,
        }
    }
}

/// Everything the dashboard view needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub summary: DashboardSummary,
    pub spending_by_category: BTreeMap<String, Money>,
    /// `YYYY-MM` to expense total
    pub monthly_spending: BTreeMap<String, Money>,
    pub budgets: Vec<BudgetProgress>,
}

/// Percentage of `cap` consumed by `spent`. A zero cap reports 0.
#[must_use]
pub fn calculate_percent_spent(spent: Money, cap: Money) -> f64 {
    if cap <= Money::ZERO {
        return 0.0;
    }

    (spent.to_decimal() / cap.to_decimal()) * 100.0
}

/// Whole-percent savings rate, rounding halves up. 0 when there is no income.
// Cast safety: income is non-zero so the rate is finite, and realistic percentages sit
// far inside the i64 range.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn calculate_savings_rate(total_income: Money, total_expenses: Money) -> i64 {
    if total_income == Money::ZERO {
        return 0;
    }

    let kept = (total_income - total_expenses).to_decimal();
    (100.0 * kept / total_income.to_decimal() + 0.5).floor() as i64
}

/// Computes the summary block from the transaction list.
#[must_use]
pub fn summarize(transactions: &[transaction::Model]) -> DashboardSummary {
    let total_expenses: Money = transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount)
        .sum();
    let total_income: Money = transactions
        .iter()
        .filter(|t| t.effective_type() == TransactionType::Income)
        .map(|t| t.amount)
        .sum();

    DashboardSummary {
        balance: total_income - total_expenses,
        total_income,
        total_expenses,
        transaction_count: transactions.len(),
        savings_rate: calculate_savings_rate(total_income, total_expenses),
    }
}

/// Expense totals grouped by calendar month (`YYYY-MM`).
#[must_use]
pub fn monthly_spending(transactions: &[transaction::Model]) -> BTreeMap<String, Money> {
    let mut months = BTreeMap::new();
    for t in transactions.iter().filter(|t| t.is_expense()) {
        *months
            .entry(t.date.format("%Y-%m").to_string())
            .or_insert(Money::ZERO) += t.amount;
    }
    months
}

/// Builds the full dashboard from already-loaded rows.
#[must_use]
pub fn build_dashboard(
    transactions: &[transaction::Model],
    budgets: &[budget::Model],
) -> Dashboard {
    Dashboard {
        summary: summarize(transactions),
        spending_by_category: spend::spending_by_category(transactions),
        monthly_spending: monthly_spending(transactions),
        budgets: budgets.iter().map(BudgetProgress::from_budget).collect(),
    }
}

/// Loads every transaction and budget and builds the dashboard.
pub async fn load_dashboard(db: &DatabaseConnection) -> Result<Dashboard> {
    let transactions = transaction_store::get_all_transactions(db).await?;
    let budgets = budget_store::get_all_budgets(db).await?;
    Ok(build_dashboard(&transactions, &budgets))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use chrono::NaiveDate;

    fn budget_row(category: &str, cap: f64, spent: f64) -> budget::Model {
        budget::Model {
            id: 1,
            category: category.to_string(),
            cap: money(cap),
            spent: money(spent),
        }
    }

    #[test]
    fn test_summary_scenario() {
        let transactions = vec![
            transaction_row(1, Some("food"), 100.0, Some(TransactionType::Expense)),
            transaction_row(2, None, 500.0, Some(TransactionType::Income)),
        ];

        let summary = summarize(&transactions);
        assert_eq!(summary.total_expenses, money(100.0));
        assert_eq!(summary.total_income, money(500.0));
        assert_eq!(summary.balance, money(400.0));
        assert_eq!(summary.savings_rate, 80);
        assert_eq!(summary.transaction_count, 2);
    }

    #[test]
    fn test_savings_rate_without_income_is_zero() {
        let transactions = vec![transaction_row(
            1,
            Some("food"),
            100.0,
            Some(TransactionType::Expense),
        )];

        let summary = summarize(&transactions);
        assert_eq!(summary.savings_rate, 0);
        assert_eq!(summary.balance, money(-100.0));

        assert_eq!(calculate_savings_rate(Money::ZERO, Money::ZERO), 0);
    }

    #[test]
    fn test_savings_rate_rounding() {
        assert_eq!(calculate_savings_rate(money(3.0), money(2.0)), 33);
        assert_eq!(calculate_savings_rate(money(200.0), money(1.0)), 100);
        assert_eq!(calculate_savings_rate(money(8.0), money(7.0)), 13);
        assert_eq!(calculate_savings_rate(money(100.0), money(250.0)), -150);
    }

    #[test]
    fn test_legacy_rows_match_typed_expenses() {
        let typed = vec![transaction_row(
            1,
            Some("food"),
            42.0,
            Some(TransactionType::Expense),
        )];
        let legacy = vec![transaction_row(1, Some("food"), 42.0, None)];

        let typed_dashboard = build_dashboard(&typed, &[]);
        let legacy_dashboard = build_dashboard(&legacy, &[]);
        assert_eq!(typed_dashboard, legacy_dashboard);
    }

    #[test]
    fn test_spending_by_category_defaults_missing_category() {
        let transactions = vec![
            transaction_row(1, None, 10.0, None),
            transaction_row(2, Some("food"), 5.0, Some(TransactionType::Expense)),
            transaction_row(4, Some(""), 2.5, Some(TransactionType::Expense)),
            transaction_row(3, Some("salary"), 50.0, Some(TransactionType::Income)),
        ];

        let dashboard = build_dashboard(&transactions, &[]);
        assert_eq!(dashboard.spending_by_category.len(), 2);
        assert_eq!(dashboard.spending_by_category["Other"], money(12.5));
        assert_eq!(dashboard.spending_by_category["food"], money(5.0));
    }

    #[test]
    fn test_monthly_spending_groups_by_month() {
        let mut january = transaction_row(1, Some("food"), 20.0, Some(TransactionType::Expense));
        january.date = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        let mut also_january = transaction_row(2, Some("fuel"), 60.0, None);
        also_january.date = NaiveDate::from_ymd_opt(2025, 1, 28).unwrap();
        let mut february = transaction_row(3, Some("food"), 7.5, Some(TransactionType::Expense));
        february.date = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let mut salary =
            transaction_row(4, Some("salary"), 3500.0, Some(TransactionType::Income));
        salary.date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        let months = monthly_spending(&[january, also_january, february, salary]);
        assert_eq!(months.len(), 2);
        assert_eq!(months["2025-01"], money(80.0));
        assert_eq!(months["2025-02"], money(7.5));
    }

    #[test]
    fn test_budget_progress_status() {
        let under = BudgetProgress::from_budget(&budget_row("food", 400.0, 100.0));
        assert_eq!(under.percent_spent, 25.0);
        assert_eq!(under.remaining, money(300.0));
        assert_eq!(under.status, BudgetStatus::UnderBudget);

        let near = BudgetProgress::from_budget(&budget_row("fuel", 100.0, 90.0));
        assert_eq!(near.status, BudgetStatus::NearLimit);

        let at_cap = BudgetProgress::from_budget(&budget_row("fun", 100.0, 100.0));
        assert_eq!(at_cap.status, BudgetStatus::NearLimit);

        let over = BudgetProgress::from_budget(&budget_row("shopping", 350.0, 421.0));
        assert_eq!(over.status, BudgetStatus::OverBudget);
        assert_eq!(over.remaining, money(-71.0));

        let zero_cap_spent = BudgetProgress::from_budget(&budget_row("gifts", 0.0, 5.0));
        assert_eq!(zero_cap_spent.percent_spent, 0.0);
        assert_eq!(zero_cap_spent.status, BudgetStatus::OverBudget);

        let zero_cap_unused = BudgetProgress::from_budget(&budget_row("gifts", 0.0, 0.0));
        assert_eq!(zero_cap_unused.status, BudgetStatus::UnderBudget);
    }

    #[tokio::test]
    async fn test_load_dashboard_from_store() -> Result<()> {
        let db = setup_test_db().await?;
        crate::core::accounting::upsert_budget(&db, new_budget("food", 400.0)).await?;
        crate::core::accounting::record_transaction(
            &db,
            new_transaction("food", 100.0, TransactionType::Expense, test_date()),
        )
        .await?;
        crate::core::accounting::record_transaction(
            &db,
            new_transaction("salary", 500.0, TransactionType::Income, test_date()),
        )
        .await?;

        let dashboard = load_dashboard(&db).await?;
        assert_eq!(dashboard.summary.balance, money(400.0));
        assert_eq!(dashboard.summary.savings_rate, 80);
        assert_eq!(dashboard.budgets.len(), 1);
        assert_eq!(dashboard.budgets[0].spent, money(100.0));
        assert_eq!(dashboard.budgets[0].percent_spent, 25.0);

        Ok(())
    }
}
