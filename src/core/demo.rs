//! Sample data for trying the tracker out.
//!
//! Demo transactions go through the accounting engine like any user entry, so budgets
//! for their categories pick up the spend.

use crate::{
    core::accounting,
    entities::TransactionType,
    errors::Result,
    models::NewTransaction,
    money::Money,
};
use chrono::{Days, NaiveDate};
use sea_orm::DatabaseConnection;
use tracing::info;

struct DemoTransaction {
    description: &'static str,
    category: &'static str,
    amount: Money,
    days_ago: u64,
    transaction_type: TransactionType,
}

const DEMO_TRANSACTIONS: &[DemoTransaction] = &[
    DemoTransaction {
        description: "Monthly salary",
        category: "salary",
        amount: Money::from_cents(350_000),
        days_ago: 6,
        transaction_type: TransactionType::Income,
    },
    DemoTransaction {
        description: "Coffee and breakfast",
        category: "food",
        amount: Money::from_cents(550),
        days_ago: 0,
        transaction_type: TransactionType::Expense,
    },
    DemoTransaction {
        description: "Grocery shopping",
        category: "food",
        amount: Money::from_cents(6789),
        days_ago: 1,
        transaction_type: TransactionType::Expense,
    },
    DemoTransaction {
        description: "Gas station",
        category: "transport",
        amount: Money::from_cents(4500),
        days_ago: 2,
        transaction_type: TransactionType::Expense,
    },
    DemoTransaction {
        description: "Netflix subscription",
        category: "entertainment",
        amount: Money::from_cents(1599),
        days_ago: 3,
        transaction_type: TransactionType::Expense,
    },
    DemoTransaction {
        description: "Dinner at restaurant",
        category: "food",
        amount: Money::from_cents(3250),
        days_ago: 4,
        transaction_type: TransactionType::Expense,
    },
];

/// Records the demo transactions dated relative to `today`. Returns how many were added.
pub async fn add_demo_transactions(db: &DatabaseConnection, today: NaiveDate) -> Result<usize> {
    for demo in DEMO_TRANSACTIONS {
        let date = today.checked_sub_days(Days::new(demo.days_ago)).unwrap_or(today);
        accounting::record_transaction(
            db,
            NewTransaction {
                description: demo.description.to_string(),
                category: demo.category.to_string(),
                amount: demo.amount,
                date,
                transaction_type: demo.transaction_type,
            },
        )
        .await?;
    }

    info!("Added {} demo transactions", DEMO_TRANSACTIONS.len());
    Ok(DEMO_TRANSACTIONS.len())
}
