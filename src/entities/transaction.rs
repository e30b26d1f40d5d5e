//! Transaction entity - Represents all income and expense records.
//!
//! Each transaction has a description, an optional `category`, an unsigned `amount`,
//! a calendar `date`, and an optional `transaction_type`. Rows written before the
//! category and type columns existed leave them `NULL`; [`Model::effective_type`] and
//! [`Model::effective_category`] apply the defaults every consumer must agree on.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::DEFAULT_CATEGORY;
use crate::money::Money;

/// Direction of a transaction.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in
    #[sea_orm(string_value = "income")]
    Income,
    /// Money going out
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl TransactionType {
    /// Lowercase name as stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!("Unknown transaction type: {other}")),
        }
    }
}

/// Transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Unique identifier for the transaction
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable description of the transaction
    pub description: String,
    /// Category key, `None` on legacy rows
    pub category: Option<String>,
    /// Non-negative magnitude in cents; direction lives in `transaction_type`
    #[sea_orm(column_type = "BigInteger")]
    pub amount: Money,
    /// Calendar date the transaction happened on
    pub date: Date,
    /// `income` or `expense`, `None` on legacy rows
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
}

impl Model {
    /// Stored type, or [`TransactionType::Expense`] for legacy rows without one.
    #[must_use]
    pub fn effective_type(&self) -> TransactionType {
        self.transaction_type.unwrap_or(TransactionType::Expense)
    }

    /// Stored category, or [`DEFAULT_CATEGORY`] for legacy rows with a missing or empty one.
    #[must_use]
    pub fn effective_category(&self) -> &str {
        match self.category.as_deref() {
            Some(category) if !category.is_empty() => category,
            _ => DEFAULT_CATEGORY,
        }
    }

    /// Returns true if this transaction counts against budgets.
    #[must_use]
    pub fn is_expense(&self) -> bool {
        self.effective_type() == TransactionType::Expense
    }
}

/// Transactions reference budgets only through the category string.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::NaiveDate;

    fn legacy_row() -> Model {
        Model {
            id: 1,
            description: "Old import".to_string(),
            category: None,
            amount: Money::from_cents(1250),
            date: NaiveDate::from_ymd_opt(2023, 11, 2).unwrap(),
            transaction_type: None,
        }
    }

    #[test]
    fn test_legacy_row_defaults_to_expense_and_other() {
        let row = legacy_row();
        assert_eq!(row.effective_type(), TransactionType::Expense);
        assert_eq!(row.effective_category(), "Other");
        assert!(row.is_expense());
    }

    #[test]
    fn test_stored_fields_win_over_defaults() {
        let row = Model {
            category: Some("salary".to_string()),
            transaction_type: Some(TransactionType::Income),
            ..legacy_row()
        };
        assert_eq!(row.effective_type(), TransactionType::Income);
        assert_eq!(row.effective_category(), "salary");
        assert!(!row.is_expense());
    }

    #[test]
    fn test_empty_category_counts_as_other() {
        let row = Model {
            category: Some(String::new()),
            ..legacy_row()
        };
        assert_eq!(row.effective_category(), "Other");
    }

    #[test]
    fn test_transaction_type_parsing() {
        assert_eq!("income".parse(), Ok(TransactionType::Income));
        assert_eq!(" Expense ".parse(), Ok(TransactionType::Expense));
        assert!("transfer".parse::<TransactionType>().is_err());
    }
}
