//! Caller-facing input types and their validation.
//!
//! Inputs arrive loosely typed, the way a form or JSON body would deliver them, and are
//! checked field by field before anything touches the store. Validation collects every
//! problem into one [`FieldErrors`] map instead of stopping at the first.

use crate::{
    entities::{DEFAULT_CATEGORY, TransactionType},
    errors::{Error, FieldErrors, Result},
    money::{Money, MoneyError},
};
use chrono::NaiveDate;
use serde::Deserialize;

/// Format accepted for transaction dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Converts a non-negative decimal amount to [`Money`], recording a message against
/// `field` on failure.
fn validate_amount(
    errors: &mut FieldErrors,
    field: &str,
    label: &str,
    value: f64,
) -> Option<Money> {
    match Money::from_decimal(value) {
        Ok(money) if money.is_negative() => {
            errors.add(field, format!("{label} cannot be negative"));
            None
        }
        Ok(money) => Some(money),
        Err(MoneyError::NotFinite) => {
            errors.add(field, format!("{label} must be a number"));
            None
        }
        Err(MoneyError::OutOfRange) => {
            errors.add(field, format!("{label} is too large"));
            None
        }
        Err(MoneyError::FractionalCents) => {
            errors.add(field, format!("{label} cannot have more than 2 decimal places"));
            None
        }
    }
}

/// Data submitted to create or edit a transaction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionInput {
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    pub amount: f64,
    /// `YYYY-MM-DD`
    pub date: String,
    #[serde(rename = "type")]
    pub transaction_type: String,
}

/// A [`TransactionInput`] that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub description: String,
    pub category: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub transaction_type: TransactionType,
}

impl TransactionInput {
    /// Checks every field and returns the typed transaction data.
    ///
    /// A blank or missing category becomes [`DEFAULT_CATEGORY`].
    pub fn validate(&self) -> Result<NewTransaction> {
        let mut errors = FieldErrors::new();

        let description = self.description.trim();
        if description.is_empty() {
            errors.add("description", "Description is required");
        }

        let amount = validate_amount(&mut errors, "amount", "Amount", self.amount);

        let date = if self.date.trim().is_empty() {
            errors.add("date", "Date is required");
            None
        } else {
            NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT)
                .inspect_err(|_| errors.add("date", "Date must be formatted as YYYY-MM-DD"))
                .ok()
        };

        let transaction_type = self
            .transaction_type
            .parse::<TransactionType>()
            .inspect_err(|_| errors.add("type", "Type must be either income or expense"))
            .ok();

        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
            .to_string();

        match (amount, date, transaction_type) {
            (Some(amount), Some(date), Some(transaction_type)) if errors.is_empty() => {
                Ok(NewTransaction {
                    description: description.to_string(),
                    category,
                    amount,
                    date,
                    transaction_type,
                })
            }
            _ => Err(Error::Validation { errors }),
        }
    }
}

/// Data submitted to create or update a budget.
///
/// Has no `spent` field; the accounting engine derives it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BudgetInput {
    pub category: String,
    pub budget: f64,
}

/// A [`BudgetInput`] that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    pub category: String,
    pub cap: Money,
}

impl BudgetInput {
    /// Checks the category and cap and returns the typed budget data.
    pub fn validate(&self) -> Result<NewBudget> {
        let mut errors = FieldErrors::new();

        let category = self.category.trim();
        if category.is_empty() {
            errors.add("category", "Category is required");
        }

        let cap = validate_amount(&mut errors, "budget", "Budget", self.budget);

        match cap {
            Some(cap) if errors.is_empty() => Ok(NewBudget {
                category: category.to_string(),
                cap,
            }),
            _ => Err(Error::Validation { errors }),
        }
    }
}

/// Optional filters for listing transactions. Unset fields do not filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionFilters {
    /// Matches on effective type, so `Expense` includes legacy untyped rows
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    /// Matches on effective category
    pub category: Option<String>,
    /// Inclusive lower bound
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound
    pub date_to: Option<NaiveDate>,
    pub limit: Option<u64>,
}
