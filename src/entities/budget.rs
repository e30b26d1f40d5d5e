//! Budget entity - One monthly cap per category with a cached spent total.
//!
//! `spent` is derived data: only the accounting engine writes it, either by atomic
//! increments as transactions change or by recomputing it from the transactions table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Budget database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    /// Unique identifier for the budget
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Category key this budget caps (unique)
    #[sea_orm(unique)]
    pub category: String,
    /// Monthly cap set by the user
    #[sea_orm(column_name = "budget", column_type = "BigInteger")]
    #[serde(rename = "budget")]
    pub cap: Money,
    /// Cached sum of expense amounts in `category`
    #[sea_orm(column_type = "BigInteger")]
    pub spent: Money,
}

/// Budgets have no enforced relationships; see [`super::transaction`].
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
