//! Legacy transaction backfill.
//!
//! Early records were stored without a `type` or `category` (or with an empty one),
//! and some carried signed amounts. Readers already treat such rows with the legacy
//! defaults; this migration writes those defaults into the rows so the stored data
//! matches what every consumer sees. Running it again finds nothing to change.

use crate::{
    entities::{DEFAULT_CATEGORY, Transaction, TransactionType, transaction},
    errors::Result,
};
use sea_orm::{Condition, Set, prelude::*};
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Outcome of a migration run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Rows that needed at least one fix
    pub found: usize,
    /// Rows written back
    pub updated: usize,
}

/// Fills in missing `type` (expense) and missing or empty `category`
/// ([`DEFAULT_CATEGORY`]) and turns negative amounts into magnitudes.
#[instrument(skip(db))]
pub async fn migrate_legacy_transactions<C>(db: &C) -> Result<MigrationReport>
where
    C: ConnectionTrait,
{
    let legacy_rows = Transaction::find()
        .filter(
            Condition::any()
                .add(transaction::Column::TransactionType.is_null())
                .add(transaction::Column::Category.is_null())
                .add(transaction::Column::Category.eq(""))
                .add(transaction::Column::Amount.lt(0_i64)),
        )
        .all(db)
        .await?;

    let mut report = MigrationReport {
        found: legacy_rows.len(),
        updated: 0,
    };
    info!("Found {} legacy transactions to migrate", report.found);

    for row in legacy_rows {
        let id = row.id;
        let mut active_model: transaction::ActiveModel = row.clone().into();

        if row.transaction_type.is_none() {
            active_model.transaction_type = Set(Some(TransactionType::Expense));
        }
        if row.category.as_deref().is_none_or(str::is_empty) {
            active_model.category = Set(Some(DEFAULT_CATEGORY.to_string()));
        }
        if row.amount.is_negative() {
            active_model.amount = Set(row.amount.abs());
        }

        active_model.update(db).await?;
        debug!("Migrated transaction {}", id);
        report.updated += 1;
    }

    info!("Migration finished, {} transactions updated", report.updated);
    Ok(report)
}
