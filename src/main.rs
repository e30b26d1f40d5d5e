use budget_ledger::{
    config::{budgets, database},
    errors::{Error, Result},
    models::TransactionFilters,
    tracker::{ActionResult, FinanceTracker},
};
use dotenvy::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Logs a failed startup step and turns it into an error for `main`.
fn require<T>(step: &str, result: ActionResult<T>) -> Result<T> {
    match result {
        ActionResult::Success(value) => Ok(value),
        ActionResult::Invalid(errors) => {
            error!("{} rejected: {}", step, errors);
            Err(Error::Validation { errors })
        }
        ActionResult::Failed(message) => {
            error!("{} failed: {}", step, message);
            Err(Error::Operation { message })
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = budgets::load_default_config()
        .inspect_err(|e| error!("Critical error loading application configuration: {}", e))?;
    info!(
        "Loaded configuration with {} budgets.",
        app_config.budgets.len()
    );

    // 4. Connect to the store and create tables
    let database_url = database::get_database_url();
    if database_url == database::DEFAULT_DATABASE_URL {
        std::fs::create_dir_all("data")?;
    }
    let tracker = FinanceTracker::connect(&database_url)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Bring legacy rows up to the current shape
    let report = require("Legacy migration", tracker.migrate_legacy_transactions().await)?;
    info!(
        "Legacy migration: {} found, {} updated.",
        report.found, report.updated
    );

    // 6. Seed budgets from configuration
    let created = require("Budget seeding", tracker.seed_budgets(&app_config.budgets).await)?;
    info!("Seeded {} budgets.", created);

    // 7. Demo data, only into an empty store
    if app_config.demo_data {
        let existing = tracker
            .get_transactions(&TransactionFilters {
                limit: Some(1),
                ..Default::default()
            })
            .await;
        if existing.is_empty() {
            let added = require("Demo data", tracker.add_demo_data().await)?;
            info!("Added {} demo transactions.", added);
        } else {
            warn!("Store already has transactions, skipping demo data.");
        }
    }

    // 8. Reconcile cached budget totals
    let recalculated = require("Recalculation", tracker.recalculate_budget_spent().await)?;
    info!("Recalculated {} budgets.", recalculated);

    // 9. Report
    let dashboard = require("Dashboard", tracker.get_dashboard().await)?;
    let summary = &dashboard.summary;
    info!(
        "Balance {} | income {} | expenses {} | savings rate {}% | {} transactions",
        summary.balance,
        summary.total_income,
        summary.total_expenses,
        summary.savings_rate,
        summary.transaction_count
    );
    for progress in &dashboard.budgets {
        info!(
            "  {}: {} of {} ({:.1}%, {:?})",
            progress.category,
            progress.spent,
            progress.budget,
            progress.percent_spent,
            progress.status
        );
    }

    tracker.close().await?;
    Ok(())
}
