/// Database configuration and connection management
pub mod database;

/// Budget seeding and application settings from config.toml
pub mod budgets;
