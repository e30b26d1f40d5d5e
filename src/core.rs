//! Core business logic - framework-agnostic transaction, budget and reporting operations.
//!
//! The stores (`transaction`, `budget`) only persist rows. The accounting engine is the
//! only module that combines writes to both tables, and the only writer of `spent`.

pub mod accounting;
pub mod budget;
pub mod dashboard;
pub mod demo;
pub mod migration;
pub mod spend;
pub mod transaction;
