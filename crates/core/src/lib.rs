//! FinFlow Core - Domain entities, services, and traits.
//!
//! This crate contains the budgeting and spending logic for FinFlow.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod budgets;
pub mod categories;
pub mod constants;
pub mod errors;
pub mod goals;
pub mod payment_methods;
pub mod reports;
pub mod transactions;
pub mod utils;

#[cfg(test)]
mod test_support;

// Re-export the budget engine entry points
pub use budgets::{period_for, BudgetPeriod, BudgetStatus, BudgetStatusEvaluator};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
