//! SQLite storage implementation for FinFlow.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `finflow-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! Money and percentage columns are stored as TEXT and parsed into
//! `rust_decimal::Decimal` on the way out.
//!
//! ```text
//!      core (domain, services, traits)
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod budgets;
pub mod categories;
pub mod goals;
pub mod payment_methods;
pub mod reports;
pub mod transactions;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export repositories
pub use budgets::{BudgetAlertRepository, BudgetRepository};
pub use categories::CategoryRepository;
pub use goals::GoalRepository;
pub use payment_methods::PaymentMethodRepository;
pub use reports::ReportRepository;
pub use transactions::TransactionRepository;

// Re-export from finflow-core for convenience
pub use finflow_core::errors::{DatabaseError, Error, Result};
