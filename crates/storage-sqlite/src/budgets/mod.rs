//! SQLite storage implementation for budgets and budget alerts.

mod alert_repository;
mod model;
mod repository;

pub use alert_repository::BudgetAlertRepository;
pub use model::{BudgetAlertDB, BudgetDB};
pub use repository::BudgetRepository;
