//! Budgets module - the budget period & spend-aggregation engine, plus
//! budget and alert management built on top of it.

mod budget_period;
mod budget_status;
mod budgets_errors;
mod budgets_model;
mod budgets_service;
mod budgets_traits;
mod spend_aggregator;

pub use budget_period::{period_for, BudgetPeriod};
pub use budget_status::BudgetStatusEvaluator;
pub use budgets_errors::BudgetError;
pub use budgets_model::{
    AlertStatus, Budget, BudgetAlert, BudgetFilter, BudgetFrequency, BudgetStatus,
    BudgetUpdate, BudgetWithStatus, NewBudget, NewBudgetAlert,
};
pub use budgets_service::BudgetService;
pub use budgets_traits::{BudgetAlertRepositoryTrait, BudgetRepositoryTrait, BudgetServiceTrait};
pub use spend_aggregator::{SpendAggregator, SpendAggregatorTrait};
