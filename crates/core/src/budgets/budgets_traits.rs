use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::budgets::budgets_model::{
    AlertStatus, Budget, BudgetAlert, BudgetFilter, BudgetStatus, BudgetUpdate, BudgetWithStatus,
    NewBudget, NewBudgetAlert,
};
use crate::errors::Result;

/// Trait for budget repository operations
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    fn get_budget(&self, user_id: &str, budget_id: &str) -> Result<Budget>;

    /// Budgets matching the frequency and active-flag parts of the filter,
    /// most recent start date first. Name search is applied by the service.
    fn list_budgets(&self, user_id: &str, filter: &BudgetFilter) -> Result<Vec<Budget>>;

    async fn create_budget(&self, new_budget: NewBudget) -> Result<Budget>;

    async fn update_budget(&self, update: BudgetUpdate) -> Result<Budget>;

    async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<usize>;
}

/// Trait for budget alert repository operations
#[async_trait]
pub trait BudgetAlertRepositoryTrait: Send + Sync {
    fn get_alert(&self, user_id: &str, alert_id: &str) -> Result<BudgetAlert>;

    /// Newest first
    fn list_alerts(&self, user_id: &str, status: Option<AlertStatus>) -> Result<Vec<BudgetAlert>>;

    /// The most recent alert for the budget that is not yet resolved
    fn find_open_alert(&self, user_id: &str, budget_id: &str) -> Result<Option<BudgetAlert>>;

    /// Records a triggered alert unless the budget already has an open one.
    /// The check and the insert are atomic, so concurrent callers record at
    /// most one alert per budget.
    async fn create_alert_if_none_open(
        &self,
        new_alert: NewBudgetAlert,
    ) -> Result<Option<BudgetAlert>>;

    async fn update_alert_status(
        &self,
        user_id: &str,
        alert_id: &str,
        status: AlertStatus,
        acknowledged_at: Option<NaiveDateTime>,
    ) -> Result<BudgetAlert>;
}

/// Trait for budget service operations
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    fn get_budget(&self, user_id: &str, budget_id: &str) -> Result<Budget>;
    fn list_budgets(&self, user_id: &str, filter: &BudgetFilter) -> Result<Vec<Budget>>;
    fn get_budget_status(&self, user_id: &str, budget_id: &str) -> Result<BudgetStatus>;
    fn list_budget_statuses(
        &self,
        user_id: &str,
        filter: &BudgetFilter,
    ) -> Result<Vec<BudgetWithStatus>>;
    fn list_alerts(&self, user_id: &str, status: Option<AlertStatus>) -> Result<Vec<BudgetAlert>>;
    async fn create_budget(&self, new_budget: NewBudget) -> Result<Budget>;
    async fn update_budget(&self, update: BudgetUpdate) -> Result<Budget>;
    async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<usize>;
    async fn check_budget_alert(
        &self,
        user_id: &str,
        budget_id: &str,
    ) -> Result<Option<BudgetAlert>>;
    async fn check_all_budget_alerts(&self, user_id: &str) -> Result<Vec<BudgetAlert>>;
    async fn acknowledge_alert(&self, user_id: &str, alert_id: &str) -> Result<BudgetAlert>;
    async fn resolve_alert(&self, user_id: &str, alert_id: &str) -> Result<BudgetAlert>;
}
