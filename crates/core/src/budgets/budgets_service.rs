use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};

use crate::budgets::budget_status::BudgetStatusEvaluator;
use crate::budgets::budgets_errors::BudgetError;
use crate::budgets::budgets_model::{
    AlertStatus, Budget, BudgetAlert, BudgetFilter, BudgetStatus, BudgetUpdate, BudgetWithStatus,
    NewBudget, NewBudgetAlert,
};
use crate::budgets::budgets_traits::{
    BudgetAlertRepositoryTrait, BudgetRepositoryTrait, BudgetServiceTrait,
};
use crate::budgets::spend_aggregator::SpendAggregatorTrait;
use crate::categories::{CategoryRepositoryTrait, CategoryType};
use crate::errors::{Error, Result};

/// Service for managing budgets, evaluating them and recording alerts
pub struct BudgetService {
    repository: Arc<dyn BudgetRepositoryTrait>,
    alert_repository: Arc<dyn BudgetAlertRepositoryTrait>,
    category_repository: Arc<dyn CategoryRepositoryTrait>,
    evaluator: BudgetStatusEvaluator,
}

impl BudgetService {
    pub fn new(
        repository: Arc<dyn BudgetRepositoryTrait>,
        alert_repository: Arc<dyn BudgetAlertRepositoryTrait>,
        category_repository: Arc<dyn CategoryRepositoryTrait>,
        spend_aggregator: Arc<dyn SpendAggregatorTrait>,
    ) -> Self {
        BudgetService {
            repository,
            alert_repository,
            category_repository,
            evaluator: BudgetStatusEvaluator::new(spend_aggregator),
        }
    }

    /// Budgets may only target one of the user's active expense categories.
    fn check_category(&self, user_id: &str, category_id: &str) -> Result<()> {
        let category = self
            .category_repository
            .get_category(user_id, category_id)
            .map_err(|e| match e {
                Error::NotFound { .. } => BudgetError::InvalidCategory(format!(
                    "Category {} does not exist",
                    category_id
                ))
                .into(),
                other => other,
            })?;
        if category.category_type != CategoryType::Expense {
            return Err(BudgetError::InvalidCategory(format!(
                "Category '{}' is not an expense category",
                category.name
            ))
            .into());
        }
        if !category.is_active {
            return Err(BudgetError::InvalidCategory(format!(
                "Category '{}' is inactive",
                category.name
            ))
            .into());
        }
        Ok(())
    }

    fn category_names(&self, user_id: &str) -> Result<HashMap<String, String>> {
        Ok(self
            .category_repository
            .list_categories(user_id, None)?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect())
    }

    fn filtered_budgets(
        &self,
        user_id: &str,
        filter: &BudgetFilter,
        names: &HashMap<String, String>,
    ) -> Result<Vec<Budget>> {
        let budgets = self.repository.list_budgets(user_id, filter)?;
        let needle = filter
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        let Some(needle) = needle else {
            return Ok(budgets);
        };
        Ok(budgets
            .into_iter()
            .filter(|b| {
                names
                    .get(&b.category_id)
                    .map_or(false, |name| name.to_lowercase().contains(&needle))
            })
            .collect())
    }

    async fn record_alert_if_needed(
        &self,
        budget: &Budget,
        category_name: Option<&str>,
    ) -> Result<Option<BudgetAlert>> {
        if !budget.is_active {
            return Ok(None);
        }
        let status = self.evaluator.evaluate(budget)?;
        if !status.should_alert {
            return Ok(None);
        }
        let label = category_name.unwrap_or(&budget.category_id);
        let message = if status.is_over {
            format!(
                "Budget for {} exceeded: {} spent of {} ({}%)",
                label, status.spent, budget.amount, status.percentage_used
            )
        } else {
            format!(
                "Budget for {} reached {}% of {} ({} spent)",
                label, status.percentage_used, budget.amount, status.spent
            )
        };
        let recorded = self
            .alert_repository
            .create_alert_if_none_open(NewBudgetAlert {
                budget_id: budget.id.clone(),
                user_id: budget.user_id.clone(),
                message,
                percentage_at_trigger: status.percentage_used,
            })
            .await?;
        let Some(alert) = recorded else {
            debug!("Budget {} already has an open alert", budget.id);
            return Ok(None);
        };
        info!(
            "Recorded alert {} for budget {} at {}%",
            alert.id, budget.id, alert.percentage_at_trigger
        );
        Ok(Some(alert))
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    fn get_budget(&self, user_id: &str, budget_id: &str) -> Result<Budget> {
        self.repository.get_budget(user_id, budget_id)
    }

    fn list_budgets(&self, user_id: &str, filter: &BudgetFilter) -> Result<Vec<Budget>> {
        let names = self.category_names(user_id)?;
        self.filtered_budgets(user_id, filter, &names)
    }

    fn get_budget_status(&self, user_id: &str, budget_id: &str) -> Result<BudgetStatus> {
        let budget = self.repository.get_budget(user_id, budget_id)?;
        self.evaluator.evaluate(&budget)
    }

    fn list_budget_statuses(
        &self,
        user_id: &str,
        filter: &BudgetFilter,
    ) -> Result<Vec<BudgetWithStatus>> {
        let names = self.category_names(user_id)?;
        self.filtered_budgets(user_id, filter, &names)?
            .into_iter()
            .map(|budget| {
                let status = self.evaluator.evaluate(&budget)?;
                Ok(BudgetWithStatus {
                    category_name: names.get(&budget.category_id).cloned(),
                    budget,
                    status,
                })
            })
            .collect()
    }

    fn list_alerts(&self, user_id: &str, status: Option<AlertStatus>) -> Result<Vec<BudgetAlert>> {
        self.alert_repository.list_alerts(user_id, status)
    }

    async fn create_budget(&self, new_budget: NewBudget) -> Result<Budget> {
        new_budget.validate()?;
        self.check_category(&new_budget.user_id, &new_budget.category_id)?;
        debug!(
            "Creating {} budget of {} on category {} for user {}",
            new_budget.frequency, new_budget.amount, new_budget.category_id, new_budget.user_id
        );
        self.repository.create_budget(new_budget).await
    }

    async fn update_budget(&self, update: BudgetUpdate) -> Result<Budget> {
        update.validate()?;
        self.repository.get_budget(&update.user_id, &update.id)?;
        self.check_category(&update.user_id, &update.category_id)?;
        self.repository.update_budget(update).await
    }

    async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<usize> {
        self.repository.get_budget(user_id, budget_id)?;
        debug!("Deleting budget {} for user {}", budget_id, user_id);
        self.repository.delete_budget(user_id, budget_id).await
    }

    async fn check_budget_alert(
        &self,
        user_id: &str,
        budget_id: &str,
    ) -> Result<Option<BudgetAlert>> {
        let budget = self.repository.get_budget(user_id, budget_id)?;
        let category_name = match self
            .category_repository
            .get_category(user_id, &budget.category_id)
        {
            Ok(category) => Some(category.name),
            Err(Error::NotFound { .. }) => None,
            Err(e) => return Err(e),
        };
        self.record_alert_if_needed(&budget, category_name.as_deref())
            .await
    }

    async fn check_all_budget_alerts(&self, user_id: &str) -> Result<Vec<BudgetAlert>> {
        let names = self.category_names(user_id)?;
        let filter = BudgetFilter {
            is_active: Some(true),
            ..Default::default()
        };
        let mut alerts = Vec::new();
        for budget in self.repository.list_budgets(user_id, &filter)? {
            let name = names.get(&budget.category_id).map(String::as_str);
            if let Some(alert) = self.record_alert_if_needed(&budget, name).await? {
                alerts.push(alert);
            }
        }
        Ok(alerts)
    }

    async fn acknowledge_alert(&self, user_id: &str, alert_id: &str) -> Result<BudgetAlert> {
        let alert = self.alert_repository.get_alert(user_id, alert_id)?;
        match alert.status {
            AlertStatus::Acknowledged => Ok(alert),
            AlertStatus::Resolved => Err(Error::invalid_input(format!(
                "Alert {} is already resolved",
                alert_id
            ))),
            AlertStatus::Triggered => {
                self.alert_repository
                    .update_alert_status(
                        user_id,
                        alert_id,
                        AlertStatus::Acknowledged,
                        Some(Utc::now().naive_utc()),
                    )
                    .await
            }
        }
    }

    async fn resolve_alert(&self, user_id: &str, alert_id: &str) -> Result<BudgetAlert> {
        let alert = self.alert_repository.get_alert(user_id, alert_id)?;
        if alert.status == AlertStatus::Resolved {
            return Ok(alert);
        }
        debug!("Resolving alert {} for user {}", alert_id, user_id);
        self.alert_repository
            .update_alert_status(user_id, alert_id, AlertStatus::Resolved, alert.acknowledged_at)
            .await
    }
}
