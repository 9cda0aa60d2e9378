//! In-memory repositories and fixtures shared by the service tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::budgets::{
    AlertStatus, Budget, BudgetAlert, BudgetAlertRepositoryTrait, BudgetFilter, BudgetFrequency,
    BudgetRepositoryTrait, BudgetUpdate, NewBudget, NewBudgetAlert,
};
use crate::categories::{
    Category, CategoryRepositoryTrait, CategoryType, CategoryUpdate, NewCategory,
};
use crate::errors::{DatabaseError, Error, Result};
use crate::goals::{
    GoalRepositoryTrait, GoalStatus, NewSavingsGoal, SavingsGoal, SavingsGoalUpdate,
};
use crate::payment_methods::{
    NewPaymentMethod, PaymentMethod, PaymentMethodRepositoryTrait, PaymentMethodUpdate,
};
use crate::reports::{MonthlyReport, NewMonthlyReport, ReportRepositoryTrait};
use crate::transactions::{
    CategoryTotal, NewTransaction, Transaction, TransactionRepositoryTrait, TransactionSearch,
    TransactionStatus, TransactionSumFilter, TransactionType, TransactionUpdate,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

pub fn transaction(
    user_id: &str,
    category_id: Option<&str>,
    transaction_type: TransactionType,
    amount: Decimal,
    transaction_date: NaiveDate,
    status: TransactionStatus,
) -> Transaction {
    Transaction {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        category_id: category_id.map(str::to_string),
        payment_method_id: None,
        transaction_type,
        amount,
        description: "Test transaction".to_string(),
        notes: None,
        transaction_date,
        status,
        is_recurring: false,
        is_reconciled: false,
        tags: None,
        created_at: now(),
        updated_at: now(),
    }
}

pub fn expense_category(id: &str, user_id: &str, name: &str) -> Category {
    Category {
        id: id.to_string(),
        user_id: user_id.to_string(),
        name: name.to_string(),
        category_type: CategoryType::Expense,
        color: "#3498db".to_string(),
        icon: None,
        description: None,
        is_active: true,
        created_at: now(),
    }
}

pub fn budget(
    id: &str,
    user_id: &str,
    category_id: &str,
    amount: Decimal,
    start_date: NaiveDate,
) -> Budget {
    Budget {
        id: id.to_string(),
        user_id: user_id.to_string(),
        category_id: category_id.to_string(),
        amount,
        frequency: BudgetFrequency::Monthly,
        start_date,
        end_date: None,
        alert_threshold: 80,
        is_active: true,
        notes: None,
        created_at: now(),
        updated_at: now(),
    }
}

#[derive(Default)]
pub struct InMemoryCategoryRepository {
    categories: RwLock<Vec<Category>>,
}

impl InMemoryCategoryRepository {
    pub fn insert(&self, category: Category) {
        self.categories.write().unwrap().push(category);
    }
}

#[async_trait]
impl CategoryRepositoryTrait for InMemoryCategoryRepository {
    fn get_category(&self, user_id: &str, category_id: &str) -> Result<Category> {
        self.categories
            .read()
            .unwrap()
            .iter()
            .find(|c| c.id == category_id && c.user_id == user_id)
            .cloned()
            .ok_or_else(|| Error::not_found("Category", category_id))
    }

    fn list_categories(
        &self,
        user_id: &str,
        category_type: Option<CategoryType>,
    ) -> Result<Vec<Category>> {
        let mut found: Vec<Category> = self
            .categories
            .read()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == user_id)
            .filter(|c| category_type.map_or(true, |t| c.category_type == t))
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            (a.category_type.as_str(), &a.name).cmp(&(b.category_type.as_str(), &b.name))
        });
        Ok(found)
    }

    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        let mut categories = self.categories.write().unwrap();
        let duplicate = categories.iter().any(|c| {
            c.user_id == new_category.user_id
                && c.name == new_category.name
                && c.category_type == new_category.category_type
        });
        if duplicate {
            return Err(DatabaseError::UniqueViolation(new_category.name).into());
        }
        let category = Category {
            id: new_category
                .id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            user_id: new_category.user_id,
            name: new_category.name,
            category_type: new_category.category_type,
            color: new_category.color.unwrap_or_default(),
            icon: new_category.icon,
            description: new_category.description,
            is_active: new_category.is_active,
            created_at: now(),
        };
        categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(&self, update: CategoryUpdate) -> Result<Category> {
        let mut categories = self.categories.write().unwrap();
        let category = categories
            .iter_mut()
            .find(|c| c.id == update.id && c.user_id == update.user_id)
            .ok_or_else(|| Error::not_found("Category", update.id.clone()))?;
        category.name = update.name;
        category.color = update.color;
        category.icon = update.icon;
        category.description = update.description;
        category.is_active = update.is_active;
        Ok(category.clone())
    }

    async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<usize> {
        let mut categories = self.categories.write().unwrap();
        let before = categories.len();
        categories.retain(|c| !(c.id == category_id && c.user_id == user_id));
        Ok(before - categories.len())
    }
}

#[derive(Default)]
pub struct InMemoryPaymentMethodRepository {
    methods: RwLock<Vec<PaymentMethod>>,
}

#[async_trait]
impl PaymentMethodRepositoryTrait for InMemoryPaymentMethodRepository {
    fn get_payment_method(
        &self,
        user_id: &str,
        payment_method_id: &str,
    ) -> Result<PaymentMethod> {
        self.methods
            .read()
            .unwrap()
            .iter()
            .find(|m| m.id == payment_method_id && m.user_id == user_id)
            .cloned()
            .ok_or_else(|| Error::not_found("PaymentMethod", payment_method_id))
    }

    fn list_payment_methods(&self, user_id: &str, active_only: bool) -> Result<Vec<PaymentMethod>> {
        let mut found: Vec<PaymentMethod> = self
            .methods
            .read()
            .unwrap()
            .iter()
            .filter(|m| m.user_id == user_id && (m.is_active || !active_only))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    async fn create_payment_method(&self, new_method: NewPaymentMethod) -> Result<PaymentMethod> {
        let mut methods = self.methods.write().unwrap();
        if methods
            .iter()
            .any(|m| m.user_id == new_method.user_id && m.name == new_method.name)
        {
            return Err(DatabaseError::UniqueViolation(new_method.name).into());
        }
        let method = PaymentMethod {
            id: new_method.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            user_id: new_method.user_id,
            name: new_method.name,
            payment_type: new_method.payment_type,
            account_number: new_method.account_number,
            is_active: new_method.is_active,
            created_at: now(),
        };
        methods.push(method.clone());
        Ok(method)
    }

    async fn update_payment_method(&self, update: PaymentMethodUpdate) -> Result<PaymentMethod> {
        let mut methods = self.methods.write().unwrap();
        let method = methods
            .iter_mut()
            .find(|m| m.id == update.id && m.user_id == update.user_id)
            .ok_or_else(|| Error::not_found("PaymentMethod", update.id.clone()))?;
        method.name = update.name;
        method.payment_type = update.payment_type;
        method.account_number = update.account_number;
        method.is_active = update.is_active;
        Ok(method.clone())
    }

    async fn delete_payment_method(
        &self,
        user_id: &str,
        payment_method_id: &str,
    ) -> Result<usize> {
        let mut methods = self.methods.write().unwrap();
        let before = methods.len();
        methods.retain(|m| !(m.id == payment_method_id && m.user_id == user_id));
        Ok(before - methods.len())
    }
}

#[derive(Default)]
pub struct InMemoryTransactionRepository {
    transactions: RwLock<Vec<Transaction>>,
}

impl InMemoryTransactionRepository {
    pub fn insert(&self, transaction: Transaction) {
        self.transactions.write().unwrap().push(transaction);
    }
}

#[async_trait]
impl TransactionRepositoryTrait for InMemoryTransactionRepository {
    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        self.transactions
            .read()
            .unwrap()
            .iter()
            .find(|t| t.id == transaction_id && t.user_id == user_id)
            .cloned()
            .ok_or_else(|| Error::not_found("Transaction", transaction_id))
    }

    fn search_transactions(&self, search: &TransactionSearch) -> Result<Vec<Transaction>> {
        let mut found: Vec<Transaction> = self
            .transactions
            .read()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == search.user_id)
            .filter(|t| search.transaction_type.map_or(true, |k| t.transaction_type == k))
            .filter(|t| {
                search
                    .category_id
                    .as_ref()
                    .map_or(true, |c| t.category_id.as_ref() == Some(c))
            })
            .filter(|t| {
                search
                    .payment_method_id
                    .as_ref()
                    .map_or(true, |p| t.payment_method_id.as_ref() == Some(p))
            })
            .filter(|t| search.status.map_or(true, |s| t.status == s))
            .filter(|t| search.date_from.map_or(true, |d| t.transaction_date >= d))
            .filter(|t| search.date_to.map_or(true, |d| t.transaction_date <= d))
            .filter(|t| search.amount_min.map_or(true, |a| t.amount >= a))
            .filter(|t| search.amount_max.map_or(true, |a| t.amount <= a))
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            (b.transaction_date, b.created_at).cmp(&(a.transaction_date, a.created_at))
        });
        Ok(found)
    }

    fn sum_amount(&self, filter: &TransactionSumFilter) -> Result<Decimal> {
        Ok(self
            .transactions
            .read()
            .unwrap()
            .iter()
            .filter(|t| filter.matches(t))
            .map(|t| t.amount)
            .sum())
    }

    fn sum_by_category(&self, filter: &TransactionSumFilter) -> Result<Vec<CategoryTotal>> {
        let mut groups: HashMap<Option<String>, (Decimal, i64)> = HashMap::new();
        for t in self.transactions.read().unwrap().iter() {
            if filter.matches(t) {
                let entry = groups.entry(t.category_id.clone()).or_default();
                entry.0 += t.amount;
                entry.1 += 1;
            }
        }
        let mut totals: Vec<CategoryTotal> = groups
            .into_iter()
            .map(|(category_id, (total, count))| CategoryTotal {
                category_id,
                category_name: None,
                total,
                count,
            })
            .collect();
        totals.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.category_id.cmp(&b.category_id))
        });
        Ok(totals)
    }

    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        let created = Transaction {
            id: new_transaction
                .id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            user_id: new_transaction.user_id,
            category_id: new_transaction.category_id,
            payment_method_id: new_transaction.payment_method_id,
            transaction_type: new_transaction.transaction_type,
            amount: new_transaction.amount,
            description: new_transaction.description,
            notes: new_transaction.notes,
            transaction_date: new_transaction.transaction_date,
            status: new_transaction.status,
            is_recurring: new_transaction.is_recurring,
            is_reconciled: new_transaction.is_reconciled,
            tags: new_transaction.tags,
            created_at: now(),
            updated_at: now(),
        };
        self.insert(created.clone());
        Ok(created)
    }

    async fn update_transaction(&self, update: TransactionUpdate) -> Result<Transaction> {
        let mut transactions = self.transactions.write().unwrap();
        let t = transactions
            .iter_mut()
            .find(|t| t.id == update.id && t.user_id == update.user_id)
            .ok_or_else(|| Error::not_found("Transaction", update.id.clone()))?;
        t.category_id = update.category_id;
        t.payment_method_id = update.payment_method_id;
        t.transaction_type = update.transaction_type;
        t.amount = update.amount;
        t.description = update.description;
        t.notes = update.notes;
        t.transaction_date = update.transaction_date;
        t.status = update.status;
        t.is_recurring = update.is_recurring;
        t.is_reconciled = update.is_reconciled;
        t.tags = update.tags;
        t.updated_at = now();
        Ok(t.clone())
    }

    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<usize> {
        let mut transactions = self.transactions.write().unwrap();
        let before = transactions.len();
        transactions.retain(|t| !(t.id == transaction_id && t.user_id == user_id));
        Ok(before - transactions.len())
    }
}

#[derive(Default)]
pub struct InMemoryBudgetRepository {
    budgets: RwLock<Vec<Budget>>,
}

#[async_trait]
impl BudgetRepositoryTrait for InMemoryBudgetRepository {
    fn get_budget(&self, user_id: &str, budget_id: &str) -> Result<Budget> {
        self.budgets
            .read()
            .unwrap()
            .iter()
            .find(|b| b.id == budget_id && b.user_id == user_id)
            .cloned()
            .ok_or_else(|| Error::not_found("Budget", budget_id))
    }

    fn list_budgets(&self, user_id: &str, filter: &BudgetFilter) -> Result<Vec<Budget>> {
        let mut found: Vec<Budget> = self
            .budgets
            .read()
            .unwrap()
            .iter()
            .filter(|b| b.user_id == user_id)
            .filter(|b| filter.frequency.map_or(true, |f| b.frequency == f))
            .filter(|b| filter.is_active.map_or(true, |a| b.is_active == a))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(found)
    }

    async fn create_budget(&self, new_budget: NewBudget) -> Result<Budget> {
        let mut budgets = self.budgets.write().unwrap();
        let duplicate = budgets.iter().any(|b| {
            b.user_id == new_budget.user_id
                && b.category_id == new_budget.category_id
                && b.start_date == new_budget.start_date
        });
        if duplicate {
            return Err(DatabaseError::UniqueViolation("budget".to_string()).into());
        }
        let created = Budget {
            id: new_budget.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            user_id: new_budget.user_id,
            category_id: new_budget.category_id,
            amount: new_budget.amount,
            frequency: new_budget.frequency,
            start_date: new_budget.start_date,
            end_date: new_budget.end_date,
            alert_threshold: new_budget.alert_threshold,
            is_active: new_budget.is_active,
            notes: new_budget.notes,
            created_at: now(),
            updated_at: now(),
        };
        budgets.push(created.clone());
        Ok(created)
    }

    async fn update_budget(&self, update: BudgetUpdate) -> Result<Budget> {
        let mut budgets = self.budgets.write().unwrap();
        let b = budgets
            .iter_mut()
            .find(|b| b.id == update.id && b.user_id == update.user_id)
            .ok_or_else(|| Error::not_found("Budget", update.id.clone()))?;
        b.category_id = update.category_id;
        b.amount = update.amount;
        b.frequency = update.frequency;
        b.start_date = update.start_date;
        b.end_date = update.end_date;
        b.alert_threshold = update.alert_threshold;
        b.is_active = update.is_active;
        b.notes = update.notes;
        b.updated_at = now();
        Ok(b.clone())
    }

    async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<usize> {
        let mut budgets = self.budgets.write().unwrap();
        let before = budgets.len();
        budgets.retain(|b| !(b.id == budget_id && b.user_id == user_id));
        Ok(before - budgets.len())
    }
}

#[derive(Default)]
pub struct InMemoryBudgetAlertRepository {
    alerts: RwLock<Vec<BudgetAlert>>,
}

#[async_trait]
impl BudgetAlertRepositoryTrait for InMemoryBudgetAlertRepository {
    fn get_alert(&self, user_id: &str, alert_id: &str) -> Result<BudgetAlert> {
        self.alerts
            .read()
            .unwrap()
            .iter()
            .find(|a| a.id == alert_id && a.user_id == user_id)
            .cloned()
            .ok_or_else(|| Error::not_found("BudgetAlert", alert_id))
    }

    fn list_alerts(&self, user_id: &str, status: Option<AlertStatus>) -> Result<Vec<BudgetAlert>> {
        // Stored oldest first.
        Ok(self
            .alerts
            .read()
            .unwrap()
            .iter()
            .rev()
            .filter(|a| a.user_id == user_id)
            .filter(|a| status.map_or(true, |s| a.status == s))
            .cloned()
            .collect())
    }

    fn find_open_alert(&self, user_id: &str, budget_id: &str) -> Result<Option<BudgetAlert>> {
        Ok(self
            .alerts
            .read()
            .unwrap()
            .iter()
            .rev()
            .find(|a| {
                a.user_id == user_id
                    && a.budget_id == budget_id
                    && a.status != AlertStatus::Resolved
            })
            .cloned())
    }

    async fn create_alert_if_none_open(
        &self,
        new_alert: NewBudgetAlert,
    ) -> Result<Option<BudgetAlert>> {
        let mut alerts = self.alerts.write().unwrap();
        if alerts.iter().any(|a| {
            a.user_id == new_alert.user_id
                && a.budget_id == new_alert.budget_id
                && a.status != AlertStatus::Resolved
        }) {
            return Ok(None);
        }
        let alert = BudgetAlert {
            id: Uuid::new_v4().to_string(),
            budget_id: new_alert.budget_id,
            user_id: new_alert.user_id,
            message: new_alert.message,
            percentage_at_trigger: new_alert.percentage_at_trigger,
            status: AlertStatus::Triggered,
            triggered_at: now(),
            acknowledged_at: None,
        };
        alerts.push(alert.clone());
        Ok(Some(alert))
    }

    async fn update_alert_status(
        &self,
        user_id: &str,
        alert_id: &str,
        status: AlertStatus,
        acknowledged_at: Option<NaiveDateTime>,
    ) -> Result<BudgetAlert> {
        let mut alerts = self.alerts.write().unwrap();
        let alert = alerts
            .iter_mut()
            .find(|a| a.id == alert_id && a.user_id == user_id)
            .ok_or_else(|| Error::not_found("BudgetAlert", alert_id))?;
        alert.status = status;
        alert.acknowledged_at = acknowledged_at;
        Ok(alert.clone())
    }
}

#[derive(Default)]
pub struct InMemoryGoalRepository {
    goals: RwLock<Vec<SavingsGoal>>,
}

#[async_trait]
impl GoalRepositoryTrait for InMemoryGoalRepository {
    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<SavingsGoal> {
        self.goals
            .read()
            .unwrap()
            .iter()
            .find(|g| g.id == goal_id && g.user_id == user_id)
            .cloned()
            .ok_or_else(|| Error::not_found("SavingsGoal", goal_id))
    }

    fn load_goals(&self, user_id: &str, active_only: bool) -> Result<Vec<SavingsGoal>> {
        let mut found: Vec<SavingsGoal> = self
            .goals
            .read()
            .unwrap()
            .iter()
            .filter(|g| g.user_id == user_id)
            .filter(|g| !active_only || g.status == GoalStatus::Active)
            .cloned()
            .collect();
        found.sort_by_key(|g| g.target_date);
        Ok(found)
    }

    async fn insert_new_goal(&self, new_goal: NewSavingsGoal) -> Result<SavingsGoal> {
        let goal = SavingsGoal {
            id: new_goal.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            user_id: new_goal.user_id,
            name: new_goal.name,
            description: new_goal.description,
            target_amount: new_goal.target_amount,
            current_amount: new_goal.current_amount,
            target_date: new_goal.target_date,
            status: new_goal.status,
            category_id: new_goal.category_id,
            created_at: now(),
            updated_at: now(),
        };
        self.goals.write().unwrap().push(goal.clone());
        Ok(goal)
    }

    async fn update_goal(&self, goal_update: SavingsGoalUpdate) -> Result<SavingsGoal> {
        let mut goals = self.goals.write().unwrap();
        let goal = goals
            .iter_mut()
            .find(|g| g.id == goal_update.id && g.user_id == goal_update.user_id)
            .ok_or_else(|| Error::not_found("SavingsGoal", goal_update.id.clone()))?;
        goal.name = goal_update.name;
        goal.description = goal_update.description;
        goal.target_amount = goal_update.target_amount;
        goal.current_amount = goal_update.current_amount;
        goal.target_date = goal_update.target_date;
        goal.status = goal_update.status;
        goal.category_id = goal_update.category_id;
        goal.updated_at = now();
        Ok(goal.clone())
    }

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<usize> {
        let mut goals = self.goals.write().unwrap();
        let before = goals.len();
        goals.retain(|g| !(g.id == goal_id && g.user_id == user_id));
        Ok(before - goals.len())
    }
}

#[derive(Default)]
pub struct InMemoryReportRepository {
    reports: RwLock<Vec<MonthlyReport>>,
}

#[async_trait]
impl ReportRepositoryTrait for InMemoryReportRepository {
    fn get_monthly_report(
        &self,
        user_id: &str,
        month: NaiveDate,
    ) -> Result<Option<MonthlyReport>> {
        Ok(self
            .reports
            .read()
            .unwrap()
            .iter()
            .find(|r| r.user_id == user_id && r.month == month)
            .cloned())
    }

    fn get_recent_reports(&self, user_id: &str, limit: i64) -> Result<Vec<MonthlyReport>> {
        let mut found: Vec<MonthlyReport> = self
            .reports
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.month.cmp(&a.month));
        found.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(found)
    }

    async fn upsert_monthly_report(&self, report: NewMonthlyReport) -> Result<MonthlyReport> {
        let mut reports = self.reports.write().unwrap();
        let id = reports
            .iter()
            .find(|r| r.user_id == report.user_id && r.month == report.month)
            .map(|r| r.id.clone())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        reports.retain(|r| r.id != id);
        let stored = MonthlyReport {
            id,
            user_id: report.user_id,
            month: report.month,
            total_income: report.total_income,
            total_expense: report.total_expense,
            net_savings: report.net_savings,
            savings_rate: report.savings_rate,
            top_expense_category_id: report.top_expense_category_id,
            top_expense_amount: report.top_expense_amount,
            insights: report.insights,
            generated_at: now(),
        };
        reports.push(stored.clone());
        Ok(stored)
    }
}
