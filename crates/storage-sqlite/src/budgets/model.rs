//! Database models for budgets and budget alerts.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use finflow_core::budgets::{
    AlertStatus, Budget, BudgetAlert, BudgetUpdate, NewBudget, NewBudgetAlert,
};
use finflow_core::errors::Error;

use crate::utils::parse_decimal;

/// Database model for budgets
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct BudgetDB {
    pub id: String,
    pub user_id: String,
    pub category_id: String,
    pub amount: String,
    pub frequency: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub alert_threshold: i32,
    pub is_active: bool,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<BudgetDB> for Budget {
    type Error = Error;

    fn try_from(db: BudgetDB) -> Result<Self, Self::Error> {
        Ok(Self {
            amount: parse_decimal(&db.amount, "budgets.amount")?,
            frequency: db.frequency.parse()?,
            id: db.id,
            user_id: db.user_id,
            category_id: db.category_id,
            start_date: db.start_date,
            end_date: db.end_date,
            alert_threshold: db.alert_threshold,
            is_active: db.is_active,
            notes: db.notes,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewBudget> for BudgetDB {
    fn from(domain: NewBudget) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            user_id: domain.user_id,
            category_id: domain.category_id,
            amount: domain.amount.to_string(),
            frequency: domain.frequency.as_str().to_string(),
            start_date: domain.start_date,
            end_date: domain.end_date,
            alert_threshold: domain.alert_threshold,
            is_active: domain.is_active,
            notes: domain.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

impl BudgetDB {
    pub fn apply(&mut self, update: BudgetUpdate) {
        self.category_id = update.category_id;
        self.amount = update.amount.to_string();
        self.frequency = update.frequency.as_str().to_string();
        self.start_date = update.start_date;
        self.end_date = update.end_date;
        self.alert_threshold = update.alert_threshold;
        self.is_active = update.is_active;
        self.notes = update.notes;
        self.updated_at = chrono::Utc::now().naive_utc();
    }
}

/// Database model for budget alerts
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::budget_alerts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct BudgetAlertDB {
    pub id: String,
    pub budget_id: String,
    pub user_id: String,
    pub message: String,
    pub percentage_at_trigger: String,
    pub status: String,
    pub triggered_at: NaiveDateTime,
    pub acknowledged_at: Option<NaiveDateTime>,
}

impl TryFrom<BudgetAlertDB> for BudgetAlert {
    type Error = Error;

    fn try_from(db: BudgetAlertDB) -> Result<Self, Self::Error> {
        Ok(Self {
            percentage_at_trigger: parse_decimal(
                &db.percentage_at_trigger,
                "budget_alerts.percentage_at_trigger",
            )?,
            status: db.status.parse()?,
            id: db.id,
            budget_id: db.budget_id,
            user_id: db.user_id,
            message: db.message,
            triggered_at: db.triggered_at,
            acknowledged_at: db.acknowledged_at,
        })
    }
}

impl From<NewBudgetAlert> for BudgetAlertDB {
    fn from(domain: NewBudgetAlert) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            budget_id: domain.budget_id,
            user_id: domain.user_id,
            message: domain.message,
            percentage_at_trigger: domain.percentage_at_trigger.to_string(),
            status: AlertStatus::Triggered.as_str().to_string(),
            triggered_at: chrono::Utc::now().naive_utc(),
            acknowledged_at: None,
        }
    }
}
