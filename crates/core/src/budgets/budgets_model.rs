//! Budget domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::budgets::budget_period::BudgetPeriod;
use crate::budgets::budgets_errors::BudgetError;
use crate::constants::{DEFAULT_ALERT_THRESHOLD, MAX_ALERT_THRESHOLD, MIN_ALERT_THRESHOLD};
use crate::errors::{Error, Result, ValidationError};
use crate::utils::decimal_utils::{has_money_precision, percentage_of};

/// How often a budget resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetFrequency {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl BudgetFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetFrequency::Monthly => "monthly",
            BudgetFrequency::Quarterly => "quarterly",
            BudgetFrequency::Yearly => "yearly",
        }
    }
}

impl fmt::Display for BudgetFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetFrequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "monthly" => Ok(BudgetFrequency::Monthly),
            "quarterly" => Ok(BudgetFrequency::Quarterly),
            "yearly" => Ok(BudgetFrequency::Yearly),
            other => Err(BudgetError::InvalidFrequency(other.to_string()).into()),
        }
    }
}

/// Domain model representing a category budget
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub category_id: String,
    pub amount: Decimal,
    pub frequency: BudgetFrequency,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    /// Percentage (1-100) of the amount at which the budget warrants an alert
    pub alert_threshold: i32,
    pub is_active: bool,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new budget
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub id: Option<String>,
    pub user_id: String,
    pub category_id: String,
    pub amount: Decimal,
    #[serde(default)]
    pub frequency: BudgetFrequency,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub notes: Option<String>,
}

/// Input model for editing a budget
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpdate {
    pub id: String,
    pub user_id: String,
    pub category_id: String,
    pub amount: Decimal,
    pub frequency: BudgetFrequency,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub alert_threshold: i32,
    pub is_active: bool,
    pub notes: Option<String>,
}

fn default_alert_threshold() -> i32 {
    DEFAULT_ALERT_THRESHOLD
}

fn default_true() -> bool {
    true
}

fn validate_budget_fields(
    user_id: &str,
    category_id: &str,
    amount: Decimal,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    alert_threshold: i32,
) -> Result<()> {
    if user_id.trim().is_empty() {
        return Err(ValidationError::MissingField("userId".to_string()).into());
    }
    if category_id.trim().is_empty() {
        return Err(ValidationError::MissingField("categoryId".to_string()).into());
    }
    if amount <= Decimal::ZERO {
        return Err(
            BudgetError::InvalidAmount("Budget amount must be greater than 0".to_string()).into(),
        );
    }
    if !has_money_precision(amount) {
        return Err(BudgetError::InvalidAmount(format!(
            "Budget amount {} has more than 2 decimal places",
            amount
        ))
        .into());
    }
    if !(MIN_ALERT_THRESHOLD..=MAX_ALERT_THRESHOLD).contains(&alert_threshold) {
        return Err(BudgetError::InvalidAlertThreshold(alert_threshold).into());
    }
    if let Some(end) = end_date {
        if end < start_date {
            return Err(BudgetError::InvalidDateRange {
                start: start_date.to_string(),
                end: end.to_string(),
            }
            .into());
        }
    }
    Ok(())
}

impl NewBudget {
    pub fn validate(&self) -> Result<()> {
        validate_budget_fields(
            &self.user_id,
            &self.category_id,
            self.amount,
            self.start_date,
            self.end_date,
            self.alert_threshold,
        )
    }
}

impl BudgetUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingField("id".to_string()).into());
        }
        validate_budget_fields(
            &self.user_id,
            &self.category_id,
            self.amount,
            self.start_date,
            self.end_date,
            self.alert_threshold,
        )
    }
}

/// Filters for listing budgets
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetFilter {
    pub frequency: Option<BudgetFrequency>,
    pub is_active: Option<bool>,
    /// Case-insensitive match against the category name
    pub search: Option<String>,
}

/// Spend facts for a budget over its period.
///
/// `percentage_used` is not clamped and can exceed 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    pub period: BudgetPeriod,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percentage_used: Decimal,
    pub is_over: bool,
    pub should_alert: bool,
}

impl BudgetStatus {
    /// Derives the status from the budget terms and the amount spent.
    pub fn from_spent(
        period: BudgetPeriod,
        amount: Decimal,
        alert_threshold: i32,
        spent: Decimal,
    ) -> Self {
        let percentage_used = percentage_of(spent, amount);
        BudgetStatus {
            period,
            spent,
            remaining: amount - spent,
            percentage_used,
            is_over: spent > amount,
            should_alert: percentage_used >= Decimal::from(alert_threshold),
        }
    }
}

/// A budget together with its category name and evaluated status
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetWithStatus {
    pub budget: Budget,
    pub category_name: Option<String>,
    pub status: BudgetStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    #[default]
    Triggered,
    Acknowledged,
    Resolved,
}

impl AlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Triggered => "triggered",
            AlertStatus::Acknowledged => "acknowledged",
            AlertStatus::Resolved => "resolved",
        }
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "triggered" => Ok(AlertStatus::Triggered),
            "acknowledged" => Ok(AlertStatus::Acknowledged),
            "resolved" => Ok(AlertStatus::Resolved),
            other => Err(BudgetError::InvalidAlertStatus(other.to_string()).into()),
        }
    }
}

/// Recorded notification that a budget crossed its alert threshold
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAlert {
    pub id: String,
    pub budget_id: String,
    pub user_id: String,
    pub message: String,
    pub percentage_at_trigger: Decimal,
    pub status: AlertStatus,
    pub triggered_at: NaiveDateTime,
    pub acknowledged_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudgetAlert {
    pub budget_id: String,
    pub user_id: String,
    pub message: String,
    pub percentage_at_trigger: Decimal,
}
