//! Goals domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_GOAL_NAME_LEN;
use crate::errors::{Error, Result, ValidationError};
use crate::utils::decimal_utils::{has_money_precision, percentage_of};
use crate::utils::time_utils::days_until;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    #[default]
    Active,
    Paused,
    Completed,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Active => "active",
            GoalStatus::Paused => "paused",
            GoalStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "active" => Ok(GoalStatus::Active),
            "paused" => Ok(GoalStatus::Paused),
            "completed" => Ok(GoalStatus::Completed),
            other => Err(Error::invalid_input(format!(
                "Unknown goal status '{}'",
                other
            ))),
        }
    }
}

/// Domain model representing a savings goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub target_date: NaiveDate,
    pub status: GoalStatus,
    pub category_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl SavingsGoal {
    /// Progress toward the target, rounded to two places; zero for a zero target.
    pub fn percentage_complete(&self) -> Decimal {
        percentage_of(self.current_amount, self.target_amount)
    }

    pub fn is_completed(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        days_until(today, self.target_date)
    }
}

/// Input model for creating a new savings goal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSavingsGoal {
    pub id: Option<String>,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub target_amount: Decimal,
    #[serde(default)]
    pub current_amount: Decimal,
    pub target_date: NaiveDate,
    #[serde(default)]
    pub status: GoalStatus,
    pub category_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoalUpdate {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub target_date: NaiveDate,
    pub status: GoalStatus,
    pub category_id: Option<String>,
}

fn validate_goal_fields(
    user_id: &str,
    name: &str,
    target_amount: Decimal,
    current_amount: Decimal,
) -> std::result::Result<(), ValidationError> {
    if user_id.trim().is_empty() {
        return Err(ValidationError::MissingField("userId".to_string()));
    }
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingField("name".to_string()));
    }
    if name.chars().count() > MAX_GOAL_NAME_LEN {
        return Err(ValidationError::InvalidInput(format!(
            "Goal name cannot exceed {} characters",
            MAX_GOAL_NAME_LEN
        )));
    }
    if target_amount <= Decimal::ZERO {
        return Err(ValidationError::InvalidInput(
            "Target amount must be greater than 0".to_string(),
        ));
    }
    if current_amount < Decimal::ZERO {
        return Err(ValidationError::InvalidInput(
            "Current amount cannot be negative".to_string(),
        ));
    }
    if !has_money_precision(target_amount) || !has_money_precision(current_amount) {
        return Err(ValidationError::InvalidInput(
            "Goal amounts cannot have more than 2 decimal places".to_string(),
        ));
    }
    Ok(())
}

impl NewSavingsGoal {
    pub fn validate(&self) -> Result<()> {
        validate_goal_fields(
            &self.user_id,
            &self.name,
            self.target_amount,
            self.current_amount,
        )?;
        Ok(())
    }
}

impl SavingsGoalUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingField("id".to_string()).into());
        }
        validate_goal_fields(
            &self.user_id,
            &self.name,
            self.target_amount,
            self.current_amount,
        )?;
        Ok(())
    }
}
