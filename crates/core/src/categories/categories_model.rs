//! Category domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CATEGORY_COLOR, MAX_CATEGORY_NAME_LEN};
use crate::errors::{Error, Result, ValidationError};
use crate::transactions::TransactionType;

/// Whether a category groups income or expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Income,
    Expense,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Income => "income",
            CategoryType::Expense => "expense",
        }
    }

    /// A category can only be used by transactions of the same type.
    pub fn accepts(&self, transaction_type: TransactionType) -> bool {
        matches!(
            (self, transaction_type),
            (CategoryType::Income, TransactionType::Income)
                | (CategoryType::Expense, TransactionType::Expense)
        )
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "income" => Ok(CategoryType::Income),
            "expense" => Ok(CategoryType::Expense),
            other => Err(Error::invalid_input(format!(
                "Unknown category type '{}'",
                other
            ))),
        }
    }
}

/// Domain model representing a user's transaction category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub category_type: CategoryType,
    pub color: String,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

/// Input model for creating a new category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub id: Option<String>,
    pub user_id: String,
    pub name: String,
    pub category_type: CategoryType,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Input model for updating an existing category. The type is fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub color: String,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

fn validate_name(name: &str) -> std::result::Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField("name".to_string()));
    }
    if trimmed.chars().count() > MAX_CATEGORY_NAME_LEN {
        return Err(ValidationError::InvalidInput(format!(
            "Category name cannot exceed {} characters",
            MAX_CATEGORY_NAME_LEN
        )));
    }
    Ok(())
}

/// Accepts `#rrggbb` hex colors only.
pub(crate) fn validate_color(color: &str) -> std::result::Result<(), ValidationError> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(ValidationError::InvalidInput(format!(
            "Invalid color '{}', expected #rrggbb",
            color
        )));
    }
    Ok(())
}

impl NewCategory {
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::MissingField("userId".to_string()).into());
        }
        validate_name(&self.name)?;
        if let Some(color) = &self.color {
            validate_color(color)?;
        }
        Ok(())
    }

    /// Trims the name and fills in the default color.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        if self.color.is_none() {
            self.color = Some(DEFAULT_CATEGORY_COLOR.to_string());
        }
        self
    }
}

impl CategoryUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingField("id".to_string()).into());
        }
        validate_name(&self.name)?;
        validate_color(&self.color)?;
        Ok(())
    }
}
