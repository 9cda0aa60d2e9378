//! Transaction domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_DESCRIPTION_LEN, MAX_TAGS_LEN};
use crate::errors::{Error, Result, ValidationError};
use crate::utils::decimal_utils::has_money_precision;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(Error::invalid_input(format!(
                "Unknown transaction type '{}'",
                other
            ))),
        }
    }
}

/// Transaction lifecycle status. Only `Completed` counts toward spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    #[default]
    Completed,
    Cancelled,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(TransactionStatus::Pending),
            "completed" => Ok(TransactionStatus::Completed),
            "cancelled" => Ok(TransactionStatus::Cancelled),
            other => Err(Error::invalid_input(format!(
                "Unknown transaction status '{}'",
                other
            ))),
        }
    }
}

/// Domain model representing an income or expense transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    /// `None` once the category has been deleted
    pub category_id: Option<String>,
    /// `None` when unrecorded or once the payment method has been deleted
    pub payment_method_id: Option<String>,
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub description: String,
    pub notes: Option<String>,
    pub transaction_date: NaiveDate,
    pub status: TransactionStatus,
    pub is_recurring: bool,
    pub is_reconciled: bool,
    /// Comma-separated tags
    pub tags: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Transaction {
    /// Amount with a sign for display: `-` for expenses, `+` for income.
    pub fn display_amount(&self) -> String {
        match self.transaction_type {
            TransactionType::Expense => format!("-{}", self.amount),
            TransactionType::Income => format!("+{}", self.amount),
        }
    }

    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .map(|t| {
                t.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Input model for creating a new transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub id: Option<String>,
    pub user_id: String,
    pub category_id: Option<String>,
    #[serde(default)]
    pub payment_method_id: Option<String>,
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub description: String,
    pub notes: Option<String>,
    pub transaction_date: NaiveDate,
    #[serde(default)]
    pub status: TransactionStatus,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub is_reconciled: bool,
    pub tags: Option<String>,
}

/// Input model for editing an existing transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    pub id: String,
    pub user_id: String,
    pub category_id: Option<String>,
    pub payment_method_id: Option<String>,
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub description: String,
    pub notes: Option<String>,
    pub transaction_date: NaiveDate,
    pub status: TransactionStatus,
    pub is_recurring: bool,
    pub is_reconciled: bool,
    pub tags: Option<String>,
}

fn validate_fields(
    user_id: &str,
    amount: Decimal,
    description: &str,
    tags: Option<&str>,
) -> std::result::Result<(), ValidationError> {
    if user_id.trim().is_empty() {
        return Err(ValidationError::MissingField("userId".to_string()));
    }
    if amount <= Decimal::ZERO {
        return Err(ValidationError::InvalidInput(
            "Transaction amount must be greater than 0".to_string(),
        ));
    }
    if !has_money_precision(amount) {
        return Err(ValidationError::InvalidInput(format!(
            "Transaction amount {} has more than 2 decimal places",
            amount
        )));
    }
    if description.trim().is_empty() {
        return Err(ValidationError::MissingField("description".to_string()));
    }
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::InvalidInput(format!(
            "Description cannot exceed {} characters",
            MAX_DESCRIPTION_LEN
        )));
    }
    if tags.map_or(false, |t| t.chars().count() > MAX_TAGS_LEN) {
        return Err(ValidationError::InvalidInput(format!(
            "Tags cannot exceed {} characters",
            MAX_TAGS_LEN
        )));
    }
    Ok(())
}

impl NewTransaction {
    pub fn validate(&self) -> Result<()> {
        validate_fields(
            &self.user_id,
            self.amount,
            &self.description,
            self.tags.as_deref(),
        )?;
        Ok(())
    }
}

impl TransactionUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingField("id".to_string()).into());
        }
        validate_fields(
            &self.user_id,
            self.amount,
            &self.description,
            self.tags.as_deref(),
        )?;
        Ok(())
    }
}

/// Filter predicates for summing transaction amounts in the store.
///
/// `date_from` is inclusive and `date_until` exclusive. Unset predicates match everything.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionSumFilter {
    pub user_id: String,
    pub category_id: Option<String>,
    pub transaction_type: Option<TransactionType>,
    pub status: Option<TransactionStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_until: Option<NaiveDate>,
}

impl TransactionSumFilter {
    pub fn for_user(user_id: &str) -> Self {
        TransactionSumFilter {
            user_id: user_id.to_string(),
            category_id: None,
            transaction_type: None,
            status: None,
            date_from: None,
            date_until: None,
        }
    }

    pub fn category(mut self, category_id: &str) -> Self {
        self.category_id = Some(category_id.to_string());
        self
    }

    pub fn of_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = Some(transaction_type);
        self
    }

    pub fn completed(mut self) -> Self {
        self.status = Some(TransactionStatus::Completed);
        self
    }

    /// Restricts to `[start, end)`.
    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_from = Some(start);
        self.date_until = Some(end);
        self
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        transaction.user_id == self.user_id
            && self
                .category_id
                .as_ref()
                .map_or(true, |c| transaction.category_id.as_ref() == Some(c))
            && self
                .transaction_type
                .map_or(true, |t| transaction.transaction_type == t)
            && self.status.map_or(true, |s| transaction.status == s)
            && self
                .date_from
                .map_or(true, |d| transaction.transaction_date >= d)
            && self
                .date_until
                .map_or(true, |d| transaction.transaction_date < d)
    }
}

/// Sum and count of matching transactions for one category (`None` = uncategorized).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category_id: Option<String>,
    pub category_name: Option<String>,
    pub total: Decimal,
    pub count: i64,
}

/// Criteria for listing transactions. Date and amount bounds are inclusive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSearch {
    pub user_id: String,
    pub transaction_type: Option<TransactionType>,
    pub category_id: Option<String>,
    pub payment_method_id: Option<String>,
    pub status: Option<TransactionStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub amount_min: Option<Decimal>,
    pub amount_max: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSearchResult {
    pub transactions: Vec<Transaction>,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net: Decimal,
}

impl TransactionSearchResult {
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        let (total_income, total_expenses) = transactions.iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(income, expenses), t| match t.transaction_type {
                TransactionType::Income => (income + t.amount, expenses),
                TransactionType::Expense => (income, expenses + t.amount),
            },
        );
        TransactionSearchResult {
            transactions,
            total_income,
            total_expenses,
            net: total_income - total_expenses,
        }
    }
}
