use thiserror::Error;

/// Errors raised by budget validation and evaluation.
#[derive(Error, Debug, PartialEq)]
pub enum BudgetError {
    #[error("Invalid budget frequency '{0}': expected monthly, quarterly or yearly")]
    InvalidFrequency(String),

    #[error("Invalid budget amount: {0}")]
    InvalidAmount(String),

    #[error("Alert threshold {0} is outside 1-100")]
    InvalidAlertThreshold(i32),

    #[error("End date {end} cannot be before start date {start}")]
    InvalidDateRange { start: String, end: String },

    #[error("Category '{0}' is not an active expense category")]
    InvalidCategory(String),

    #[error("Unknown alert status '{0}'")]
    InvalidAlertStatus(String),
}
