//! Report domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transactions::CategoryTotal;
use crate::utils::decimal_utils::percentage_of;

/// Income and expense facts for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyOverview {
    pub year: i32,
    pub month: u32,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net: Decimal,
    pub savings_rate: Decimal,
    pub expense_by_category: Vec<CategoryTotal>,
    pub income_by_category: Vec<CategoryTotal>,
}

/// One expense category's share of a month's spending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category_id: Option<String>,
    pub category_name: Option<String>,
    pub total: Decimal,
    pub count: i64,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingBreakdown {
    pub year: i32,
    pub month: u32,
    pub total_expenses: Decimal,
    pub categories: Vec<CategoryBreakdown>,
}

impl SpendingBreakdown {
    /// Builds the breakdown from per-category totals, keeping their order.
    pub fn from_totals(year: i32, month: u32, totals: Vec<CategoryTotal>) -> Self {
        let total_expenses: Decimal = totals.iter().map(|t| t.total).sum();
        let categories = totals
            .into_iter()
            .map(|t| CategoryBreakdown {
                percentage: percentage_of(t.total, total_expenses),
                category_id: t.category_id,
                category_name: t.category_name,
                total: t.total,
                count: t.count,
            })
            .collect();
        SpendingBreakdown {
            year,
            month,
            total_expenses,
            categories,
        }
    }
}

/// Stored snapshot of a month's figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub id: String,
    pub user_id: String,
    /// First day of the month
    pub month: NaiveDate,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_savings: Decimal,
    pub savings_rate: Decimal,
    pub top_expense_category_id: Option<String>,
    pub top_expense_amount: Decimal,
    pub insights: Option<String>,
    pub generated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMonthlyReport {
    pub user_id: String,
    pub month: NaiveDate,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_savings: Decimal,
    pub savings_rate: Decimal,
    pub top_expense_category_id: Option<String>,
    pub top_expense_amount: Decimal,
    pub insights: Option<String>,
}

impl NewMonthlyReport {
    pub fn from_overview(user_id: &str, overview: &MonthlyOverview) -> Self {
        // Uncategorized spend cannot be the top category.
        let top = overview
            .expense_by_category
            .iter()
            .find(|t| t.category_id.is_some());
        NewMonthlyReport {
            user_id: user_id.to_string(),
            month: overview.period_start,
            total_income: overview.total_income,
            total_expense: overview.total_expense,
            net_savings: overview.net,
            savings_rate: overview.savings_rate,
            top_expense_category_id: top.and_then(|t| t.category_id.clone()),
            top_expense_amount: top.map_or(Decimal::ZERO, |t| t.total),
            insights: insights_for(overview, top),
        }
    }
}

fn insights_for(overview: &MonthlyOverview, top: Option<&CategoryTotal>) -> Option<String> {
    let mut lines = Vec::new();
    if overview.total_income.is_zero() {
        if !overview.total_expense.is_zero() {
            lines.push(format!("No income recorded; spent {}.", overview.total_expense));
        }
    } else if overview.net < Decimal::ZERO {
        lines.push(format!("Spending exceeded income by {}.", overview.net.abs()));
    } else {
        lines.push(format!("Saved {}% of income.", overview.savings_rate));
    }
    if let Some(top) = top {
        let name = top
            .category_name
            .as_deref()
            .or(top.category_id.as_deref())
            .unwrap_or_default();
        lines.push(format!(
            "Top expense category: {} ({}, {}% of spending).",
            name,
            top.total,
            percentage_of(top.total, overview.total_expense)
        ));
    }
    if lines.is_empty() {
        None
    } else {
        Some(lines.join(" "))
    }
}
