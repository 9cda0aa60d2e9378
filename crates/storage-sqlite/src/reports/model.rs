//! Database model for monthly reports.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use finflow_core::errors::Error;
use finflow_core::reports::{MonthlyReport, NewMonthlyReport};

use crate::utils::parse_decimal;

#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::monthly_reports)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct MonthlyReportDB {
    pub id: String,
    pub user_id: String,
    pub month: NaiveDate,
    pub total_income: String,
    pub total_expense: String,
    pub net_savings: String,
    pub savings_rate: String,
    pub top_expense_category_id: Option<String>,
    pub top_expense_amount: String,
    pub insights: Option<String>,
    pub generated_at: NaiveDateTime,
}

impl TryFrom<MonthlyReportDB> for MonthlyReport {
    type Error = Error;

    fn try_from(db: MonthlyReportDB) -> Result<Self, Self::Error> {
        Ok(Self {
            total_income: parse_decimal(&db.total_income, "monthly_reports.total_income")?,
            total_expense: parse_decimal(&db.total_expense, "monthly_reports.total_expense")?,
            net_savings: parse_decimal(&db.net_savings, "monthly_reports.net_savings")?,
            savings_rate: parse_decimal(&db.savings_rate, "monthly_reports.savings_rate")?,
            top_expense_amount: parse_decimal(
                &db.top_expense_amount,
                "monthly_reports.top_expense_amount",
            )?,
            id: db.id,
            user_id: db.user_id,
            month: db.month,
            top_expense_category_id: db.top_expense_category_id,
            insights: db.insights,
            generated_at: db.generated_at,
        })
    }
}

impl From<NewMonthlyReport> for MonthlyReportDB {
    fn from(domain: NewMonthlyReport) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: domain.user_id,
            month: domain.month,
            total_income: domain.total_income.to_string(),
            total_expense: domain.total_expense.to_string(),
            net_savings: domain.net_savings.to_string(),
            savings_rate: domain.savings_rate.to_string(),
            top_expense_category_id: domain.top_expense_category_id,
            top_expense_amount: domain.top_expense_amount.to_string(),
            insights: domain.insights,
            generated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
