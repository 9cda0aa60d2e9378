use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::Result;
use crate::reports::reports_model::{
    MonthlyOverview, MonthlyReport, NewMonthlyReport, SpendingBreakdown,
};

/// Trait for monthly report repository operations
#[async_trait]
pub trait ReportRepositoryTrait: Send + Sync {
    fn get_monthly_report(
        &self,
        user_id: &str,
        month: NaiveDate,
    ) -> Result<Option<MonthlyReport>>;

    /// Newest month first
    fn get_recent_reports(&self, user_id: &str, limit: i64) -> Result<Vec<MonthlyReport>>;

    /// Inserts the report or replaces the user's existing report for that month.
    async fn upsert_monthly_report(&self, report: NewMonthlyReport) -> Result<MonthlyReport>;
}

/// Trait for report service operations
#[async_trait]
pub trait ReportServiceTrait: Send + Sync {
    fn monthly_overview(&self, user_id: &str, year: i32, month: u32) -> Result<MonthlyOverview>;
    fn spending_breakdown(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> Result<SpendingBreakdown>;
    fn recent_reports(&self, user_id: &str, limit: i64) -> Result<Vec<MonthlyReport>>;
    async fn generate_monthly_report(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> Result<MonthlyReport>;
}
