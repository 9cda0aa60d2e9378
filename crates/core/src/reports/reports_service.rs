use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use crate::errors::Result;
use crate::reports::reports_model::{
    MonthlyOverview, MonthlyReport, NewMonthlyReport, SpendingBreakdown,
};
use crate::reports::reports_traits::{ReportRepositoryTrait, ReportServiceTrait};
use crate::transactions::{TransactionRepositoryTrait, TransactionSumFilter, TransactionType};
use crate::utils::decimal_utils::savings_rate;
use crate::utils::time_utils::month_bounds;

/// Builds monthly figures from completed transactions
pub struct ReportService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    report_repository: Arc<dyn ReportRepositoryTrait>,
}

impl ReportService {
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        report_repository: Arc<dyn ReportRepositoryTrait>,
    ) -> Self {
        ReportService {
            transaction_repository,
            report_repository,
        }
    }

    fn month_filter(
        user_id: &str,
        year: i32,
        month: u32,
        transaction_type: TransactionType,
    ) -> Result<TransactionSumFilter> {
        let (start, end) = month_bounds(year, month)?;
        Ok(TransactionSumFilter::for_user(user_id)
            .of_type(transaction_type)
            .completed()
            .between(start, end))
    }
}

#[async_trait]
impl ReportServiceTrait for ReportService {
    fn monthly_overview(&self, user_id: &str, year: i32, month: u32) -> Result<MonthlyOverview> {
        let (period_start, period_end) = month_bounds(year, month)?;
        let income = Self::month_filter(user_id, year, month, TransactionType::Income)?;
        let expense = Self::month_filter(user_id, year, month, TransactionType::Expense)?;

        let total_income = self.transaction_repository.sum_amount(&income)?;
        let total_expense = self.transaction_repository.sum_amount(&expense)?;
        debug!(
            "Overview {}-{:02} for user {}: income {}, expense {}",
            year, month, user_id, total_income, total_expense
        );

        Ok(MonthlyOverview {
            year,
            month,
            period_start,
            period_end,
            total_income,
            total_expense,
            net: total_income - total_expense,
            savings_rate: savings_rate(total_income, total_expense),
            expense_by_category: self.transaction_repository.sum_by_category(&expense)?,
            income_by_category: self.transaction_repository.sum_by_category(&income)?,
        })
    }

    fn spending_breakdown(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> Result<SpendingBreakdown> {
        let expense = Self::month_filter(user_id, year, month, TransactionType::Expense)?;
        let totals = self.transaction_repository.sum_by_category(&expense)?;
        Ok(SpendingBreakdown::from_totals(year, month, totals))
    }

    fn recent_reports(&self, user_id: &str, limit: i64) -> Result<Vec<MonthlyReport>> {
        self.report_repository.get_recent_reports(user_id, limit)
    }

    async fn generate_monthly_report(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> Result<MonthlyReport> {
        let overview = self.monthly_overview(user_id, year, month)?;
        let report = self
            .report_repository
            .upsert_monthly_report(NewMonthlyReport::from_overview(user_id, &overview))
            .await?;
        info!(
            "Generated monthly report for {} ({}) for user {}",
            report.month, report.id, user_id
        );
        Ok(report)
    }
}
