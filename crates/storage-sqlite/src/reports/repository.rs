use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::upsert::excluded;
use std::sync::Arc;

use finflow_core::errors::Result;
use finflow_core::reports::{MonthlyReport, NewMonthlyReport, ReportRepositoryTrait};

use super::model::MonthlyReportDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::monthly_reports::{self, dsl::*};

/// Stored monthly report snapshots, one per user and month
pub struct ReportRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ReportRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ReportRepositoryTrait for ReportRepository {
    fn get_monthly_report(
        &self,
        owner: &str,
        report_month: NaiveDate,
    ) -> Result<Option<MonthlyReport>> {
        let mut conn = get_connection(&self.pool)?;
        monthly_reports
            .filter(user_id.eq(owner))
            .filter(month.eq(report_month))
            .select(MonthlyReportDB::as_select())
            .first::<MonthlyReportDB>(&mut conn)
            .optional()
            .into_core()?
            .map(MonthlyReport::try_from)
            .transpose()
    }

    fn get_recent_reports(&self, owner: &str, limit: i64) -> Result<Vec<MonthlyReport>> {
        let mut conn = get_connection(&self.pool)?;
        monthly_reports
            .filter(user_id.eq(owner))
            .select(MonthlyReportDB::as_select())
            .order(month.desc())
            .limit(limit)
            .load::<MonthlyReportDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(MonthlyReport::try_from)
            .collect()
    }

    async fn upsert_monthly_report(&self, report: NewMonthlyReport) -> Result<MonthlyReport> {
        self.writer
            .exec(move |conn| -> Result<MonthlyReport> {
                let row: MonthlyReportDB = report.into();

                // Regenerating a month keeps the report's id.
                diesel::insert_into(monthly_reports::table)
                    .values(&row)
                    .on_conflict((user_id, month))
                    .do_update()
                    .set((
                        total_income.eq(excluded(total_income)),
                        total_expense.eq(excluded(total_expense)),
                        net_savings.eq(excluded(net_savings)),
                        savings_rate.eq(excluded(savings_rate)),
                        top_expense_category_id.eq(excluded(top_expense_category_id)),
                        top_expense_amount.eq(excluded(top_expense_amount)),
                        insights.eq(excluded(insights)),
                        generated_at.eq(excluded(generated_at)),
                    ))
                    .execute(conn)
                    .into_core()?;

                monthly_reports
                    .filter(user_id.eq(&row.user_id))
                    .filter(month.eq(row.month))
                    .select(MonthlyReportDB::as_select())
                    .first::<MonthlyReportDB>(conn)
                    .into_core()?
                    .try_into()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::CategoryRepository;
    use crate::db::test_db;
    use crate::transactions::TransactionRepository;
    use finflow_core::categories::{CategoryRepositoryTrait, CategoryType, NewCategory};
    use finflow_core::reports::{ReportService, ReportServiceTrait};
    use finflow_core::transactions::{
        NewTransaction, TransactionRepositoryTrait, TransactionStatus, TransactionType,
    };
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn report(for_month: NaiveDate, income: Decimal, expense: Decimal) -> NewMonthlyReport {
        NewMonthlyReport {
            user_id: "alice".to_string(),
            month: for_month,
            total_income: income,
            total_expense: expense,
            net_savings: income - expense,
            savings_rate: dec!(30),
            top_expense_category_id: None,
            top_expense_amount: Decimal::ZERO,
            insights: Some("Saved 30% of income.".to_string()),
        }
    }

    #[tokio::test]
    async fn test_upsert_replaces_figures_and_keeps_id() {
        let db = test_db::setup();
        let repo = ReportRepository::new(db.pool.clone(), db.writer.clone());

        let first = repo
            .upsert_monthly_report(report(date(2024, 4, 1), dec!(5000), dec!(3500)))
            .await
            .unwrap();
        let second = repo
            .upsert_monthly_report(NewMonthlyReport {
                insights: None,
                ..report(date(2024, 4, 1), dec!(5000), dec!(4000))
            })
            .await
            .unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.total_expense, dec!(4000));
        assert_eq!(second.net_savings, dec!(1000));
        assert_eq!(second.insights, None);
        assert_eq!(
            repo.get_monthly_report("alice", date(2024, 4, 1)).unwrap(),
            Some(second)
        );
        assert!(repo
            .get_monthly_report("bob", date(2024, 4, 1))
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_recent_reports_newest_first_with_limit() {
        let db = test_db::setup();
        let repo = ReportRepository::new(db.pool.clone(), db.writer.clone());
        for m in [2, 4, 3] {
            repo.upsert_monthly_report(report(date(2024, m, 1), dec!(100), dec!(70)))
                .await
                .unwrap();
        }

        let months: Vec<NaiveDate> = repo
            .get_recent_reports("alice", 2)
            .unwrap()
            .into_iter()
            .map(|r| r.month)
            .collect();
        assert_eq!(months, vec![date(2024, 4, 1), date(2024, 3, 1)]);
    }

    #[tokio::test]
    async fn test_generate_report_from_stored_transactions() {
        let db = test_db::setup();
        let categories = CategoryRepository::new(db.pool.clone(), db.writer.clone());
        let transactions = Arc::new(TransactionRepository::new(db.pool.clone(), db.writer.clone()));
        let reports = Arc::new(ReportRepository::new(db.pool.clone(), db.writer.clone()));

        let mut ids = Vec::new();
        for (category_name, kind) in [
            ("Salary", CategoryType::Income),
            ("Rent", CategoryType::Expense),
            ("Food", CategoryType::Expense),
        ] {
            let category = categories
                .create_category(NewCategory {
                    id: None,
                    user_id: "alice".to_string(),
                    name: category_name.to_string(),
                    category_type: kind,
                    color: None,
                    icon: None,
                    description: None,
                    is_active: true,
                })
                .await
                .unwrap();
            ids.push(category.id);
        }

        let rows = [
            (&ids[0], TransactionType::Income, dec!(5000), date(2024, 4, 1)),
            (&ids[1], TransactionType::Expense, dec!(2000), date(2024, 4, 2)),
            (&ids[2], TransactionType::Expense, dec!(450.25), date(2024, 4, 9)),
            (&ids[2], TransactionType::Expense, dec!(49.75), date(2024, 4, 30)),
            (&ids[2], TransactionType::Expense, dec!(80), date(2024, 5, 1)),
        ];
        for (category_id, kind, amount, on) in rows {
            transactions
                .create_transaction(NewTransaction {
                    id: None,
                    user_id: "alice".to_string(),
                    category_id: Some(category_id.clone()),
                    payment_method_id: None,
                    transaction_type: kind,
                    amount,
                    description: "test".to_string(),
                    notes: None,
                    transaction_date: on,
                    status: TransactionStatus::Completed,
                    is_recurring: false,
                    is_reconciled: false,
                    tags: None,
                })
                .await
                .unwrap();
        }

        let service = ReportService::new(transactions, reports);
        let generated = service
            .generate_monthly_report("alice", 2024, 4)
            .await
            .unwrap();
        assert_eq!(generated.total_income, dec!(5000));
        assert_eq!(generated.total_expense, dec!(2500));
        assert_eq!(generated.net_savings, dec!(2500));
        assert_eq!(generated.savings_rate, dec!(50));
        assert_eq!(generated.top_expense_category_id.as_deref(), Some(ids[1].as_str()));
        assert!(generated
            .insights
            .as_deref()
            .unwrap_or_default()
            .contains("Top expense category: Rent"));

        let breakdown = service.spending_breakdown("alice", 2024, 4).unwrap();
        let names: Vec<Option<String>> = breakdown
            .categories
            .into_iter()
            .map(|c| c.category_name)
            .collect();
        assert_eq!(names, vec![Some("Rent".to_string()), Some("Food".to_string())]);
    }
}
