use std::sync::Arc;

use log::debug;

use crate::budgets::budgets_model::{Budget, BudgetStatus};
use crate::budgets::spend_aggregator::SpendAggregatorTrait;
use crate::errors::Result;

/// Evaluates a budget against the spend recorded in its current period.
///
/// Evaluation has no side effects. Whether a status that warrants an alert
/// turns into a persisted alert is up to the caller.
pub struct BudgetStatusEvaluator {
    spend_aggregator: Arc<dyn SpendAggregatorTrait>,
}

impl BudgetStatusEvaluator {
    pub fn new(spend_aggregator: Arc<dyn SpendAggregatorTrait>) -> Self {
        BudgetStatusEvaluator { spend_aggregator }
    }

    pub fn evaluate(&self, budget: &Budget) -> Result<BudgetStatus> {
        let period = budget.frequency.period_for(budget.start_date)?;
        let spent = self.spend_aggregator.spent(
            &budget.user_id,
            Some(&budget.category_id),
            period.start,
            period.end,
        )?;
        let status =
            BudgetStatus::from_spent(period, budget.amount, budget.alert_threshold, spent);
        debug!(
            "Budget {} at {}% ({} of {})",
            budget.id, status.percentage_used, status.spent, budget.amount
        );
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budgets::{BudgetFrequency, SpendAggregator};
    use crate::test_support::{budget, date, transaction, InMemoryTransactionRepository};
    use crate::transactions::{TransactionStatus, TransactionType};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn evaluator(repo: Arc<InMemoryTransactionRepository>) -> BudgetStatusEvaluator {
        BudgetStatusEvaluator::new(Arc::new(SpendAggregator::new(repo)))
    }

    fn expense(repo: &InMemoryTransactionRepository, amount: Decimal, on: chrono::NaiveDate) {
        repo.insert(transaction(
            "alice",
            Some("food"),
            TransactionType::Expense,
            amount,
            on,
            TransactionStatus::Completed,
        ));
    }

    #[test]
    fn test_quarterly_budget_near_threshold() {
        let repo = Arc::new(InMemoryTransactionRepository::default());
        expense(&repo, dec!(300), date(2024, 1, 20));
        expense(&repo, dec!(400), date(2024, 3, 31));
        // Next quarter
        expense(&repo, dec!(500), date(2024, 4, 1));

        let mut quarterly = budget("b-1", "alice", "food", dec!(900), date(2024, 2, 15));
        quarterly.frequency = BudgetFrequency::Quarterly;
        quarterly.alert_threshold = 75;

        let status = evaluator(repo).evaluate(&quarterly).unwrap();
        assert_eq!(status.period.start, date(2024, 1, 1));
        assert_eq!(status.period.end, date(2024, 4, 1));
        assert_eq!(status.spent, dec!(700));
        assert_eq!(status.remaining, dec!(200));
        assert_eq!(status.percentage_used, dec!(77.78));
        assert!(!status.is_over);
        assert!(status.should_alert);
    }

    #[test]
    fn test_monthly_budget_with_zero_amount() {
        let repo = Arc::new(InMemoryTransactionRepository::default());
        expense(&repo, dec!(12), date(2024, 6, 3));

        let mut monthly = budget("b-2", "alice", "food", dec!(100), date(2024, 6, 1));
        monthly.amount = Decimal::ZERO;

        let status = evaluator(repo).evaluate(&monthly).unwrap();
        assert_eq!(status.spent, dec!(12));
        assert_eq!(status.remaining, dec!(-12));
        assert_eq!(status.percentage_used, Decimal::ZERO);
        assert!(status.is_over);
        assert!(!status.should_alert);
    }

    #[test]
    fn test_untouched_budget() {
        let repo = Arc::new(InMemoryTransactionRepository::default());
        let mut b = budget("b-3", "alice", "food", dec!(1200), date(2024, 9, 9));
        b.frequency = BudgetFrequency::Yearly;

        let status = evaluator(repo).evaluate(&b).unwrap();
        assert_eq!(status.spent, Decimal::ZERO);
        assert_eq!(status.remaining, dec!(1200));
        assert_eq!(status.percentage_used, Decimal::ZERO);
        assert!(!status.is_over);
        assert!(!status.should_alert);
    }
}
