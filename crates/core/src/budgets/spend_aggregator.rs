use std::sync::Arc;

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::transactions::{TransactionRepositoryTrait, TransactionSumFilter, TransactionType};

/// Sums what a user has spent in a category over a period.
pub trait SpendAggregatorTrait: Send + Sync {
    /// Completed expense amounts for the category in `[period_start, period_end)`.
    ///
    /// A missing category has no transactions by definition and yields zero.
    fn spent(
        &self,
        user_id: &str,
        category_id: Option<&str>,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<Decimal>;
}

/// Spend aggregation backed by the transaction store's sum query.
///
/// Spend is recomputed from raw transactions on every call; there is no
/// running total to keep in sync.
pub struct SpendAggregator {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

impl SpendAggregator {
    pub fn new(transaction_repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        SpendAggregator {
            transaction_repository,
        }
    }

    pub fn spend_filter(
        user_id: &str,
        category_id: &str,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> TransactionSumFilter {
        TransactionSumFilter::for_user(user_id)
            .category(category_id)
            .of_type(TransactionType::Expense)
            .completed()
            .between(period_start, period_end)
    }
}

impl SpendAggregatorTrait for SpendAggregator {
    fn spent(
        &self,
        user_id: &str,
        category_id: Option<&str>,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<Decimal> {
        let Some(category_id) = category_id else {
            return Ok(Decimal::ZERO);
        };
        let filter = Self::spend_filter(user_id, category_id, period_start, period_end);
        let spent = self.transaction_repository.sum_amount(&filter)?;
        debug!(
            "Spent {} in category {} for user {} over [{}, {})",
            spent, category_id, user_id, period_start, period_end
        );
        Ok(spent)
    }
}
