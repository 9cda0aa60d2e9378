use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::budgets::budgets_model::BudgetFrequency;
use crate::errors::Result;
use crate::utils::time_utils::{add_months, first_day_of_month};

/// Half-open accounting period `[start, end)` a budget is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl BudgetPeriod {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

impl BudgetFrequency {
    /// Number of calendar months one period spans.
    pub fn months(&self) -> u32 {
        match self {
            BudgetFrequency::Monthly => 1,
            BudgetFrequency::Quarterly => 3,
            BudgetFrequency::Yearly => 12,
        }
    }

    /// The period containing `start_date`. Depends only on the frequency and
    /// the date, never on today's date.
    pub fn period_for(&self, start_date: NaiveDate) -> Result<BudgetPeriod> {
        let month_start = first_day_of_month(start_date);
        let start = match self {
            BudgetFrequency::Monthly => month_start,
            BudgetFrequency::Quarterly => {
                let quarter_month = (start_date.month0() / 3) * 3 + 1;
                month_start.with_month(quarter_month).unwrap_or(month_start)
            }
            BudgetFrequency::Yearly => month_start.with_month(1).unwrap_or(month_start),
        };
        let end = add_months(start, self.months())?;
        Ok(BudgetPeriod { start, end })
    }
}

/// Computes the budget period for a frequency given by name.
///
/// Fails with `BudgetError::InvalidFrequency` for anything other than
/// `monthly`, `quarterly` or `yearly`.
pub fn period_for(frequency: &str, start_date: NaiveDate) -> Result<BudgetPeriod> {
    let frequency: BudgetFrequency = frequency.parse()?;
    frequency.period_for(start_date)
}
