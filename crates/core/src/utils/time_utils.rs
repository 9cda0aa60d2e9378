use chrono::{Datelike, Months, NaiveDate};

use crate::errors::{Error, Result};

/// First day of the month containing `date`.
pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month.
    date.with_day(1).unwrap_or(date)
}

/// Adds calendar months to a first-of-month date, failing on overflow.
pub fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(months)).ok_or_else(|| {
        Error::invalid_input(format!("Date {} + {} months is out of range", date, months))
    })
}

/// Half-open `[first day, first day of next month)` range for a calendar month.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::invalid_input(format!("Invalid month {}-{:02}", year, month)))?;
    let end = add_months(start, 1)?;
    Ok((start, end))
}

/// Whole days from `today` until `target`; zero once the target has passed.
pub fn days_until(today: NaiveDate, target: NaiveDate) -> i64 {
    if today > target {
        return 0;
    }
    (target - today).num_days()
}
