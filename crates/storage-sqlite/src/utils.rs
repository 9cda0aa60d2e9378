//! Helpers for values SQLite stores as text.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::errors::StorageError;

/// Parses a stored money or percentage column.
///
/// Amounts are kept as TEXT so no precision is lost; a value that does not
/// parse means the row was written by something other than this crate.
pub fn parse_decimal(value: &str, field: &str) -> Result<Decimal, StorageError> {
    Decimal::from_str(value.trim()).map_err(|e| {
        StorageError::InvalidData(format!("{} has invalid decimal '{}': {}", field, value, e))
    })
}

/// Sums stored amounts, failing on the first malformed value.
pub fn sum_decimals<'a, I>(values: I, field: &str) -> Result<Decimal, StorageError>
where
    I: IntoIterator<Item = &'a String>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| {
            acc.checked_add(parse_decimal(v, field)?).ok_or_else(|| {
                StorageError::InvalidData(format!("{} total overflows a decimal", field))
            })
        })
}
