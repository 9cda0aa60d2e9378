/// Decimal precision for display and for derived percentages
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Maximum number of fractional digits accepted on money amounts
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Alert threshold used when a budget does not specify one
pub const DEFAULT_ALERT_THRESHOLD: i32 = 80;

pub const MIN_ALERT_THRESHOLD: i32 = 1;
pub const MAX_ALERT_THRESHOLD: i32 = 100;

/// Default category color (hex)
pub const DEFAULT_CATEGORY_COLOR: &str = "#3498db";

pub const MAX_CATEGORY_NAME_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 255;
pub const MAX_TAGS_LEN: usize = 200;
pub const MAX_GOAL_NAME_LEN: usize = 200;
pub const MAX_PAYMENT_METHOD_NAME_LEN: usize = 100;
pub const MAX_ACCOUNT_NUMBER_LEN: usize = 100;

/// Date format used for persisted calendar dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";
