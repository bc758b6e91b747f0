use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Decimal places kept for every stored amount.
pub const AMOUNT_SCALE: u32 = 2;

/// Decimal places for derived percentages.
pub const PERCENT_SCALE: u32 = 2;

/// Weekly spending goal used when none is configured.
pub const DEFAULT_WEEKLY_GOAL: Decimal = dec!(500);

/// Filter value meaning "no constraint" for category and type.
pub const FILTER_ALL: &str = "all";

/// Personal expense category that receives savings goal contributions.
pub const SAVINGS_CATEGORY_NAME: &str = "Savings";

/// Length of a month when converting days into a savings horizon.
pub const DAYS_PER_MONTH: i64 = 30;

/// Page size used when a listing request omits one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Accepted calendar-date format for filters and imports.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
