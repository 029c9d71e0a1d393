use thiserror::Error;

/// Rejections raised when constructing domain values from raw input.
#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("Amount must be positive: {0}")]
    NonPositiveAmount(f64),
    #[error("Income entries cannot carry an expense category")]
    CategoryOnIncome,
    #[error("Hour out of range: {0}")]
    HourOutOfRange(u8),
    #[error("Minute out of range: {0}")]
    MinuteOutOfRange(u8),
    #[error("Weekday out of range: {0}")]
    WeekdayOutOfRange(u8),
}
