//! Error types for visasite helpers

use thiserror::Error;

/// Domain name resolution errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid domain type: {0}")]
    InvalidMode(String),
}

/// Locale catalog errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    #[error("Malformed locale entry: {0}")]
    MalformedEntry(String),
}

/// Money, date and JSON helper errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Date expected but not provided")]
    MissingDate,

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid money amount: {0}")]
    InvalidMoney(String),

    #[error("JSON parse error: {0}")]
    JsonParse(String),

    #[error("Unable to create nested object with key {0}")]
    NestedKeyConflict(String),
}
