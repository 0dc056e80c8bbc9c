use chrono::NaiveDate;
use miette::Diagnostic;
use rust_i18n::t;
use thiserror::Error;

/// Main error type for the schedule library
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Invalid range: end date {end} is before start date {start}")]
    #[diagnostic(
        code(rhythm::invalid_range),
        help("pick an end date on or after the start date")
    )]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid date '{input}': expected YYYY-MM-DD")]
    #[diagnostic(code(rhythm::invalid_date))]
    InvalidDate { input: String },

    #[error("Unknown work type: {0}")]
    #[diagnostic(code(rhythm::unknown_work_type))]
    UnknownWorkType(String),

    #[error("Unknown shift type: {0}")]
    #[diagnostic(code(rhythm::unknown_shift_type))]
    UnknownShiftType(String),

    #[error("Shift '{shift}' is not allowed for work type '{work_type}'")]
    #[diagnostic(code(rhythm::shift_not_allowed))]
    ShiftNotAllowed { work_type: String, shift: String },

    #[error("Environment error: {0}")]
    #[diagnostic(code(rhythm::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(rhythm::config))]
    Config(String),

    #[error("Schedule store error: {0}")]
    #[diagnostic(code(rhythm::store))]
    Store(String),

    #[error(transparent)]
    #[diagnostic(code(rhythm::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(rhythm::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(rhythm::other))]
    Other(String),
}

impl Error {
    /// Message suitable for showing inline next to the input that caused it.
    ///
    /// Only validation failures have a dedicated localised message; everything
    /// else falls back to the `Display` text.
    pub fn user_message(&self) -> String {
        match self {
            Error::InvalidRange { .. } => t!("range_end_before_start").to_string(),
            Error::InvalidDate { input } => t!("invalid_date", input = input).to_string(),
            Error::ShiftNotAllowed { work_type, shift } => {
                t!("shift_not_allowed", shift = shift, work_type = work_type).to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type ScheduleResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Invalid environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create store errors
pub fn store_error(message: &str) -> Error {
    Error::Store(message.to_string())
}
