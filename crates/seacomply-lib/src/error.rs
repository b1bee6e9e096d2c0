use chrono::NaiveDate;
use thiserror::Error;

/// Convenient result alias for the compliance library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A calculation needed a regulatory constant that is not in force on the date.
    #[error("regulatory constant {key} is not loaded for {as_of}; constants table is misconfigured")]
    MissingConstant { key: String, as_of: NaiveDate },

    /// The constant resolved but its value has a different shape than the caller expects.
    #[error("regulatory constant {key} has the wrong value type; expected {expected}")]
    ConstantTypeMismatch { key: String, expected: &'static str },

    /// Two constants with the same key claim the same date.
    #[error("regulatory constant {key} has overlapping effective intervals starting {first} and {second}")]
    OverlappingConstants {
        key: String,
        first: NaiveDate,
        second: NaiveDate,
    },

    /// A constant's effective interval ends on or before it starts.
    #[error("regulatory constant {key} has an empty effective interval ({from} to {to})")]
    InvalidConstantInterval {
        key: String,
        from: NaiveDate,
        to: NaiveDate,
    },

    /// A calendar year could not be mapped to a reporting period.
    #[error("year {year} is outside the supported calendar range")]
    InvalidYear { year: i32 },

    /// Raised when fuel reference data fails validation.
    #[error("invalid fuel data: {message}")]
    FuelDataValidation { message: String },

    /// Raised when duplicate fuel codes are encountered during catalog load.
    #[error("duplicate fuel code encountered: {code}")]
    DuplicateFuelCode { code: String },

    /// A consumption record carries a value no calculator can use.
    #[error("invalid consumption record #{index}: {message}")]
    InvalidConsumption { index: usize, message: String },

    /// Calculation parameters supplied by the caller are out of range.
    #[error("invalid calculation input: {message}")]
    InvalidInput { message: String },

    /// Aggregation was asked to mix results from different reporting years.
    #[error("cannot aggregate a {found} result into the {expected} annual total")]
    MixedAggregate { expected: i32, found: i32 },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON (de)serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
