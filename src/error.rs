//! Error types for the payroll calculation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing a payslip.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the payroll calculation engine.
///
/// Every failure is terminal for the calculation that raised it: no partial
/// payslip is ever returned alongside an error.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
/// use chrono::NaiveDate;
///
/// let error = EngineError::ParametersNotFound {
///     date: NaiveDate::from_ymd_opt(2019, 3, 1).unwrap(),
/// };
/// assert_eq!(error.to_string(), "No payroll parameters cover period 2019-03-01");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or failed validation.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No active payroll parameters cover the requested period.
    #[error("No payroll parameters cover period {date}")]
    ParametersNotFound {
        /// The period that could not be resolved.
        date: NaiveDate,
    },

    /// An employee attribute was missing or malformed.
    #[error("Invalid employee data for '{employee_id}', field '{field}': {message}")]
    InvalidEmployeeData {
        /// The employee the calculation was requested for.
        employee_id: String,
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A monetary value or rate was negative or not a number.
    #[error("Validation failed for '{field}': {message}")]
    Validation {
        /// The offending field.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

impl EngineError {
    /// Builds a [`EngineError::Validation`] error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Builds a [`EngineError::InvalidEmployeeData`] error.
    pub fn invalid_employee(
        employee_id: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidEmployeeData {
            employee_id: employee_id.into(),
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
