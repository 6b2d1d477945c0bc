//! Error types for the Attendance Reconciliation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during reconciliation.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for the Attendance Reconciliation Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::StoreRead {
///     message: "connection refused".to_string(),
/// };
/// assert_eq!(error.to_string(), "Store read failed: connection refused");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A read against the backing store failed.
    #[error("Store read failed: {message}")]
    StoreRead {
        /// A description of the read failure.
        message: String,
    },

    /// A write against the backing store failed.
    #[error("Store write failed: {message}")]
    StoreWrite {
        /// A description of the write failure.
        message: String,
    },

    /// A batch range was supplied with the start date after the end date.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// The requested start date.
        start: NaiveDate,
        /// The requested end date.
        end: NaiveDate,
    },

    /// No incident exists with the given id.
    #[error("Incident not found: {id}")]
    IncidentNotFound {
        /// The incident id that was not found.
        id: Uuid,
    },

    /// An incident already exists for the same employee, date, and kind.
    #[error("Duplicate incident for employee '{employee_id}' on {date} ({kind})")]
    DuplicateIncident {
        /// The employee the incident belongs to.
        employee_id: String,
        /// The incident date.
        date: NaiveDate,
        /// The incident kind, in its wire spelling.
        kind: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
