//! Shift assignment model.
//!
//! A shift assignment is a planned obligation created by an external
//! scheduling process; this engine only reads it.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A planned work period assigned to an employee for a specific date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    /// The employee the shift is assigned to.
    pub employee_id: String,
    /// Identifier of the shift template or roster row.
    pub shift_id: String,
    /// The calendar date the shift is worked.
    pub date: NaiveDate,
    /// Human-readable shift name (e.g. "Morning Desk").
    pub shift_name: String,
    /// The planned start time of day.
    pub shift_start: NaiveTime,
    /// The planned end time of day.
    pub shift_end: NaiveTime,
}
