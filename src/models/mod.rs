//! Data models for the Attendance Reconciliation Engine.

mod employee;
mod incident;
mod processing_log;
mod shift_assignment;
mod timeclock;

pub use employee::EmployeeRecord;
pub use incident::{Incident, IncidentKind};
pub use processing_log::{ProcessingLogEntry, ProcessingStatus};
pub use shift_assignment::ShiftAssignment;
pub use timeclock::TimeclockRecord;
