//! Attendance reconciliation logic.
//!
//! This module contains the detection pipeline: the pure time comparator,
//! the shift/timeclock matcher, the incident classifier, the detection
//! service with its batch processor and processing log, the auto-process
//! gate, and the record queries used by dashboard views.

mod classifier;
mod detector;
mod gate;
mod matcher;
mod records;
mod time_delta;

pub use classifier::{IncidentCandidate, classify_pairing};
pub use detector::AttendanceService;
pub use gate::AutoProcessOutcome;
pub use matcher::{ShiftPairing, match_shifts_for_date};
pub use records::{EnrichedIncident, IncidentUpdate, NewIncident};
pub use time_delta::{minutes_between, minutes_to_hours};
