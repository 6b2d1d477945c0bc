//! Processing log model.
//!
//! One audit row per (process_date, site scope) describing what a
//! reconciliation run produced. The log backs the "already processed today"
//! gate, so correctness survives process restarts.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The outcome of a reconciliation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    /// The run finished and its counts are reliable.
    Completed,
    /// The run failed outright; `error_message` carries the cause.
    Error,
}

/// An audit row recording the outcome of one reconciliation run.
///
/// At most one entry exists per (process_date, site_id); later runs for the
/// same scope replace the row in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingLogEntry {
    /// The calendar date the run reconciled.
    pub process_date: NaiveDate,
    /// The site the run was scoped to, or `None` for all sites.
    pub site_id: Option<String>,
    /// Total incidents newly created by the run.
    pub incidents_detected: u32,
    /// Newly created late-arrival incidents.
    pub late_count: u32,
    /// Newly created absence incidents.
    pub absence_count: u32,
    /// Newly created early-departure incidents.
    pub early_departure_count: u32,
    /// Whether the run completed or failed.
    pub status: ProcessingStatus,
    /// The failure cause when `status` is [`ProcessingStatus::Error`].
    pub error_message: Option<String>,
    /// When the run finished.
    pub processed_at: DateTime<Utc>,
}

impl ProcessingLogEntry {
    /// Builds a completed entry from per-kind counts.
    pub fn completed(
        process_date: NaiveDate,
        site_id: Option<String>,
        late_count: u32,
        absence_count: u32,
        early_departure_count: u32,
    ) -> Self {
        Self {
            process_date,
            site_id,
            incidents_detected: late_count + absence_count + early_departure_count,
            late_count,
            absence_count,
            early_departure_count,
            status: ProcessingStatus::Completed,
            error_message: None,
            processed_at: Utc::now(),
        }
    }

    /// Builds an error entry recording a run that failed outright.
    pub fn errored(process_date: NaiveDate, site_id: Option<String>, message: String) -> Self {
        Self {
            process_date,
            site_id,
            incidents_detected: 0,
            late_count: 0,
            absence_count: 0,
            early_departure_count: 0,
            status: ProcessingStatus::Error,
            error_message: Some(message),
            processed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_entry_sums_counts() {
        let entry = ProcessingLogEntry::completed(
            NaiveDate::from_ymd_opt(2026, 2, 2).unwrap(),
            Some("site_north".to_string()),
            3,
            1,
            2,
        );
        assert_eq!(entry.incidents_detected, 6);
        assert_eq!(entry.status, ProcessingStatus::Completed);
        assert!(entry.error_message.is_none());
    }

    #[test]
    fn test_errored_entry_has_zero_counts_and_message() {
        let entry = ProcessingLogEntry::errored(
            NaiveDate::from_ymd_opt(2026, 2, 2).unwrap(),
            None,
            "store unreachable".to_string(),
        );
        assert_eq!(entry.incidents_detected, 0);
        assert_eq!(entry.status, ProcessingStatus::Error);
        assert_eq!(entry.error_message.as_deref(), Some("store unreachable"));
    }

    #[test]
    fn test_status_serialization_is_snake_case() {
        assert_eq!(
            serde_json::to_string(&ProcessingStatus::Completed).unwrap(),
            "\"completed\""
        );
        assert_eq!(
            serde_json::to_string(&ProcessingStatus::Error).unwrap(),
            "\"error\""
        );
    }
}
