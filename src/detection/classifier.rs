//! Incident classification.
//!
//! Applies the tolerance rules to a shift pairing and emits zero, one, or two
//! incident candidates. Absence excludes the timing checks; late arrival and
//! early departure are evaluated independently of each other.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::DetectionConfig;
use crate::models::IncidentKind;

use super::matcher::ShiftPairing;
use super::time_delta::{minutes_between, minutes_to_hours};

/// An incident the classifier proposes, before the idempotency check.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentCandidate {
    /// The employee the deviation belongs to.
    pub employee_id: String,
    /// The calendar date of the deviation.
    pub date: NaiveDate,
    /// The kind of deviation.
    pub kind: IncidentKind,
    /// Hours late, rounded; only set for late arrivals.
    pub hours_late: Option<Decimal>,
    /// Human-readable reason including the literal times involved.
    pub reason: String,
    /// Additional context, such as the expected shift name and start.
    pub notes: Option<String>,
}

/// Classifies one shift pairing into incident candidates.
///
/// - No record, or a record without a clock-in, yields a single absence
///   candidate and nothing else.
/// - A clock-in later than the shift start by more than the tolerance yields
///   a late candidate with rounded `hours_late`.
/// - A clock-out earlier than the shift end by more than the tolerance yields
///   an early-departure candidate; a missing clock-out is not an incident.
///
/// A deviation of exactly the tolerance is within grace and yields nothing.
pub fn classify_pairing(pairing: &ShiftPairing, config: &DetectionConfig) -> Vec<IncidentCandidate> {
    let assignment = &pairing.assignment;

    let record = match &pairing.record {
        Some(record) if record.clock_in.is_some() => record,
        _ => {
            return vec![IncidentCandidate {
                employee_id: assignment.employee_id.clone(),
                date: assignment.date,
                kind: IncidentKind::Absence,
                hours_late: None,
                reason: "no clock-in registered".to_string(),
                notes: Some(format!(
                    "expected shift '{}' starting at {}",
                    assignment.shift_name,
                    assignment.shift_start.format("%H:%M")
                )),
            }];
        }
    };

    let mut candidates = Vec::new();

    if let Some(clock_in) = record.clock_in {
        let late_minutes = minutes_between(assignment.shift_start, clock_in.time());
        if late_minutes > config.tolerance_minutes {
            candidates.push(IncidentCandidate {
                employee_id: assignment.employee_id.clone(),
                date: assignment.date,
                kind: IncidentKind::Late,
                hours_late: Some(minutes_to_hours(late_minutes, config.hours_precision)),
                reason: format!(
                    "clocked in at {} against shift start {}",
                    clock_in.time().format("%H:%M"),
                    assignment.shift_start.format("%H:%M")
                ),
                notes: None,
            });
        }
    }

    if let Some(clock_out) = record.clock_out {
        let early_minutes = minutes_between(clock_out.time(), assignment.shift_end);
        if early_minutes > config.tolerance_minutes {
            candidates.push(IncidentCandidate {
                employee_id: assignment.employee_id.clone(),
                date: assignment.date,
                kind: IncidentKind::EarlyDeparture,
                hours_late: None,
                reason: format!(
                    "clocked out at {} before shift end {}",
                    clock_out.time().format("%H:%M"),
                    assignment.shift_end.format("%H:%M")
                ),
                notes: None,
            });
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ShiftAssignment, TimeclockRecord};
    use chrono::{NaiveDateTime, NaiveTime};

    fn config() -> DetectionConfig {
        DetectionConfig::default()
    }

    fn datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn pairing(clock_in: Option<&str>, clock_out: Option<&str>) -> ShiftPairing {
        let assignment = ShiftAssignment {
            employee_id: "emp_001".to_string(),
            shift_id: "shift_morning".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 2, 2).unwrap(),
            shift_name: "Morning Desk".to_string(),
            shift_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            shift_end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        };
        let record = if clock_in.is_none() && clock_out.is_none() {
            None
        } else {
            Some(TimeclockRecord {
                employee_id: "emp_001".to_string(),
                site_id: "site_north".to_string(),
                date: assignment.date,
                clock_in: clock_in.map(datetime),
                clock_out: clock_out.map(datetime),
            })
        };
        ShiftPairing { assignment, record }
    }

    #[test]
    fn test_no_record_is_absence() {
        let candidates = classify_pairing(&pairing(None, None), &config());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].kind, IncidentKind::Absence);
        assert_eq!(candidates[0].reason, "no clock-in registered");
        assert_eq!(
            candidates[0].notes.as_deref(),
            Some("expected shift 'Morning Desk' starting at 09:00")
        );
        assert!(candidates[0].hours_late.is_none());
    }

    #[test]
    fn test_record_without_clock_in_is_absence_only() {
        // A stray clock-out without a clock-in still counts as absence and
        // triggers no timing checks.
        let candidates = classify_pairing(&pairing(None, Some("2026-02-02 16:00:00")), &config());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].kind, IncidentKind::Absence);
    }

    #[test]
    fn test_on_time_produces_nothing() {
        let candidates = classify_pairing(
            &pairing(Some("2026-02-02 09:00:00"), Some("2026-02-02 17:00:00")),
            &config(),
        );
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_exactly_tolerance_is_within_grace() {
        let candidates = classify_pairing(
            &pairing(Some("2026-02-02 09:05:00"), Some("2026-02-02 16:55:00")),
            &config(),
        );
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_six_minutes_late_is_a_late_incident() {
        let candidates = classify_pairing(&pairing(Some("2026-02-02 09:06:00"), None), &config());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].kind, IncidentKind::Late);
        assert_eq!(candidates[0].hours_late.unwrap(), Decimal::new(10, 2));
    }

    #[test]
    fn test_late_reason_carries_both_literal_times() {
        let candidates = classify_pairing(&pairing(Some("2026-02-02 09:30:00"), None), &config());
        assert_eq!(candidates.len(), 1);
        assert!(candidates[0].reason.contains("09:30"));
        assert!(candidates[0].reason.contains("09:00"));
        assert_eq!(candidates[0].hours_late.unwrap(), Decimal::new(50, 2));
    }

    #[test]
    fn test_early_departure_reason_carries_both_literal_times() {
        let candidates = classify_pairing(
            &pairing(Some("2026-02-02 09:00:00"), Some("2026-02-02 16:45:00")),
            &config(),
        );
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].kind, IncidentKind::EarlyDeparture);
        assert!(candidates[0].reason.contains("16:45"));
        assert!(candidates[0].reason.contains("17:00"));
        assert!(candidates[0].hours_late.is_none());
    }

    #[test]
    fn test_missing_clock_out_is_not_early_departure() {
        let candidates = classify_pairing(&pairing(Some("2026-02-02 09:00:00"), None), &config());
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_late_and_early_are_independent() {
        let candidates = classify_pairing(
            &pairing(Some("2026-02-02 09:30:00"), Some("2026-02-02 16:45:00")),
            &config(),
        );
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].kind, IncidentKind::Late);
        assert_eq!(candidates[1].kind, IncidentKind::EarlyDeparture);
    }

    #[test]
    fn test_late_clock_out_is_not_an_incident() {
        let candidates = classify_pairing(
            &pairing(Some("2026-02-02 09:00:00"), Some("2026-02-02 18:00:00")),
            &config(),
        );
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_custom_tolerance_is_honored() {
        let mut custom = config();
        custom.tolerance_minutes = 10;
        let candidates =
            classify_pairing(&pairing(Some("2026-02-02 09:10:00"), None), &custom);
        assert!(candidates.is_empty());

        let candidates =
            classify_pairing(&pairing(Some("2026-02-02 09:11:00"), None), &custom);
        assert_eq!(candidates.len(), 1);
    }
}
