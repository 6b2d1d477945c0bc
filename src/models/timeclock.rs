//! Timeclock record model.
//!
//! Timeclock records are produced by an external capture mechanism; this
//! engine only reads them. Either timestamp can be missing — a forgotten
//! clock-out leaves `clock_out` as `None`, a fully missed day leaves the
//! whole record absent or `clock_in` as `None`.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// The actual recorded clock-in/clock-out timestamps for an employee on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeclockRecord {
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The site the clock event was captured at.
    pub site_id: String,
    /// The calendar date of the record.
    pub date: NaiveDate,
    /// The recorded clock-in timestamp, if any.
    pub clock_in: Option<NaiveDateTime>,
    /// The recorded clock-out timestamp, if any.
    pub clock_out: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_with_null_clock_out_deserializes() {
        let json = r#"{
            "employee_id": "emp_001",
            "site_id": "site_north",
            "date": "2026-02-02",
            "clock_in": "2026-02-02T09:30:00",
            "clock_out": null
        }"#;

        let record: TimeclockRecord = serde_json::from_str(json).unwrap();
        assert!(record.clock_in.is_some());
        assert!(record.clock_out.is_none());
        assert_eq!(record.site_id, "site_north");
    }

    #[test]
    fn test_record_round_trip() {
        let record = TimeclockRecord {
            employee_id: "emp_001".to_string(),
            site_id: "site_north".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 2, 2).unwrap(),
            clock_in: NaiveDateTime::parse_from_str("2026-02-02 08:58:00", "%Y-%m-%d %H:%M:%S")
                .ok(),
            clock_out: NaiveDateTime::parse_from_str("2026-02-02 17:02:00", "%Y-%m-%d %H:%M:%S")
                .ok(),
        };

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: TimeclockRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }
}
