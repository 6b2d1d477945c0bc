//! Shift/timeclock matcher.
//!
//! Loads the shift assignments and timeclock records for one date, optionally
//! scoped to a site, and pairs each assignment with at most one record for
//! the same employee.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{ShiftAssignment, TimeclockRecord};
use crate::store::AttendanceStore;

/// One planned shift paired with the employee's clock record, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftPairing {
    /// The planned shift.
    pub assignment: ShiftAssignment,
    /// The matching timeclock record, or `None` when the employee never
    /// clocked in that day.
    pub record: Option<TimeclockRecord>,
}

/// Loads and pairs assignments with timeclock records for a date.
///
/// With a site filter, the site's active employee ids are resolved first and
/// assignment lookup is restricted to them. When the date/site has no
/// assignments the function returns an empty set without querying timeclock
/// data at all.
///
/// If the source holds more than one timeclock record for an (employee, date)
/// pair, the record with the latest `clock_in` wins; records without a
/// clock-in sort earliest.
pub async fn match_shifts_for_date(
    store: &dyn AttendanceStore,
    date: NaiveDate,
    site_id: Option<&str>,
) -> EngineResult<Vec<ShiftPairing>> {
    let site_employee_ids = match site_id {
        Some(site) => Some(store.active_employee_ids(site).await?),
        None => None,
    };

    let assignments = store
        .assignments_for_date(date, site_employee_ids.as_deref())
        .await?;
    if assignments.is_empty() {
        return Ok(Vec::new());
    }

    let mut employee_ids: Vec<String> = assignments.iter().map(|a| a.employee_id.clone()).collect();
    employee_ids.sort();
    employee_ids.dedup();

    let records = store.timeclock_for_date(date, &employee_ids).await?;

    // Latest clock_in wins; Option ordering puts None first.
    let mut by_employee: HashMap<String, TimeclockRecord> = HashMap::new();
    for record in records {
        match by_employee.get(&record.employee_id) {
            Some(existing) if existing.clock_in >= record.clock_in => {}
            _ => {
                by_employee.insert(record.employee_id.clone(), record);
            }
        }
    }

    Ok(assignments
        .into_iter()
        .map(|assignment| {
            let record = by_employee.get(&assignment.employee_id).cloned();
            ShiftPairing { assignment, record }
        })
        .collect())
}
