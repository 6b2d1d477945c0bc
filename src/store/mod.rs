//! Storage seam for the Attendance Reconciliation Engine.
//!
//! The engine is the sole writer of incidents and processing-log entries and
//! only reads shift assignments, timeclock records, and the employee
//! directory, which are owned by external subsystems. Production deployments
//! back [`AttendanceStore`] with the shared relational store; the crate ships
//! [`InMemoryStore`] for tests and local runs.

mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{
    EmployeeRecord, Incident, IncidentKind, ProcessingLogEntry, ShiftAssignment, TimeclockRecord,
};

/// Storage contract used by detection, the processing log, and record queries.
///
/// The two write primitives are deliberately atomic: `insert_incident_if_absent`
/// must insert-or-skip in a single storage operation keyed on
/// (employee_id, date, kind), and `upsert_log_entry` must insert-or-replace in
/// a single operation keyed on (process_date, site_id). A SQL-backed
/// implementation maps these onto unique indexes with conflict clauses; the
/// engine never performs a separate read-then-write for idempotency.
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Returns the ids of active employees belonging to a site.
    async fn active_employee_ids(&self, site_id: &str) -> EngineResult<Vec<String>>;

    /// Returns shift assignments for a date, optionally restricted to a set
    /// of employee ids.
    async fn assignments_for_date(
        &self,
        date: NaiveDate,
        employee_ids: Option<&[String]>,
    ) -> EngineResult<Vec<ShiftAssignment>>;

    /// Returns timeclock records for a date restricted to the given
    /// employee ids.
    async fn timeclock_for_date(
        &self,
        date: NaiveDate,
        employee_ids: &[String],
    ) -> EngineResult<Vec<TimeclockRecord>>;

    /// Resolves employee directory rows for the given ids. Unknown ids are
    /// simply absent from the result.
    async fn employees_by_ids(&self, ids: &[String]) -> EngineResult<Vec<EmployeeRecord>>;

    /// Inserts an incident unless one already exists for the same
    /// (employee_id, date, kind). Returns whether the insert happened.
    async fn insert_incident_if_absent(&self, incident: Incident) -> EngineResult<bool>;

    /// Returns incidents whose date falls within the inclusive range.
    async fn incidents_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<Incident>>;

    /// Returns all incidents recorded for an employee.
    async fn incidents_for_employee(&self, employee_id: &str) -> EngineResult<Vec<Incident>>;

    /// Looks up a single incident by id.
    async fn incident_by_id(&self, id: Uuid) -> EngineResult<Option<Incident>>;

    /// Replaces the stored incident with the same id. Returns whether a row
    /// was found and replaced.
    async fn replace_incident(&self, incident: Incident) -> EngineResult<bool>;

    /// Deletes an incident by id. Returns whether a row was deleted.
    async fn delete_incident(&self, id: Uuid) -> EngineResult<bool>;

    /// Inserts or replaces the log entry for (process_date, site_id).
    async fn upsert_log_entry(&self, entry: ProcessingLogEntry) -> EngineResult<()>;

    /// Returns the log entry for an exact (process_date, site_id) scope.
    async fn log_entry_for(
        &self,
        date: NaiveDate,
        site_id: Option<&str>,
    ) -> EngineResult<Option<ProcessingLogEntry>>;

    /// Returns log entries filtered by optional date bounds and site.
    async fn log_entries(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        site_id: Option<&str>,
    ) -> EngineResult<Vec<ProcessingLogEntry>>;
}

/// Convenience lookup: whether an incident exists for the scope.
///
/// Read-only counterpart of [`AttendanceStore::insert_incident_if_absent`],
/// handy for callers that only need the existence check.
pub async fn incident_exists(
    store: &dyn AttendanceStore,
    employee_id: &str,
    date: NaiveDate,
    kind: IncidentKind,
) -> EngineResult<bool> {
    let incidents = store.incidents_in_range(date, date).await?;
    Ok(incidents
        .iter()
        .any(|i| i.employee_id == employee_id && i.kind == kind))
}
