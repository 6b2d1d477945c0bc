//! In-memory implementation of [`AttendanceStore`].
//!
//! Backs tests, benches, and local runs. A single `RwLock` guards all tables,
//! which makes the insert-if-absent and upsert primitives atomic. Read-failure
//! toggles and per-table read counters let tests exercise the degraded paths
//! and assert that short-circuits really skip queries.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    EmployeeRecord, Incident, ProcessingLogEntry, ShiftAssignment, TimeclockRecord,
};

use super::AttendanceStore;

#[derive(Default)]
struct Tables {
    employees: Vec<EmployeeRecord>,
    assignments: Vec<ShiftAssignment>,
    timeclock: Vec<TimeclockRecord>,
    incidents: Vec<Incident>,
    log: Vec<ProcessingLogEntry>,
}

/// In-memory [`AttendanceStore`] for tests and local runs.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    assignment_reads: AtomicUsize,
    timeclock_reads: AtomicUsize,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an employee directory row.
    pub fn add_employee(&self, employee: EmployeeRecord) {
        if let Ok(mut tables) = self.tables.write() {
            tables.employees.push(employee);
        }
    }

    /// Seeds a shift assignment.
    pub fn add_assignment(&self, assignment: ShiftAssignment) {
        if let Ok(mut tables) = self.tables.write() {
            tables.assignments.push(assignment);
        }
    }

    /// Seeds a timeclock record.
    pub fn add_timeclock(&self, record: TimeclockRecord) {
        if let Ok(mut tables) = self.tables.write() {
            tables.timeclock.push(record);
        }
    }

    /// Makes every subsequent read fail, to exercise degraded paths.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent write fail, to exercise degraded paths.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of assignment reads performed so far.
    pub fn assignment_read_count(&self) -> usize {
        self.assignment_reads.load(Ordering::SeqCst)
    }

    /// Number of timeclock reads performed so far.
    pub fn timeclock_read_count(&self) -> usize {
        self.timeclock_reads.load(Ordering::SeqCst)
    }

    fn read_tables(&self) -> EngineResult<RwLockReadGuard<'_, Tables>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(EngineError::StoreRead {
                message: "simulated read failure".to_string(),
            });
        }
        self.tables.read().map_err(|_| EngineError::StoreRead {
            message: "store lock poisoned".to_string(),
        })
    }

    fn write_tables(&self) -> EngineResult<RwLockWriteGuard<'_, Tables>> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(EngineError::StoreWrite {
                message: "simulated write failure".to_string(),
            });
        }
        self.tables.write().map_err(|_| EngineError::StoreWrite {
            message: "store lock poisoned".to_string(),
        })
    }
}

#[async_trait]
impl AttendanceStore for InMemoryStore {
    async fn active_employee_ids(&self, site_id: &str) -> EngineResult<Vec<String>> {
        let tables = self.read_tables()?;
        Ok(tables
            .employees
            .iter()
            .filter(|e| e.active && e.site_id == site_id)
            .map(|e| e.id.clone())
            .collect())
    }

    async fn assignments_for_date(
        &self,
        date: NaiveDate,
        employee_ids: Option<&[String]>,
    ) -> EngineResult<Vec<ShiftAssignment>> {
        self.assignment_reads.fetch_add(1, Ordering::SeqCst);
        let tables = self.read_tables()?;
        Ok(tables
            .assignments
            .iter()
            .filter(|a| a.date == date)
            .filter(|a| employee_ids.is_none_or(|ids| ids.contains(&a.employee_id)))
            .cloned()
            .collect())
    }

    async fn timeclock_for_date(
        &self,
        date: NaiveDate,
        employee_ids: &[String],
    ) -> EngineResult<Vec<TimeclockRecord>> {
        self.timeclock_reads.fetch_add(1, Ordering::SeqCst);
        let tables = self.read_tables()?;
        Ok(tables
            .timeclock
            .iter()
            .filter(|r| r.date == date && employee_ids.contains(&r.employee_id))
            .cloned()
            .collect())
    }

    async fn employees_by_ids(&self, ids: &[String]) -> EngineResult<Vec<EmployeeRecord>> {
        let tables = self.read_tables()?;
        Ok(tables
            .employees
            .iter()
            .filter(|e| ids.contains(&e.id))
            .cloned()
            .collect())
    }

    async fn insert_incident_if_absent(&self, incident: Incident) -> EngineResult<bool> {
        let mut tables = self.write_tables()?;
        let exists = tables.incidents.iter().any(|i| {
            i.employee_id == incident.employee_id
                && i.date == incident.date
                && i.kind == incident.kind
        });
        if exists {
            return Ok(false);
        }
        tables.incidents.push(incident);
        Ok(true)
    }

    async fn incidents_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<Incident>> {
        let tables = self.read_tables()?;
        Ok(tables
            .incidents
            .iter()
            .filter(|i| i.date >= start && i.date <= end)
            .cloned()
            .collect())
    }

    async fn incidents_for_employee(&self, employee_id: &str) -> EngineResult<Vec<Incident>> {
        let tables = self.read_tables()?;
        Ok(tables
            .incidents
            .iter()
            .filter(|i| i.employee_id == employee_id)
            .cloned()
            .collect())
    }

    async fn incident_by_id(&self, id: Uuid) -> EngineResult<Option<Incident>> {
        let tables = self.read_tables()?;
        Ok(tables.incidents.iter().find(|i| i.id == id).cloned())
    }

    async fn replace_incident(&self, incident: Incident) -> EngineResult<bool> {
        let mut tables = self.write_tables()?;
        match tables.incidents.iter_mut().find(|i| i.id == incident.id) {
            Some(existing) => {
                *existing = incident;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_incident(&self, id: Uuid) -> EngineResult<bool> {
        let mut tables = self.write_tables()?;
        let before = tables.incidents.len();
        tables.incidents.retain(|i| i.id != id);
        Ok(tables.incidents.len() < before)
    }

    async fn upsert_log_entry(&self, entry: ProcessingLogEntry) -> EngineResult<()> {
        let mut tables = self.write_tables()?;
        match tables
            .log
            .iter_mut()
            .find(|e| e.process_date == entry.process_date && e.site_id == entry.site_id)
        {
            Some(existing) => *existing = entry,
            None => tables.log.push(entry),
        }
        Ok(())
    }

    async fn log_entry_for(
        &self,
        date: NaiveDate,
        site_id: Option<&str>,
    ) -> EngineResult<Option<ProcessingLogEntry>> {
        let tables = self.read_tables()?;
        Ok(tables
            .log
            .iter()
            .find(|e| e.process_date == date && e.site_id.as_deref() == site_id)
            .cloned())
    }

    async fn log_entries(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        site_id: Option<&str>,
    ) -> EngineResult<Vec<ProcessingLogEntry>> {
        let tables = self.read_tables()?;
        Ok(tables
            .log
            .iter()
            .filter(|e| start.is_none_or(|s| e.process_date >= s))
            .filter(|e| end.is_none_or(|s| e.process_date <= s))
            .filter(|e| site_id.is_none_or(|s| e.site_id.as_deref() == Some(s)))
            .cloned()
            .collect())
    }
}
