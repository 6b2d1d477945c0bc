//! Record queries and manual incident maintenance.
//!
//! Read paths for the dashboard (processing log, enriched attendance view,
//! per-employee history) and the HR-facing create/update/delete operations.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Incident, IncidentKind, ProcessingLogEntry};

use super::detector::AttendanceService;

/// An incident joined with the employee's directory details.
///
/// Incidents whose employee is missing from the directory are kept with the
/// lookup fields unset rather than dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedIncident {
    /// The underlying incident.
    #[serde(flatten)]
    pub incident: Incident,
    /// The employee's display name, when the directory knows them.
    pub employee_name: Option<String>,
    /// The employee's site, when the directory knows them.
    pub site_id: Option<String>,
}

/// Fields for a manually created incident.
#[derive(Debug, Clone, Deserialize)]
pub struct NewIncident {
    /// The employee the incident belongs to.
    pub employee_id: String,
    /// The calendar date of the deviation.
    pub date: NaiveDate,
    /// The kind of deviation.
    pub kind: IncidentKind,
    /// Hours late, if applicable.
    pub hours_late: Option<Decimal>,
    /// Human-readable reason.
    pub reason: String,
    /// Additional context.
    pub notes: Option<String>,
    /// The HR user recording the incident.
    pub created_by: String,
}

/// Partial update for an existing incident; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncidentUpdate {
    /// Replacement hours-late value.
    pub hours_late: Option<Decimal>,
    /// Replacement reason text.
    pub reason: Option<String>,
    /// Replacement notes.
    pub notes: Option<String>,
}

impl AttendanceService {
    /// Returns processing-log rows matching the optional filters, newest
    /// process date first.
    ///
    /// A read failure degrades to an empty collection so dashboard views
    /// render rather than crash.
    pub async fn processing_log(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        site_id: Option<&str>,
    ) -> Vec<ProcessingLogEntry> {
        match self.store().log_entries(start, end, site_id).await {
            Ok(mut entries) => {
                entries.sort_by(|a, b| b.process_date.cmp(&a.process_date));
                entries
            }
            Err(err) => {
                warn!(error = %err, "processing log read failed, returning empty");
                Vec::new()
            }
        }
    }

    /// Returns incidents in the inclusive date range joined with employee
    /// display names and sites, newest first.
    pub async fn attendance_records(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<EnrichedIncident>> {
        let mut incidents = self.store().incidents_in_range(start, end).await?;
        incidents.sort_by(|a, b| b.date.cmp(&a.date));

        let mut ids: Vec<String> = incidents.iter().map(|i| i.employee_id.clone()).collect();
        ids.sort();
        ids.dedup();

        let directory: HashMap<String, (String, String)> = self
            .store()
            .employees_by_ids(&ids)
            .await?
            .into_iter()
            .map(|e| (e.id, (e.display_name, e.site_id)))
            .collect();

        Ok(incidents
            .into_iter()
            .map(|incident| {
                let looked_up = directory.get(&incident.employee_id).cloned();
                let (employee_name, site_id) = match looked_up {
                    Some((name, site)) => (Some(name), Some(site)),
                    None => (None, None),
                };
                EnrichedIncident {
                    incident,
                    employee_name,
                    site_id,
                }
            })
            .collect())
    }

    /// Returns every incident recorded for an employee, newest first.
    pub async fn employee_history(&self, employee_id: &str) -> EngineResult<Vec<Incident>> {
        let mut incidents = self.store().incidents_for_employee(employee_id).await?;
        incidents.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(incidents)
    }

    /// Records a manually entered incident.
    ///
    /// The same one-per-(employee, date, kind) invariant applies as for
    /// detected incidents; a duplicate is rejected with
    /// [`EngineError::DuplicateIncident`].
    pub async fn create_incident(&self, new: NewIncident) -> EngineResult<Incident> {
        let incident = Incident {
            id: Uuid::new_v4(),
            employee_id: new.employee_id,
            date: new.date,
            kind: new.kind,
            hours_late: new.hours_late,
            reason: new.reason,
            notes: new.notes,
            created_by: new.created_by,
            created_at: Utc::now(),
        };

        if self
            .store()
            .insert_incident_if_absent(incident.clone())
            .await?
        {
            Ok(incident)
        } else {
            Err(EngineError::DuplicateIncident {
                employee_id: incident.employee_id,
                date: incident.date,
                kind: incident.kind.as_str().to_string(),
            })
        }
    }

    /// Applies a partial update to an existing incident.
    pub async fn update_incident(&self, id: Uuid, update: IncidentUpdate) -> EngineResult<Incident> {
        let mut incident = self
            .store()
            .incident_by_id(id)
            .await?
            .ok_or(EngineError::IncidentNotFound { id })?;

        if let Some(hours_late) = update.hours_late {
            incident.hours_late = Some(hours_late);
        }
        if let Some(reason) = update.reason {
            incident.reason = reason;
        }
        if let Some(notes) = update.notes {
            incident.notes = Some(notes);
        }

        if self.store().replace_incident(incident.clone()).await? {
            Ok(incident)
        } else {
            Err(EngineError::IncidentNotFound { id })
        }
    }

    /// Deletes an incident by id.
    pub async fn delete_incident(&self, id: Uuid) -> EngineResult<()> {
        if self.store().delete_incident(id).await? {
            Ok(())
        } else {
            Err(EngineError::IncidentNotFound { id })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmployeeRecord;
    use crate::store::{AttendanceStore, InMemoryStore};
    use std::sync::Arc;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn new_incident(employee_id: &str, day: &str, kind: IncidentKind) -> NewIncident {
        NewIncident {
            employee_id: employee_id.to_string(),
            date: date(day),
            kind,
            hours_late: None,
            reason: "entered by HR".to_string(),
            notes: None,
            created_by: "hr_admin".to_string(),
        }
    }

    fn service() -> (Arc<InMemoryStore>, AttendanceService) {
        let store = Arc::new(InMemoryStore::new());
        let service = AttendanceService::with_defaults(store.clone());
        (store, service)
    }

    #[tokio::test]
    async fn test_create_then_duplicate_is_rejected() {
        let (_, service) = service();
        let created = service
            .create_incident(new_incident("emp_001", "2026-02-02", IncidentKind::Absence))
            .await
            .unwrap();
        assert_eq!(created.created_by, "hr_admin");

        let duplicate = service
            .create_incident(new_incident("emp_001", "2026-02-02", IncidentKind::Absence))
            .await;
        assert!(matches!(
            duplicate,
            Err(EngineError::DuplicateIncident { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_changes_only_provided_fields() {
        let (_, service) = service();
        let created = service
            .create_incident(new_incident("emp_001", "2026-02-02", IncidentKind::Late))
            .await
            .unwrap();

        let updated = service
            .update_incident(
                created.id,
                IncidentUpdate {
                    reason: Some("corrected after review".to_string()),
                    ..IncidentUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.reason, "corrected after review");
        assert_eq!(updated.created_by, "hr_admin");
        assert_eq!(updated.date, created.date);
    }

    #[tokio::test]
    async fn test_update_missing_incident_is_not_found() {
        let (_, service) = service();
        let result = service
            .update_incident(Uuid::new_v4(), IncidentUpdate::default())
            .await;
        assert!(matches!(result, Err(EngineError::IncidentNotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_removes_incident() {
        let (store, service) = service();
        let created = service
            .create_incident(new_incident("emp_001", "2026-02-02", IncidentKind::Absence))
            .await
            .unwrap();

        service.delete_incident(created.id).await.unwrap();
        assert!(store.incident_by_id(created.id).await.unwrap().is_none());

        let again = service.delete_incident(created.id).await;
        assert!(matches!(again, Err(EngineError::IncidentNotFound { .. })));
    }

    #[tokio::test]
    async fn test_attendance_records_joins_directory() {
        let (store, service) = service();
        store.add_employee(EmployeeRecord {
            id: "emp_001".to_string(),
            display_name: "Dana Reyes".to_string(),
            site_id: "site_north".to_string(),
            active: true,
        });
        service
            .create_incident(new_incident("emp_001", "2026-02-02", IncidentKind::Absence))
            .await
            .unwrap();
        service
            .create_incident(new_incident("emp_unknown", "2026-02-03", IncidentKind::Late))
            .await
            .unwrap();

        let records = service
            .attendance_records(date("2026-02-01"), date("2026-02-28"))
            .await
            .unwrap();
        assert_eq!(records.len(), 2);

        // Newest first; the unknown employee is kept with empty lookups.
        assert_eq!(records[0].incident.employee_id, "emp_unknown");
        assert!(records[0].employee_name.is_none());
        assert_eq!(records[1].employee_name.as_deref(), Some("Dana Reyes"));
        assert_eq!(records[1].site_id.as_deref(), Some("site_north"));
    }

    #[tokio::test]
    async fn test_employee_history_is_newest_first() {
        let (_, service) = service();
        service
            .create_incident(new_incident("emp_001", "2026-02-02", IncidentKind::Absence))
            .await
            .unwrap();
        service
            .create_incident(new_incident("emp_001", "2026-02-10", IncidentKind::Late))
            .await
            .unwrap();
        service
            .create_incident(new_incident("emp_002", "2026-02-05", IncidentKind::Late))
            .await
            .unwrap();

        let history = service.employee_history("emp_001").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].date, date("2026-02-10"));
        assert_eq!(history[1].date, date("2026-02-02"));
    }

    #[tokio::test]
    async fn test_processing_log_read_failure_degrades_to_empty() {
        let (store, service) = service();
        store.set_fail_reads(true);
        let entries = service.processing_log(None, None, None).await;
        assert!(entries.is_empty());
    }
}
