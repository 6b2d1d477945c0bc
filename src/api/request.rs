//! Request types for the Attendance Reconciliation Engine API.
//!
//! This module defines the JSON bodies and query strings accepted by the
//! detection and record endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::detection::{IncidentUpdate, NewIncident};
use crate::models::IncidentKind;

/// Request body for `POST /detect`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectRequest {
    /// The calendar date to reconcile.
    pub date: NaiveDate,
    /// Optional site to scope the run to.
    #[serde(default)]
    pub site_id: Option<String>,
}

/// Request body for `POST /process-range`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessRangeRequest {
    /// The first date to reconcile (inclusive).
    pub start_date: NaiveDate,
    /// The last date to reconcile (inclusive).
    pub end_date: NaiveDate,
    /// Optional site to scope the run to.
    #[serde(default)]
    pub site_id: Option<String>,
}

/// Request body for `POST /process-today`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessTodayRequest {
    /// Optional site to scope the run to.
    #[serde(default)]
    pub site_id: Option<String>,
}

/// Query parameters for `GET /processing-log`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessingLogQuery {
    /// Earliest process date to include.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Latest process date to include.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Restrict rows to one site scope.
    #[serde(default)]
    pub site_id: Option<String>,
}

/// Query parameters for `GET /attendance-records`.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceQuery {
    /// Earliest incident date to include.
    pub start_date: NaiveDate,
    /// Latest incident date to include.
    pub end_date: NaiveDate,
}

/// Request body for `POST /incidents`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIncidentRequest {
    /// The employee the incident belongs to.
    pub employee_id: String,
    /// The calendar date of the deviation.
    pub date: NaiveDate,
    /// The kind of deviation.
    pub kind: IncidentKind,
    /// Hours late, if applicable.
    #[serde(default)]
    pub hours_late: Option<Decimal>,
    /// Human-readable reason.
    pub reason: String,
    /// Additional context.
    #[serde(default)]
    pub notes: Option<String>,
    /// The HR user recording the incident.
    pub created_by: String,
}

impl From<CreateIncidentRequest> for NewIncident {
    fn from(request: CreateIncidentRequest) -> Self {
        NewIncident {
            employee_id: request.employee_id,
            date: request.date,
            kind: request.kind,
            hours_late: request.hours_late,
            reason: request.reason,
            notes: request.notes,
            created_by: request.created_by,
        }
    }
}

/// Request body for `PUT /incidents/:id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateIncidentRequest {
    /// Replacement hours-late value.
    #[serde(default)]
    pub hours_late: Option<Decimal>,
    /// Replacement reason text.
    #[serde(default)]
    pub reason: Option<String>,
    /// Replacement notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<UpdateIncidentRequest> for IncidentUpdate {
    fn from(request: UpdateIncidentRequest) -> Self {
        IncidentUpdate {
            hours_late: request.hours_late,
            reason: request.reason,
            notes: request.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_request_site_defaults_to_none() {
        let request: DetectRequest = serde_json::from_str(r#"{"date": "2026-02-02"}"#).unwrap();
        assert!(request.site_id.is_none());
    }

    #[test]
    fn test_process_today_request_accepts_empty_body() {
        let request: ProcessTodayRequest = serde_json::from_str("{}").unwrap();
        assert!(request.site_id.is_none());
    }

    #[test]
    fn test_create_incident_request_converts_to_domain() {
        let json = r#"{
            "employee_id": "emp_001",
            "date": "2026-02-02",
            "kind": "late",
            "hours_late": "0.50",
            "reason": "entered by HR",
            "created_by": "hr_admin"
        }"#;
        let request: CreateIncidentRequest = serde_json::from_str(json).unwrap();
        let new: NewIncident = request.into();
        assert_eq!(new.kind, IncidentKind::Late);
        assert_eq!(new.hours_late, Some(Decimal::new(50, 2)));
        assert!(new.notes.is_none());
    }
}
