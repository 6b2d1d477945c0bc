//! Incident model and related types.
//!
//! An incident is a derived record of a deviation between the planned shift
//! and the recorded clock data. Incidents are created by the detector (or by
//! a manual HR entry) and never mutated by detection afterwards.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of attendance deviation an incident records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentKind {
    /// No clock-in was registered for the assigned shift.
    Absence,
    /// Clock-in was later than the shift start beyond tolerance.
    Late,
    /// Clock-out was earlier than the shift end beyond tolerance.
    EarlyDeparture,
}

impl IncidentKind {
    /// Returns the wire spelling of the kind (`absence`, `late`,
    /// `early_departure`).
    pub fn as_str(&self) -> &'static str {
        match self {
            IncidentKind::Absence => "absence",
            IncidentKind::Late => "late",
            IncidentKind::EarlyDeparture => "early_departure",
        }
    }
}

/// A recorded deviation between plan and actual for one employee on one date.
///
/// At most one incident exists per (employee_id, date, kind); the storage
/// layer enforces this on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    /// Unique identifier for the incident.
    pub id: Uuid,
    /// The employee the incident belongs to.
    pub employee_id: String,
    /// The calendar date of the deviation.
    pub date: NaiveDate,
    /// The kind of deviation.
    pub kind: IncidentKind,
    /// Hours late, rounded; only set for [`IncidentKind::Late`].
    pub hours_late: Option<Decimal>,
    /// Human-readable reason including the literal times involved.
    pub reason: String,
    /// Additional context, such as the expected shift name and start.
    pub notes: Option<String>,
    /// Who created the incident (the engine label, or an HR user).
    pub created_by: String,
    /// When the incident was created.
    pub created_at: DateTime<Utc>,
}
