//! Incident detection service.
//!
//! [`AttendanceService`] drives the matcher and classifier for a single date,
//! guards every candidate against duplicates, records the outcome in the
//! processing log, and iterates date ranges.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::DetectionConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Incident, IncidentKind, ProcessingLogEntry};
use crate::store::AttendanceStore;

use super::classifier::{IncidentCandidate, classify_pairing};
use super::matcher::match_shifts_for_date;

/// Orchestrates attendance reconciliation against a backing store.
///
/// The service is the sole writer of incidents and processing-log entries.
/// Detection is designed for sequential execution per logical run: the store
/// primitives keep repeated or overlapping runs from double-counting.
pub struct AttendanceService {
    store: Arc<dyn AttendanceStore>,
    config: DetectionConfig,
}

impl AttendanceService {
    /// Creates a service over a store with explicit detection settings.
    pub fn new(store: Arc<dyn AttendanceStore>, config: DetectionConfig) -> Self {
        Self { store, config }
    }

    /// Creates a service with the default detection settings.
    pub fn with_defaults(store: Arc<dyn AttendanceStore>) -> Self {
        Self::new(store, DetectionConfig::default())
    }

    /// Returns the detection settings in use.
    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    pub(crate) fn store(&self) -> &dyn AttendanceStore {
        self.store.as_ref()
    }

    /// Detects and persists incidents for one date, returning the newly
    /// created incidents.
    ///
    /// Detection never raises: any failure degrades to an empty result so
    /// callers (page hooks, buttons, scripts) cannot crash on a store outage.
    /// Nothing is recorded for a failed run, so the next run re-detects.
    pub async fn detect_daily_incidents(
        &self,
        date: NaiveDate,
        site_id: Option<&str>,
    ) -> Vec<Incident> {
        match self.detect_for_date(date, site_id).await {
            Ok(incidents) => incidents,
            Err(err) => {
                warn!(%date, site_id, error = %err, "detection failed, returning no incidents");
                Vec::new()
            }
        }
    }

    /// Runs detection for each date in the inclusive range, returning the
    /// total number of newly created incidents.
    ///
    /// A failure on one date records an error-status log row and contributes
    /// zero; processing continues with the next date. Per-day counts are in
    /// the processing log.
    pub async fn process_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        site_id: Option<&str>,
    ) -> EngineResult<u64> {
        if start > end {
            return Err(EngineError::InvalidDateRange { start, end });
        }

        let mut total = 0u64;
        let mut date = start;
        while date <= end {
            total += self.process_date(date, site_id).await;
            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }
        info!(%start, %end, site_id, total, "date range processed");
        Ok(total)
    }

    /// Runs detection for today and records the outcome in the processing
    /// log. Returns the number of newly created incidents.
    pub async fn process_today(&self, site_id: Option<&str>) -> u64 {
        self.process_date(Utc::now().date_naive(), site_id).await
    }

    /// Detects incidents for one date and upserts the processing-log row for
    /// its (date, site) scope.
    pub(crate) async fn process_date(&self, date: NaiveDate, site_id: Option<&str>) -> u64 {
        let entry = match self.detect_for_date(date, site_id).await {
            Ok(incidents) => {
                let late = count_kind(&incidents, IncidentKind::Late);
                let absence = count_kind(&incidents, IncidentKind::Absence);
                let early = count_kind(&incidents, IncidentKind::EarlyDeparture);
                ProcessingLogEntry::completed(
                    date,
                    site_id.map(str::to_string),
                    late,
                    absence,
                    early,
                )
            }
            Err(err) => {
                warn!(%date, site_id, error = %err, "run failed, recording error entry");
                ProcessingLogEntry::errored(date, site_id.map(str::to_string), err.to_string())
            }
        };

        let count = u64::from(entry.incidents_detected);
        if let Err(err) = self.store.upsert_log_entry(entry).await {
            warn!(%date, site_id, error = %err, "failed to record processing log entry");
        }
        count
    }

    /// The fallible detection pipeline: match, classify, guard, insert.
    async fn detect_for_date(
        &self,
        date: NaiveDate,
        site_id: Option<&str>,
    ) -> EngineResult<Vec<Incident>> {
        let pairings = match_shifts_for_date(self.store.as_ref(), date, site_id).await?;

        let mut created = Vec::new();
        for pairing in &pairings {
            for candidate in classify_pairing(pairing, &self.config) {
                let incident = self.incident_from_candidate(candidate);
                match self.store.insert_incident_if_absent(incident.clone()).await {
                    Ok(true) => created.push(incident),
                    // Already recorded by an earlier run; nothing to do.
                    Ok(false) => {}
                    Err(err) => {
                        // Skipped incidents are re-detected next run since
                        // nothing was persisted.
                        warn!(
                            employee_id = %incident.employee_id,
                            kind = incident.kind.as_str(),
                            error = %err,
                            "failed to persist incident"
                        );
                    }
                }
            }
        }

        info!(
            %date,
            site_id,
            pairings = pairings.len(),
            created = created.len(),
            "detection run finished"
        );
        Ok(created)
    }

    fn incident_from_candidate(&self, candidate: IncidentCandidate) -> Incident {
        Incident {
            id: Uuid::new_v4(),
            employee_id: candidate.employee_id,
            date: candidate.date,
            kind: candidate.kind,
            hours_late: candidate.hours_late,
            reason: candidate.reason,
            notes: candidate.notes,
            created_by: self.config.created_by.clone(),
            created_at: Utc::now(),
        }
    }
}

fn count_kind(incidents: &[Incident], kind: IncidentKind) -> u32 {
    incidents.iter().filter(|i| i.kind == kind).count() as u32
}
