//! Auto-process gate.
//!
//! The "has today already been processed" check is an explicit query against
//! the processing log rather than an in-memory flag, so it survives process
//! restarts and concurrent entry points (page-load hook, manual button,
//! scripts).

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::models::ProcessingStatus;

use super::detector::AttendanceService;

/// The result of [`AttendanceService::auto_process_if_needed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoProcessOutcome {
    /// Whether a detection run actually happened.
    pub processed: bool,
    /// Newly created incidents, zero when nothing ran.
    pub count: u64,
}

impl AttendanceService {
    /// Returns true iff a completed log row exists for today with no site
    /// filter.
    ///
    /// A log-read failure is reported as "not processed": re-attempting a run
    /// is harmless thanks to the idempotency guard, while skipping one could
    /// silently lose a day.
    pub async fn was_processed_today(&self) -> bool {
        let today = Utc::now().date_naive();
        match self.store().log_entry_for(today, None).await {
            Ok(Some(entry)) => entry.status == ProcessingStatus::Completed,
            Ok(None) => false,
            Err(err) => {
                warn!(%today, error = %err, "processing log unavailable, assuming unprocessed");
                false
            }
        }
    }

    /// Runs today's detection unless it already completed today.
    ///
    /// When today's run is already recorded this is a read-only no-op that
    /// touches neither shift nor timeclock data, which is what makes it safe
    /// to invoke from every UI entry point.
    pub async fn auto_process_if_needed(&self) -> AutoProcessOutcome {
        if self.was_processed_today().await {
            return AutoProcessOutcome {
                processed: false,
                count: 0,
            };
        }

        let count = self.process_today(None).await;
        info!(count, "auto-process ran for today");
        AutoProcessOutcome {
            processed: true,
            count,
        }
    }
}
