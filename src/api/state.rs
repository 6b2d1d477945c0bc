//! Application state for the Attendance Reconciliation Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::detection::AttendanceService;

/// Shared application state.
///
/// Contains the reconciliation service shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    service: Arc<AttendanceService>,
}

impl AppState {
    /// Creates a new application state around a service.
    pub fn new(service: AttendanceService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Returns a reference to the reconciliation service.
    pub fn service(&self) -> &AttendanceService {
        &self.service
    }
}
