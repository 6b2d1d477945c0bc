//! HTTP API module for the Attendance Reconciliation Engine.
//!
//! This module provides the REST API endpoints the dashboard, startup hook,
//! and scripts call to run detection and browse its results.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AttendanceQuery, CreateIncidentRequest, DetectRequest, ProcessRangeRequest,
    ProcessTodayRequest, ProcessingLogQuery, UpdateIncidentRequest,
};
pub use response::{ApiError, CountResponse, MutationResponse};
pub use state::AppState;
