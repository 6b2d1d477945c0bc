//! Response types for the Attendance Reconciliation Engine API.
//!
//! This module defines the error response structures and the result bodies
//! for the mutation endpoints.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::Incident;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let status = match &error {
            EngineError::InvalidDateRange { .. } => StatusCode::BAD_REQUEST,
            EngineError::IncidentNotFound { .. } => StatusCode::NOT_FOUND,
            EngineError::DuplicateIncident { .. } => StatusCode::CONFLICT,
            EngineError::StoreRead { .. }
            | EngineError::StoreWrite { .. }
            | EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let code = match &error {
            EngineError::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            EngineError::IncidentNotFound { .. } => "INCIDENT_NOT_FOUND",
            EngineError::DuplicateIncident { .. } => "DUPLICATE_INCIDENT",
            EngineError::StoreRead { .. } => "STORE_READ_FAILED",
            EngineError::StoreWrite { .. } => "STORE_WRITE_FAILED",
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                "CONFIG_ERROR"
            }
        };
        ApiErrorResponse {
            status,
            error: ApiError::new(code, error.to_string()),
        }
    }
}

/// Result body for the manual incident mutation endpoints.
///
/// Expected failures (duplicate, not found) come back with
/// `success: false` and a message the dashboard can display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationResponse {
    /// Whether the mutation was applied.
    pub success: bool,
    /// The affected incident, present on success for create/update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident: Option<Incident>,
    /// The failure message when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MutationResponse {
    /// A successful mutation, optionally carrying the affected incident.
    pub fn ok(incident: Option<Incident>) -> Self {
        Self {
            success: true,
            incident,
            error: None,
        }
    }

    /// A failed mutation carrying the displayable message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            incident: None,
            error: Some(message.into()),
        }
    }
}

/// Count body for the processing endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CountResponse {
    /// Number of newly created incidents.
    pub count: u64,
}
