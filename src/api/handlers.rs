//! HTTP request handlers for the Attendance Reconciliation Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use tracing::{info, warn};
use uuid::Uuid;

use super::request::{
    AttendanceQuery, CreateIncidentRequest, DetectRequest, ProcessRangeRequest,
    ProcessTodayRequest, ProcessingLogQuery, UpdateIncidentRequest,
};
use super::response::{ApiError, ApiErrorResponse, CountResponse, MutationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/detect", post(detect_handler))
        .route("/process-range", post(process_range_handler))
        .route("/process-today", post(process_today_handler))
        .route("/auto-process", post(auto_process_handler))
        .route("/processing-log", get(processing_log_handler))
        .route("/attendance-records", get(attendance_records_handler))
        .route(
            "/employees/:employee_id/incidents",
            get(employee_history_handler),
        )
        .route("/incidents", post(create_incident_handler))
        .route(
            "/incidents/:id",
            put(update_incident_handler).delete(delete_incident_handler),
        )
        .with_state(state)
}

/// Handler for POST /detect.
///
/// Runs single-date detection and returns the newly created incidents.
/// Detection itself never fails; a store outage yields an empty list.
async fn detect_handler(
    State(state): State<AppState>,
    payload: Result<Json<DetectRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    info!(
        correlation_id = %correlation_id,
        date = %request.date,
        site_id = request.site_id.as_deref(),
        "running daily detection"
    );
    let incidents = state
        .service()
        .detect_daily_incidents(request.date, request.site_id.as_deref())
        .await;
    (StatusCode::OK, Json(incidents)).into_response()
}

/// Handler for POST /process-range.
async fn process_range_handler(
    State(state): State<AppState>,
    Json(request): Json<ProcessRangeRequest>,
) -> Response {
    match state
        .service()
        .process_date_range(request.start_date, request.end_date, request.site_id.as_deref())
        .await
    {
        Ok(count) => (StatusCode::OK, Json(CountResponse { count })).into_response(),
        Err(err) => {
            warn!(error = %err, "range processing rejected");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /process-today. The body is optional.
async fn process_today_handler(
    State(state): State<AppState>,
    payload: Option<Json<ProcessTodayRequest>>,
) -> Response {
    let request = payload.map(|Json(r)| r).unwrap_or_default();
    let count = state.service().process_today(request.site_id.as_deref()).await;
    (StatusCode::OK, Json(CountResponse { count })).into_response()
}

/// Handler for POST /auto-process.
async fn auto_process_handler(State(state): State<AppState>) -> Response {
    let outcome = state.service().auto_process_if_needed().await;
    (StatusCode::OK, Json(outcome)).into_response()
}

/// Handler for GET /processing-log.
async fn processing_log_handler(
    State(state): State<AppState>,
    Query(query): Query<ProcessingLogQuery>,
) -> Response {
    let entries = state
        .service()
        .processing_log(query.start_date, query.end_date, query.site_id.as_deref())
        .await;
    (StatusCode::OK, Json(entries)).into_response()
}

/// Handler for GET /attendance-records.
async fn attendance_records_handler(
    State(state): State<AppState>,
    Query(query): Query<AttendanceQuery>,
) -> Response {
    match state
        .service()
        .attendance_records(query.start_date, query.end_date)
        .await
    {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for GET /employees/:employee_id/incidents.
async fn employee_history_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    match state.service().employee_history(&employee_id).await {
        Ok(incidents) => (StatusCode::OK, Json(incidents)).into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for POST /incidents.
///
/// Manual mutations surface expected failures as `{ success: false, error }`
/// bodies the dashboard can display.
async fn create_incident_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateIncidentRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match state.service().create_incident(request.into()).await {
        Ok(incident) => {
            info!(correlation_id = %correlation_id, id = %incident.id, "incident created manually");
            (StatusCode::OK, Json(MutationResponse::ok(Some(incident)))).into_response()
        }
        Err(err) => mutation_failure(err),
    }
}

/// Handler for PUT /incidents/:id.
async fn update_incident_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateIncidentRequest>,
) -> Response {
    match state.service().update_incident(id, request.into()).await {
        Ok(incident) => {
            (StatusCode::OK, Json(MutationResponse::ok(Some(incident)))).into_response()
        }
        Err(err) => mutation_failure(err),
    }
}

/// Handler for DELETE /incidents/:id.
async fn delete_incident_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Response {
    match state.service().delete_incident(id).await {
        Ok(()) => (StatusCode::OK, Json(MutationResponse::ok(None))).into_response(),
        Err(err) => mutation_failure(err),
    }
}

/// Converts an engine error into a mutation response with the matching
/// status code and a `{ success: false, error }` body.
fn mutation_failure(err: crate::error::EngineError) -> Response {
    warn!(error = %err, "manual incident mutation failed");
    let api_error = ApiErrorResponse::from(err);
    (
        api_error.status,
        Json(MutationResponse::failed(api_error.error.message)),
    )
        .into_response()
}

/// Shared JSON-body parsing with the detailed rejection mapping.
fn parse_json<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, Response> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => ApiError::new(
                    "MISSING_CONTENT_TYPE",
                    "Content-Type must be application/json",
                ),
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err((StatusCode::BAD_REQUEST, Json(error)).into_response())
        }
    }
}
