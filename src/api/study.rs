//! Study helper endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::Json,
};
use tracing::{error, info};

use crate::{services, state::AppState};
use super::responses::{
    json_body, ApiError, NewSessionRequest, PlanRequest, PlanResponse, ResourcesResponse,
    SessionResponse, SessionsResponse, StatsResponse, SubjectQuery, SubjectRequest,
    ErrorResponse, STATUS_SUCCESS,
};

/// Trimmed, non-empty value of an optional text field
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Handle POST /api/study/plan - Build a study plan for a subject
pub async fn plan_handler(body: Result<Json<PlanRequest>, JsonRejection>) -> Result<Json<PlanResponse>, ApiError> {
    let request = json_body(body, "Missing required fields")?;
    let subject = present(request.subject.as_deref())
        .ok_or_else(|| ErrorResponse::bad_request("Missing required fields"))?;

    info!("Generating study plan for {}", subject);
    Ok(Json(PlanResponse {
        status: STATUS_SUCCESS.to_string(),
        plan: services::generate_plan(subject, request.duration.as_deref()),
    }))
}

/// Handle GET /api/study/resources - Recommend resources for a subject
pub async fn resources_handler(Query(query): Query<SubjectQuery>) -> Result<Json<ResourcesResponse>, ApiError> {
    let subject = present(query.subject.as_deref())
        .ok_or_else(|| ErrorResponse::bad_request("Subject parameter is required"))?;

    Ok(Json(ResourcesResponse {
        status: STATUS_SUCCESS.to_string(),
        resources: services::find_resources(subject),
    }))
}

/// Handle GET /api/study/sessions - List recorded sessions
pub async fn list_sessions_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SubjectQuery>,
) -> Result<Json<SessionsResponse>, ApiError> {
    let subject = present(query.subject.as_deref());

    let result = state.get_study_sessions(subject).and_then(|sessions| {
        let total_minutes = subject.map(|s| state.get_total_minutes_for(s)).transpose()?;
        Ok((sessions, total_minutes))
    });

    match result {
        Ok((sessions, total_minutes)) => Ok(Json(SessionsResponse {
            status: STATUS_SUCCESS.to_string(),
            sessions,
            total_minutes,
        })),
        Err(e) => {
            error!("Failed to read study sessions: {}", e);
            Err(ErrorResponse::internal())
        }
    }
}

/// Handle POST /api/study/sessions - Record a session by hand
pub async fn add_session_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewSessionRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>, ApiError> {
    let request = json_body(body, "A numeric duration_minutes is required")?;
    let subject = present(request.subject.as_deref()).map(str::to_string);

    match state.record_study_session(subject, request.duration_minutes) {
        Ok(session) => Ok(Json(SessionResponse {
            status: STATUS_SUCCESS.to_string(),
            session,
        })),
        Err(e) => {
            error!("Failed to record study session: {}", e);
            Err(ErrorResponse::internal())
        }
    }
}

/// Handle DELETE /api/study/sessions/:id - Remove a session
pub async fn remove_session_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<SessionsResponse>, ApiError> {
    match state.remove_study_session(id) {
        Ok(true) => {}
        Ok(false) => return Err(ErrorResponse::not_found(format!("No study session with id {}", id))),
        Err(e) => {
            error!("Failed to remove study session: {}", e);
            return Err(ErrorResponse::internal());
        }
    }

    let sessions = state.get_study_sessions(None).map_err(|e| {
        error!("Failed to read study sessions: {}", e);
        ErrorResponse::internal()
    })?;

    Ok(Json(SessionsResponse {
        status: STATUS_SUCCESS.to_string(),
        sessions,
        total_minutes: None,
    }))
}

/// Handle GET /api/study/stats - Aggregate study statistics
pub async fn stats_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatsResponse>, ApiError> {
    match state.get_study_stats() {
        Ok((stats, active_subject)) => Ok(Json(StatsResponse {
            status: STATUS_SUCCESS.to_string(),
            stats,
            active_subject,
        })),
        Err(e) => {
            error!("Failed to read study stats: {}", e);
            Err(ErrorResponse::internal())
        }
    }
}

/// Handle PUT /api/study/subject - Set or clear the active subject
pub async fn subject_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SubjectRequest>, JsonRejection>,
) -> Result<Json<StatsResponse>, ApiError> {
    let request = json_body(body, "Expected a JSON object with an optional subject")?;
    let result = state
        .set_active_subject(request.subject)
        .and_then(|_| state.get_study_stats());

    match result {
        Ok((stats, active_subject)) => Ok(Json(StatsResponse {
            status: STATUS_SUCCESS.to_string(),
            stats,
            active_subject,
        })),
        Err(e) => {
            error!("Failed to set active subject: {}", e);
            Err(ErrorResponse::internal())
        }
    }
}
