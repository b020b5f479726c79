//! API request and response structures

use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    services::{StudyPlan, StudyResource},
    state::{ChatMessage, ModeSwitch, StudySession, StudyStats, TimerSnapshot},
};

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

/// Error reply: a status code plus an error envelope
pub type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn reply(code: StatusCode, message: impl Into<String>) -> ApiError {
        (
            code,
            Json(Self {
                status: STATUS_ERROR.to_string(),
                message: message.into(),
            }),
        )
    }

    pub fn bad_request(message: impl Into<String>) -> ApiError {
        Self::reply(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> ApiError {
        Self::reply(StatusCode::NOT_FOUND, message)
    }

    pub fn internal() -> ApiError {
        Self::reply(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

/// Unwrap a JSON body, turning any extractor rejection into a 400 envelope
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>, message: &str) -> Result<T, ApiError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        debug!("Rejected request body: {}", rejection.body_text());
        ErrorResponse::bad_request(message)
    })
}

/// Response for timer control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
    /// Present when the action moved the timer to another interval
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub switch: Option<ModeSwitch>,
}

impl TimerResponse {
    pub fn new(message: String, timer: TimerSnapshot) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message,
            timestamp: Utc::now(),
            timer,
            switch: None,
        }
    }

    pub fn switched(message: String, timer: TimerSnapshot, switch: ModeSwitch) -> Self {
        Self {
            switch: Some(switch),
            ..Self::new(message, timer)
        }
    }
}

/// Timer status with server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub timer: TimerSnapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime: String,
}

impl HealthResponse {
    pub fn ok(uptime: String) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: "StudyBuddy API is running".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanRequest {
    pub subject: Option<String>,
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    pub status: String,
    pub plan: StudyPlan,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubjectQuery {
    pub subject: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcesResponse {
    pub status: String,
    pub resources: Vec<StudyResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
    /// Earlier conversation or topic the question refers to
    pub context: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub status: String,
    pub response: String,
    /// The recorded user message and reply
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatHistoryResponse {
    pub status: String,
    pub history: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSessionRequest {
    pub subject: Option<String>,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub status: String,
    pub session: StudySession,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionsResponse {
    pub status: String,
    pub sessions: Vec<StudySession>,
    /// Total minutes, only when filtered by subject
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_minutes: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubjectRequest {
    pub subject: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub status: String,
    pub stats: StudyStats,
    pub active_subject: Option<String>,
}
