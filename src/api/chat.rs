//! Chat endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use tracing::error;

use crate::{services, state::AppState};
use super::{
    responses::{json_body, ApiError, ChatHistoryResponse, ChatRequest, ChatResponse, ErrorResponse, STATUS_SUCCESS},
    study::present,
};

/// Handle POST /api/chat/message - Reply to a chat message and record the exchange
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let request = json_body(body, "message is required")?;
    let message = request.message
        .ok_or_else(|| ErrorResponse::bad_request("message is required"))?;

    let response = services::reply(&message, present(request.context.as_deref()));

    match state.record_chat_exchange(message, response.to_string()) {
        Ok((question, answer)) => Ok(Json(ChatResponse {
            status: STATUS_SUCCESS.to_string(),
            response: response.to_string(),
            messages: vec![question, answer],
        })),
        Err(e) => {
            error!("Failed to record chat exchange: {}", e);
            Err(ErrorResponse::internal())
        }
    }
}

/// Handle GET /api/chat/history - Full conversation so far
pub async fn history_handler(State(state): State<Arc<AppState>>) -> Result<Json<ChatHistoryResponse>, ApiError> {
    match state.get_chat_history() {
        Ok(history) => Ok(Json(ChatHistoryResponse {
            status: STATUS_SUCCESS.to_string(),
            history,
        })),
        Err(e) => {
            error!("Failed to read chat history: {}", e);
            Err(ErrorResponse::internal())
        }
    }
}

/// Handle DELETE /api/chat/history - Start over from the welcome message
pub async fn clear_history_handler(State(state): State<Arc<AppState>>) -> Result<Json<ChatHistoryResponse>, ApiError> {
    match state.clear_chat_history() {
        Ok(history) => Ok(Json(ChatHistoryResponse {
            status: STATUS_SUCCESS.to_string(),
            history,
        })),
        Err(e) => {
            error!("Failed to clear chat history: {}", e);
            Err(ErrorResponse::internal())
        }
    }
}
