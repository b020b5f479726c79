//! HTTP API module
//! 
//! This module contains all HTTP endpoint handlers and response structures.

pub mod chat;
pub mod handlers;
pub mod responses;
pub mod study;

use std::sync::Arc;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use chat::*;
use handlers::*;
use study::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        // Pomodoro timer
        .route("/api/timer", get(timer_status_handler))
        .route("/api/timer/toggle", post(toggle_handler))
        .route("/api/timer/reset", post(reset_handler))
        .route("/api/timer/skip", post(skip_handler))
        // Study helpers
        .route("/api/study/plan", post(plan_handler))
        .route("/api/study/resources", get(resources_handler))
        .route("/api/study/sessions", get(list_sessions_handler).post(add_session_handler))
        .route("/api/study/sessions/:id", delete(remove_session_handler))
        .route("/api/study/stats", get(stats_handler))
        .route("/api/study/subject", put(subject_handler))
        // Study assistant
        .route("/api/chat/message", post(chat_handler))
        .route("/api/chat/history", get(history_handler).delete(clear_history_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::state::TimerConfig;

    fn app() -> (Arc<AppState>, Router) {
        let state = Arc::new(AppState::new(5000, "127.0.0.1".to_string(), TimerConfig::default()));
        (Arc::clone(&state), create_router(state))
    }

    async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = router.clone().oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn health_reports_success() {
        let (_, router) = app();
        let (status, body) = send(&router, Method::GET, "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["message"], "StudyBuddy API is running");
    }

    #[tokio::test]
    async fn timer_starts_in_study_mode() {
        let (_, router) = app();
        let (status, body) = send(&router, Method::GET, "/api/timer", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timer"]["phase"], "study");
        assert_eq!(body["timer"]["countdown"], "25:00");
        assert_eq!(body["timer"]["is_running"], false);
        assert_eq!(body["port"], 5000);
    }

    #[tokio::test]
    async fn toggle_reset_and_skip() {
        let (state, router) = app();

        let (_, body) = send(&router, Method::POST, "/api/timer/toggle", None).await;
        assert_eq!(body["timer"]["is_running"], true);
        assert_eq!(body["message"], "Timer started");

        state.tick_timer().unwrap();
        let (_, body) = send(&router, Method::POST, "/api/timer/reset", None).await;
        assert_eq!(body["timer"]["is_running"], false);
        assert_eq!(body["timer"]["time_left_seconds"], 1500);

        let (_, body) = send(&router, Method::POST, "/api/timer/skip", None).await;
        assert_eq!(body["timer"]["phase"], "short_break");
        assert_eq!(body["timer"]["completed_intervals"], 1);
        assert_eq!(body["switch"]["completed"], false);
        assert_eq!(body["switch"]["to"], "short_break");

        let (_, body) = send(&router, Method::GET, "/api/timer", None).await;
        assert_eq!(body["last_action"], "skip");
    }

    #[tokio::test]
    async fn plan_requires_subject() {
        let (_, router) = app();
        let (status, body) = send(&router, Method::POST, "/api/study/plan", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");

        let (status, body) = send(
            &router,
            Method::POST,
            "/api/study/plan",
            Some(json!({ "subject": "Physics" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["plan"]["duration"], "1 hour");
        assert_eq!(body["plan"]["sections"][0]["topic"], "Introduction to Physics");
    }

    #[tokio::test]
    async fn resources_require_subject() {
        let (_, router) = app();
        let (status, _) = send(&router, Method::GET, "/api/study/resources", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&router, Method::GET, "/api/study/resources?subject=Data%20Science", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resources"][0]["type"], "article");
        assert_eq!(body["resources"][0]["url"], "https://example.com/data-science-intro");
    }

    #[tokio::test]
    async fn chat_replies_by_keyword() {
        let (_, router) = app();
        let (status, _) = send(&router, Method::POST, "/api/chat/message", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &router,
            Method::POST,
            "/api/chat/message",
            Some(json!({ "message": "Help me make a schedule" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "lets make a schedule. how many hours a week u tryna study?");
        assert_eq!(body["messages"][0]["sender"], "user");
        assert_eq!(body["messages"][1]["sender"], "bot");
    }

    #[tokio::test]
    async fn chat_uses_context_when_message_has_no_keyword() {
        let (_, router) = app();
        let (_, body) = send(
            &router,
            Method::POST,
            "/api/chat/message",
            Some(json!({ "message": "any tips?", "context": "feeling tired" })),
        )
        .await;
        assert!(body["response"].as_str().unwrap().starts_with("Taking breaks is important!"));
    }

    #[tokio::test]
    async fn chat_history_grows_and_clears() {
        let (_, router) = app();
        let (_, body) = send(&router, Method::GET, "/api/chat/history", None).await;
        assert_eq!(body["history"].as_array().unwrap().len(), 1);
        assert_eq!(body["history"][0]["sender"], "bot");
        assert!(body["history"][0]["text"].as_str().unwrap().starts_with("Hi there!"));

        send(&router, Method::POST, "/api/chat/message", Some(json!({ "message": "hello" }))).await;
        let (_, body) = send(&router, Method::GET, "/api/chat/history", None).await;
        let senders: Vec<&str> = body["history"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["sender"].as_str().unwrap())
            .collect();
        assert_eq!(senders, vec!["bot", "user", "bot"]);

        let (status, body) = send(&router, Method::DELETE, "/api/chat/history", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["history"].as_array().unwrap().len(), 1);
        assert!(body["history"][0]["text"].as_str().unwrap().starts_with("Hi there!"));
    }

    #[tokio::test]
    async fn malformed_bodies_get_error_envelope() {
        let (_, router) = app();
        let cases = [
            ("/api/study/plan", Value::Null, "Missing required fields"),
            ("/api/chat/message", Value::Null, "message is required"),
            ("/api/chat/message", json!({ "message": 5 }), "message is required"),
        ];

        for (uri, payload, message) in cases {
            let (status, body) = send(&router, Method::POST, uri, Some(payload)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(body["status"], "error");
            assert_eq!(body["message"], message);
        }

        let (status, body) = send(
            &router,
            Method::POST,
            "/api/study/sessions",
            Some(json!({ "duration_minutes": "long" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn session_lifecycle() {
        let (_, router) = app();

        let (_, body) = send(&router, Method::PUT, "/api/study/subject", Some(json!({ "subject": "Math" }))).await;
        assert_eq!(body["active_subject"], "Math");

        let (status, body) = send(
            &router,
            Method::POST,
            "/api/study/sessions",
            Some(json!({ "duration_minutes": 25 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["session"]["subject"], "Math");
        let id = body["session"]["id"].as_u64().unwrap();

        let (_, body) = send(&router, Method::GET, "/api/study/sessions?subject=Math", None).await;
        assert_eq!(body["sessions"].as_array().unwrap().len(), 1);
        assert_eq!(body["total_minutes"], 25);

        let (_, body) = send(&router, Method::GET, "/api/study/stats", None).await;
        assert_eq!(body["stats"]["sessions_completed"], 1);
        assert_eq!(body["stats"]["streak"], 1);

        let uri = format!("/api/study/sessions/{}", id);
        let (status, body) = send(&router, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["sessions"].as_array().unwrap().is_empty());

        let (status, _) = send(&router, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
