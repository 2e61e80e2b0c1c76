//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{domain::Message, ui::state::AppState, usecase::IngestError};

/// Default number of entries returned by `GET /api/messages`.
const DEFAULT_HISTORY_LIMIT: i64 = 100;

/// One-shot message submission. Runs the same ingress pipeline as a
/// WebSocket frame; the created message comes back as the reply.
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<Message>, (StatusCode, Json<serde_json::Value>)> {
    match state.ingest_message_usecase.execute(&body).await {
        Ok(message) => Ok(Json(message)),
        Err(IngestError::Validation(e)) => Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": e.to_string() })),
        )),
        Err(IngestError::Store(e)) => {
            tracing::error!("failed to persist message: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "internal server error" })),
            ))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

/// Most recent messages, oldest first.
pub async fn get_messages(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<Message>>, StatusCode> {
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    match state.get_history_usecase.execute(limit).await {
        Ok(messages) => Ok(Json(messages)),
        Err(e) => {
            tracing::error!("failed to fetch message history: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Instance identity and local connection statistics.
pub async fn info(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "pid": state.instance_id,
        "connections": state.registry.count().await,
        "messages_seen": state.registry.messages_seen(),
    }))
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
