use axum::{Json, extract::State};
use uuid::Uuid;

use crate::error::AppError;
use crate::message::{ChatRequest, ChatResponse};
use crate::services::metrics_manager::MetricsData;
use crate::state::SharedState;

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let trimmed = payload.message.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty".to_string()));
    }

    // Echo a caller-supplied session id, mint one otherwise. No session
    // state is kept server-side.
    let session_id = match &payload.session_id {
        Some(s) if !s.trim().is_empty() => s.clone(),
        _ => Uuid::new_v4().to_string(),
    };

    let answer = state.engine.answer(trimmed).await;

    Ok(Json(ChatResponse {
        session_id,
        reply: answer.reply,
        intent: answer.intent.label().to_string(),
    }))
}

pub async fn get_metrics_handler(State(state): State<SharedState>) -> Json<MetricsData> {
    Json(state.engine.metrics().get_metrics().await)
}
