//! Study session endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// POST /api/sessions
pub async fn start(
    State(state): State<AppState>,
    Json(request): Json<StartSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>)> {
    let session = state
        .sessions
        .start(state.db.as_ref(), request.deck_id, Utc::now())
        .await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /api/sessions/:id
pub async fn get(State(state): State<AppState>, Path(session_id): Path<Uuid>) -> Result<Json<SessionResponse>> {
    Ok(Json(
        state
            .sessions
            .get(state.db.as_ref(), session_id, Utc::now())
            .await?,
    ))
}

/// POST /api/sessions/:id/answer
pub async fn answer(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>> {
    let quality = request.quality.quality()?;
    let response = state
        .sessions
        .answer(
            state.db.as_ref(),
            state.algorithm.as_ref(),
            session_id,
            request.card_id,
            quality,
            Utc::now(),
        )
        .await?;
    Ok(Json(response))
}

/// POST /api/sessions/:id/restart
pub async fn restart(State(state): State<AppState>, Path(session_id): Path<Uuid>) -> Result<Json<SessionResponse>> {
    Ok(Json(
        state
            .sessions
            .restart(state.db.as_ref(), session_id, Utc::now())
            .await?,
    ))
}

/// DELETE /api/sessions/:id
pub async fn end(State(state): State<AppState>, Path(session_id): Path<Uuid>) -> Result<StatusCode> {
    state.sessions.remove(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
