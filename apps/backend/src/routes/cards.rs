//! Card endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::decks::find_deck;
use crate::AppState;

/// GET /api/decks/:id/cards
pub async fn list(State(state): State<AppState>, Path(deck_id): Path<Uuid>) -> Result<Json<CardListResponse>> {
    find_deck(&state, deck_id).await?;
    let cards = state.db.list_cards(Some(deck_id)).await?;
    Ok(Json(CardListResponse { cards }))
}

/// POST /api/decks/:id/cards
pub async fn create(
    State(state): State<AppState>,
    Path(deck_id): Path<Uuid>,
    Json(content): Json<CardContent>,
) -> Result<(StatusCode, Json<Flashcard>)> {
    find_deck(&state, deck_id).await?;
    if content.is_blank() {
        return Err(ApiError::BadRequest("Card front and back are required".to_string()));
    }

    let card = Flashcard::new(deck_id, content.front, content.back, Utc::now());
    let card = state.db.insert_card(card).await?;
    Ok((StatusCode::CREATED, Json(card)))
}

/// PUT /api/cards/:id
pub async fn update(
    State(state): State<AppState>,
    Path(card_id): Path<Uuid>,
    Json(content): Json<CardContent>,
) -> Result<Json<Flashcard>> {
    if content.is_blank() {
        return Err(ApiError::BadRequest("Card front and back are required".to_string()));
    }

    state
        .db
        .update_content(card_id, content.front, content.back)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Card {card_id}")))
}

/// DELETE /api/cards/:id
pub async fn delete(State(state): State<AppState>, Path(card_id): Path<Uuid>) -> Result<StatusCode> {
    if !state.db.delete_card(card_id).await? {
        return Err(ApiError::NotFound(format!("Card {card_id}")));
    }
    Ok(StatusCode::NO_CONTENT)
}
