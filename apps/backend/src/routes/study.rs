//! Study endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use lingodeck_core::due_cards;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;
use crate::routes::decks::find_deck;
use crate::services::review::grade_card;
use crate::AppState;

/// GET /api/decks/:id/due
pub async fn due(State(state): State<AppState>, Path(deck_id): Path<Uuid>) -> Result<Json<DueCardsResponse>> {
    find_deck(&state, deck_id).await?;
    let cards = state.db.list_cards(Some(deck_id)).await?;
    let due = due_cards(&cards, Utc::now()).into_iter().cloned().collect();
    Ok(Json(DueCardsResponse { deck_id, cards: due }))
}

/// POST /api/study/review
pub async fn review(
    State(state): State<AppState>,
    Json(payload): Json<SubmitReviewRequest>,
) -> Result<Json<SubmitReviewResponse>> {
    let quality = payload.quality.quality()?;
    let card = grade_card(
        state.db.as_ref(),
        state.algorithm.as_ref(),
        payload.card_id,
        quality,
        Utc::now(),
    )
    .await?;

    Ok(Json(SubmitReviewResponse { card }))
}
