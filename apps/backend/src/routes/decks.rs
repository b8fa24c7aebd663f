//! Deck endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/decks
pub async fn list(State(state): State<AppState>) -> Result<Json<DeckListResponse>> {
    let decks = state.db.list_decks().await?;
    let cards = state.db.list_cards(None).await?;
    let now = Utc::now();

    let decks = decks
        .into_iter()
        .map(|deck| {
            let stats = CardStats::collect(cards.iter().filter(|c| c.deck_id == deck.id), now);
            DeckSummary {
                deck,
                card_count: stats.total_cards,
                due_count: stats.due_cards,
                mastered_count: stats.mastered_cards,
            }
        })
        .collect();

    Ok(Json(DeckListResponse { decks }))
}

/// POST /api/decks
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateDeckRequest>,
) -> Result<(StatusCode, Json<DeckResponse>)> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Deck name is required".to_string()));
    }

    let now = Utc::now();
    let mut deck = Deck::new(name, now);
    deck.description = request.description;
    deck.target_language = request.target_language;
    if let Some(category) = request.category.filter(|c| !c.trim().is_empty()) {
        deck.category = category;
    }
    let deck = state.db.create_deck(deck).await?;

    let mut cards = Vec::new();
    for content in request.cards.into_iter().filter(|c| !c.is_blank()) {
        let card = Flashcard::new(deck.id, content.front, content.back, now);
        cards.push(state.db.insert_card(card).await?);
    }

    tracing::info!(deck_id = %deck.id, cards = cards.len(), "created deck");
    Ok((StatusCode::CREATED, Json(DeckResponse { deck, cards })))
}

/// GET /api/decks/:id
pub async fn get(State(state): State<AppState>, Path(deck_id): Path<Uuid>) -> Result<Json<DeckResponse>> {
    let deck = find_deck(&state, deck_id).await?;
    let cards = state.db.list_cards(Some(deck_id)).await?;
    Ok(Json(DeckResponse { deck, cards }))
}

/// DELETE /api/decks/:id
pub async fn delete(State(state): State<AppState>, Path(deck_id): Path<Uuid>) -> Result<StatusCode> {
    if !state.db.delete_deck(deck_id).await? {
        return Err(ApiError::NotFound(format!("Deck {deck_id}")));
    }
    tracing::info!(deck_id = %deck_id, "deleted deck and its cards");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/decks/:id/stats
pub async fn stats(State(state): State<AppState>, Path(deck_id): Path<Uuid>) -> Result<Json<DeckStatsResponse>> {
    find_deck(&state, deck_id).await?;
    let cards = state.db.list_cards(Some(deck_id)).await?;
    Ok(Json(DeckStatsResponse {
        deck_id,
        stats: CardStats::collect(&cards, Utc::now()),
    }))
}

pub(crate) async fn find_deck(state: &AppState, deck_id: Uuid) -> Result<Deck> {
    state
        .db
        .get_deck(deck_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Deck {deck_id}")))
}
