//! Statistics endpoints

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use chrono::Utc;

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// GET /api/stats
pub async fn overall(State(state): State<AppState>) -> Result<Json<OverallStatsResponse>> {
    let decks = state.db.list_decks().await?;
    let cards = state.db.list_cards(None).await?;
    let now = Utc::now();

    let mut by_category: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for deck in &decks {
        let stats = CardStats::collect(cards.iter().filter(|c| c.deck_id == deck.id), now);
        let entry = by_category.entry(deck.category.as_str()).or_default();
        entry.0 += stats.total_cards;
        entry.1 += stats.mastered_cards;
    }

    let categories = by_category
        .into_iter()
        .map(|(category, (total, mastered))| CategoryStats {
            category: category.to_string(),
            total,
            mastered,
        })
        .collect();

    Ok(Json(OverallStatsResponse {
        deck_count: decks.len(),
        cards: CardStats::collect(&cards, now),
        categories,
        streak: LearningStreak::collect(&cards, now),
    }))
}
