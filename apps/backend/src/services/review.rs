//! Grading a single card.

use chrono::{DateTime, Utc};
use lingodeck_core::SpacedRepetitionAlgorithm;
use uuid::Uuid;

use crate::db::CardStore;
use crate::error::{ApiError, Result};
use crate::models::{Flashcard, Quality};

/// Compute the next schedule for `card_id` and persist it.
///
/// If the write fails the error is returned and the stored card keeps its
/// previous schedule, so it stays due.
pub async fn grade_card(
    store: &dyn CardStore,
    algorithm: &dyn SpacedRepetitionAlgorithm,
    card_id: Uuid,
    quality: Quality,
    now: DateTime<Utc>,
) -> Result<Flashcard> {
    let card = store
        .get_card(card_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Card {card_id}")))?;

    let result = algorithm.schedule(&card.schedule, quality, now);

    tracing::info!(
        card_id = %card_id,
        quality = quality.value(),
        interval_before = card.schedule.interval,
        interval_after = result.interval,
        ease_before = card.schedule.ease_factor,
        ease_after = result.ease_factor,
        difficulty = result.difficulty.as_str(),
        "graded card"
    );

    store
        .update_schedule(card_id, &result)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Card {card_id}")))
}
