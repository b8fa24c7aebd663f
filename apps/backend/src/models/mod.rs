//! API request and response types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export shared types from lingodeck-core
pub use lingodeck_core::{
    CardStats, Deck, Difficulty, Flashcard, LearningStreak, Quality, Rating, SchedulingResult,
    SessionProgress,
};

use crate::error::Result;

/// A grade as sent by a client: either the raw 0-5 score or a button name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GradeInput {
    Score(i32),
    Rating(Rating),
}

impl GradeInput {
    /// Validate into a quality. Scores outside 0-5 are rejected.
    pub fn quality(self) -> Result<Quality> {
        match self {
            GradeInput::Score(value) => Ok(Quality::new(value)?),
            GradeInput::Rating(rating) => Ok(rating.quality()),
        }
    }
}

// Deck types
#[derive(Debug, Serialize, Deserialize)]
pub struct CardContent {
    pub front: String,
    pub back: String,
}

impl CardContent {
    pub fn is_blank(&self) -> bool {
        self.front.trim().is_empty() || self.back.trim().is_empty()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateDeckRequest {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub target_language: Option<String>,
    #[serde(default)]
    pub cards: Vec<CardContent>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeckResponse {
    #[serde(flatten)]
    pub deck: Deck,
    pub cards: Vec<Flashcard>,
}

/// Deck with counts for the deck list
#[derive(Debug, Serialize, Deserialize)]
pub struct DeckSummary {
    #[serde(flatten)]
    pub deck: Deck,
    pub card_count: usize,
    pub due_count: usize,
    pub mastered_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeckListResponse {
    pub decks: Vec<DeckSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeckStatsResponse {
    pub deck_id: Uuid,
    #[serde(flatten)]
    pub stats: CardStats,
}

// Card types
#[derive(Debug, Serialize, Deserialize)]
pub struct CardListResponse {
    pub cards: Vec<Flashcard>,
}

// Study types
#[derive(Debug, Serialize, Deserialize)]
pub struct DueCardsResponse {
    pub deck_id: Uuid,
    pub cards: Vec<Flashcard>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitReviewRequest {
    pub card_id: Uuid,
    pub quality: GradeInput,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitReviewResponse {
    pub card: Flashcard,
}

// Session types
#[derive(Debug, Serialize, Deserialize)]
pub struct StartSessionRequest {
    pub deck_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub quality: GradeInput,
    /// Card the grade is meant for. When set, the answer is refused unless
    /// it is still the current card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub deck_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_card: Option<Flashcard>,
    pub progress: SessionProgress,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResponse {
    /// The card as persisted after grading.
    pub graded: Flashcard,
    #[serde(flatten)]
    pub session: SessionResponse,
}

// Stats types
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: String,
    pub total: usize,
    pub mastered: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OverallStatsResponse {
    pub deck_count: usize,
    #[serde(flatten)]
    pub cards: CardStats,
    pub categories: Vec<CategoryStats>,
    pub streak: LearningStreak,
}
