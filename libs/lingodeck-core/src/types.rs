//! Core types for the flashcard study engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, SchedulerError};

/// Default ease factor for a card with no review history.
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Card difficulty label, derived from repetitions and interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    New,
    Learning,
    Review,
    Mastered,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::New
    }
}

impl Difficulty {
    /// Get the label as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Learning => "learning",
            Self::Review => "review",
            Self::Mastered => "mastered",
        }
    }
}

/// Reviewer's recall rating on the 0-5 scale.
///
/// Anything below 3 counts as a failed recall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Quality(u8);

impl Quality {
    /// Lowest passing quality.
    pub const PASS_THRESHOLD: u8 = 3;
    pub const MAX: u8 = 5;

    /// Validate a raw rating. Values outside 0..=5 are rejected.
    pub fn new(value: i32) -> Result<Self> {
        if (0..=Self::MAX as i32).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(SchedulerError::InvalidQuality { value })
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_pass(self) -> bool {
        self.0 >= Self::PASS_THRESHOLD
    }
}

impl TryFrom<i32> for Quality {
    type Error = SchedulerError;

    fn try_from(value: i32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Quality> for i32 {
    fn from(quality: Quality) -> Self {
        quality.0 as i32
    }
}

/// The four answer buttons shown after a card is flipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Again,
    Hard,
    Good,
    Easy,
}

impl Rating {
    /// Quality value submitted for this button.
    pub fn quality(self) -> Quality {
        match self {
            Self::Again => Quality(0),
            Self::Hard => Quality(3),
            Self::Good => Quality(4),
            Self::Easy => Quality(5),
        }
    }
}

impl From<Rating> for Quality {
    fn from(rating: Rating) -> Self {
        rating.quality()
    }
}

/// Scheduling state of a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub ease_factor: f64,
    pub interval: u32,
    pub repetitions: u32,
    pub difficulty: Difficulty,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<DateTime<Utc>>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            ease_factor: DEFAULT_EASE_FACTOR,
            interval: 0,
            repetitions: 0,
            difficulty: Difficulty::New,
            next_review_date: None,
            last_reviewed: None,
        }
    }
}

impl Schedule {
    /// Replace every scheduling field with the outcome of a grading event.
    pub fn apply(&mut self, result: &SchedulingResult) {
        self.ease_factor = result.ease_factor;
        self.interval = result.interval;
        self.repetitions = result.repetitions;
        self.difficulty = result.difficulty;
        self.next_review_date = Some(result.next_review_date);
        self.last_reviewed = Some(result.last_reviewed);
    }
}

/// Full set of fields written back after a card is graded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingResult {
    pub ease_factor: f64,
    pub interval: u32,
    pub repetitions: u32,
    pub difficulty: Difficulty,
    pub next_review_date: DateTime<Utc>,
    pub last_reviewed: DateTime<Utc>,
}

/// A flashcard belonging to a deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: Uuid,
    pub deck_id: Uuid,
    pub front: String,
    pub back: String,
    #[serde(flatten)]
    pub schedule: Schedule,
    pub created_at: DateTime<Utc>,
}

impl Flashcard {
    /// Create a card with no review history.
    pub fn new(deck_id: Uuid, front: impl Into<String>, back: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            deck_id,
            front: front.into(),
            back: back.into(),
            schedule: Schedule::default(),
            created_at: now,
        }
    }
}

/// A study deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Deck {
    pub const DEFAULT_CATEGORY: &'static str = "other";

    /// Create a deck in the default category.
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            category: Self::DEFAULT_CATEGORY.to_string(),
            target_language: None,
            created_at: now,
        }
    }
}
