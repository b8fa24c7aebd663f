//! Core study engine shared by the LingoDeck applications.
//!
//! Provides:
//! - SM-2 spaced repetition scheduling
//! - Due-set selection
//! - Study session driver
//! - Progress statistics
//! - Shared types (Flashcard, Deck, Schedule, Quality, etc.)

pub mod algorithm;
pub mod error;
pub mod queue;
pub mod session;
pub mod stats;
pub mod types;

pub use algorithm::{get_algorithm, sm2::Sm2, SpacedRepetitionAlgorithm};
pub use error::{Result, SchedulerError, SessionError};
pub use queue::{due_cards, is_due};
pub use session::{SessionProgress, StudySession};
pub use stats::{CardStats, DailyReviews, LearningStreak, STREAK_WINDOW_DAYS};
pub use types::{
    Deck, Difficulty, Flashcard, Quality, Rating, Schedule, SchedulingResult, DEFAULT_EASE_FACTOR,
};
