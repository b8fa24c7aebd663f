//! Progress counters over a set of cards.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::queue::is_due;
use crate::types::{Difficulty, Flashcard};

/// Card counts for a deck or a whole collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardStats {
    pub total_cards: usize,
    pub due_cards: usize,
    pub new_cards: usize,
    pub learning_cards: usize,
    pub review_cards: usize,
    pub mastered_cards: usize,
    pub reviewed_today: usize,
    /// Percentage of cards labelled mastered.
    pub mastery_rate: f64,
}

impl CardStats {
    /// Count cards as of `now`. "Today" is the UTC calendar date of `now`.
    pub fn collect<'a, I>(cards: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = &'a Flashcard>,
    {
        let today = now.date_naive();
        let mut stats = Self::default();

        for card in cards {
            stats.total_cards += 1;
            if is_due(&card.schedule, now) {
                stats.due_cards += 1;
            }
            match card.schedule.difficulty {
                Difficulty::New => stats.new_cards += 1,
                Difficulty::Learning => stats.learning_cards += 1,
                Difficulty::Review => stats.review_cards += 1,
                Difficulty::Mastered => stats.mastered_cards += 1,
            }
            if card
                .schedule
                .last_reviewed
                .is_some_and(|reviewed| reviewed.date_naive() == today)
            {
                stats.reviewed_today += 1;
            }
        }

        if stats.total_cards > 0 {
            stats.mastery_rate = stats.mastered_cards as f64 / stats.total_cards as f64 * 100.0;
        }
        stats
    }
}

/// Number of days, today included, covered by [`LearningStreak`].
pub const STREAK_WINDOW_DAYS: u64 = 7;

/// Cards whose last review fell on `date` (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyReviews {
    pub date: NaiveDate,
    pub reviewed: usize,
}

/// Review activity over the last week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningStreak {
    /// Consecutive days with at least one review, counting back from today.
    /// Zero when nothing was reviewed today.
    pub streak_days: usize,
    /// Oldest day first, ending with today.
    pub days: Vec<DailyReviews>,
}

impl LearningStreak {
    pub fn collect<'a, I>(cards: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = &'a Flashcard>,
    {
        let today = now.date_naive();
        let reviewed: Vec<NaiveDate> = cards
            .into_iter()
            .filter_map(|card| card.schedule.last_reviewed)
            .map(|at| at.date_naive())
            .collect();

        let days: Vec<DailyReviews> = (0..STREAK_WINDOW_DAYS)
            .rev()
            .filter_map(|back| today.checked_sub_days(Days::new(back)))
            .map(|date| DailyReviews {
                date,
                reviewed: reviewed.iter().filter(|day| **day == date).count(),
            })
            .collect();

        let streak_days = days.iter().rev().take_while(|day| day.reviewed > 0).count();
        Self { streak_days, days }
    }
}
