//! SM-2 spaced repetition algorithm.
//!
//! Based on SuperMemo 2. A pass (quality >= 3) grows the interval
//! 1 day, 6 days, then `round(interval * ease)`; a failure restarts the
//! streak at the first interval without touching the ease factor.

use super::SpacedRepetitionAlgorithm;
use crate::types::{Difficulty, Quality, Schedule, SchedulingResult, DEFAULT_EASE_FACTOR};
use chrono::{DateTime, Duration, Utc};

/// SM-2 algorithm with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    pub first_interval: u32,
    pub second_interval: u32,
    /// Repetitions needed before a card is labelled `review`.
    pub review_repetitions: u32,
    /// Repetitions and interval (days) both needed for `mastered`.
    pub mastery_repetitions: u32,
    pub mastery_interval: u32,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: DEFAULT_EASE_FACTOR,
            minimum_ease: 1.3,
            first_interval: 1,
            second_interval: 6,
            review_repetitions: 3,
            mastery_repetitions: 5,
            mastery_interval: 21,
        }
    }
}

impl SpacedRepetitionAlgorithm for Sm2 {
    fn name(&self) -> &'static str {
        "sm2"
    }

    fn initial_state(&self) -> Schedule {
        Schedule {
            ease_factor: self.initial_ease,
            ..Schedule::default()
        }
    }

    fn schedule(&self, state: &Schedule, quality: Quality, now: DateTime<Utc>) -> SchedulingResult {
        let (interval, repetitions, ease_factor, difficulty) = if quality.is_pass() {
            self.schedule_pass(state, quality)
        } else {
            self.schedule_fail(state)
        };

        SchedulingResult {
            ease_factor,
            interval,
            repetitions,
            difficulty,
            next_review_date: add_days(now, interval),
            last_reviewed: now,
        }
    }
}

impl Sm2 {
    fn schedule_pass(&self, state: &Schedule, quality: Quality) -> (u32, u32, f64, Difficulty) {
        let interval = match state.repetitions {
            0 => self.first_interval,
            1 => self.second_interval,
            // Uses the ease factor from before this review.
            _ => ((state.interval as f64 * state.ease_factor).round() as u32).max(1),
        };
        let repetitions = state.repetitions.saturating_add(1);
        let ease_factor = self.next_ease(state.ease_factor, quality);

        (interval, repetitions, ease_factor, self.classify(repetitions, interval))
    }

    fn schedule_fail(&self, state: &Schedule) -> (u32, u32, f64, Difficulty) {
        (self.first_interval, 0, state.ease_factor, Difficulty::Learning)
    }

    /// EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)), floored at the minimum.
    pub fn next_ease(&self, ease_factor: f64, quality: Quality) -> f64 {
        let miss = (Quality::MAX - quality.value()) as f64;
        (ease_factor + (0.1 - miss * (0.08 + miss * 0.02))).max(self.minimum_ease)
    }

    /// Label for a card that has just passed.
    pub fn classify(&self, repetitions: u32, interval: u32) -> Difficulty {
        if repetitions >= self.mastery_repetitions && interval >= self.mastery_interval {
            Difficulty::Mastered
        } else if repetitions >= self.review_repetitions {
            Difficulty::Review
        } else {
            Difficulty::Learning
        }
    }
}

fn add_days(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    now.checked_add_signed(Duration::days(days as i64))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 9, 30, 0).unwrap()
    }

    fn q(value: i32) -> Quality {
        Quality::new(value).unwrap()
    }

    fn state(ease_factor: f64, interval: u32, repetitions: u32) -> Schedule {
        Schedule {
            ease_factor,
            interval,
            repetitions,
            ..Default::default()
        }
    }

    #[test]
    fn first_good_on_fresh_card() {
        let sm2 = Sm2::default();
        let result = sm2.schedule(&state(2.5, 1, 0), q(4), now());
        assert_eq!(
            result,
            SchedulingResult {
                ease_factor: 2.5,
                interval: 1,
                repetitions: 1,
                difficulty: Difficulty::Learning,
                next_review_date: now() + Duration::days(1),
                last_reviewed: now(),
            }
        );
    }

    #[test]
    fn second_good_gets_six_days() {
        let sm2 = Sm2::default();
        let result = sm2.schedule(&state(2.5, 1, 1), q(4), now());
        assert_eq!(result.interval, 6);
        assert_eq!(result.repetitions, 2);
        assert_eq!(result.difficulty, Difficulty::Learning);
        assert_eq!(result.next_review_date, now() + Duration::days(6));
    }

    #[test]
    fn later_pass_multiplies_previous_interval_by_previous_ease() {
        let sm2 = Sm2::default();
        // Hard lowers the ease, but the interval uses the ease from before.
        let result = sm2.schedule(&state(2.5, 6, 2), q(3), now());
        assert_eq!(result.interval, 15);
        assert_eq!(result.repetitions, 3);
        assert_eq!(result.difficulty, Difficulty::Review);
        assert!(result.ease_factor < 2.5);
    }

    #[test]
    fn interval_rounds_half_up() {
        let sm2 = Sm2::default();
        // 2 * 2.25 = 4.5
        let result = sm2.schedule(&state(2.25, 2, 3), q(4), now());
        assert_eq!(result.interval, 5);
        // 3 * 1.3 = 3.9
        let result = sm2.schedule(&state(1.3, 3, 3), q(4), now());
        assert_eq!(result.interval, 4);
    }

    #[test]
    fn easy_on_long_streak_reaches_mastered() {
        let sm2 = Sm2::default();
        let result = sm2.schedule(&state(2.5, 20, 4), q(5), now());
        assert_eq!(result.interval, 50);
        assert_eq!(result.repetitions, 5);
        assert!(result.ease_factor > 2.5);
        assert_eq!(result.difficulty, Difficulty::Mastered);
        assert_eq!(result.next_review_date, now() + Duration::days(50));
    }

    #[test]
    fn many_repetitions_with_short_interval_is_review() {
        let sm2 = Sm2::default();
        // 5 repetitions but only 13 days: not yet mastered.
        let result = sm2.schedule(&state(1.3, 10, 4), q(4), now());
        assert_eq!(result.interval, 13);
        assert_eq!(result.repetitions, 5);
        assert_eq!(result.difficulty, Difficulty::Review);
    }

    #[test]
    fn again_on_mastered_card_resets_streak() {
        let sm2 = Sm2::default();
        let mastered = Schedule {
            difficulty: Difficulty::Mastered,
            ..state(2.7, 50, 5)
        };
        let result = sm2.schedule(&mastered, q(0), now());
        assert_eq!(result.repetitions, 0);
        assert_eq!(result.interval, 1);
        assert_eq!(result.difficulty, Difficulty::Learning);
        assert_eq!(result.ease_factor, 2.7);
        assert_eq!(result.next_review_date, now() + Duration::days(1));
        assert_eq!(result.last_reviewed, now());
    }

    #[test]
    fn every_failing_quality_resets_without_touching_ease() {
        let sm2 = Sm2::default();
        for value in 0..3 {
            let result = sm2.schedule(&state(1.9, 12, 3), q(value), now());
            assert_eq!(result.repetitions, 0);
            assert_eq!(result.interval, 1);
            assert_eq!(result.difficulty, Difficulty::Learning);
            assert_eq!(result.ease_factor, 1.9);
        }
    }

    #[test]
    fn failure_restarts_at_first_interval() {
        let sm2 = Sm2 {
            first_interval: 2,
            ..Sm2::default()
        };
        let result = sm2.schedule(&state(2.1, 30, 6), q(1), now());
        assert_eq!(result.interval, 2);
        assert_eq!(result.repetitions, 0);
        assert_eq!(result.next_review_date, now() + Duration::days(2));
    }

    #[test]
    fn ease_never_below_minimum_on_pass() {
        let sm2 = Sm2::default();
        for ease in [1.3, 1.35, 1.5, 2.5] {
            for value in 3..=5 {
                let result = sm2.schedule(&state(ease, 10, 2), q(value), now());
                assert!(result.ease_factor >= sm2.minimum_ease);
            }
        }
        let result = sm2.schedule(&state(1.3, 10, 2), q(3), now());
        assert_eq!(result.ease_factor, 1.3);
    }

    #[test]
    fn ease_deltas_per_quality() {
        let sm2 = Sm2::default();
        assert_eq!(sm2.next_ease(2.5, q(4)), 2.5);
        assert!((sm2.next_ease(2.5, q(5)) - 2.6).abs() < 1e-9);
        assert!((sm2.next_ease(2.5, q(3)) - 2.36).abs() < 1e-9);
    }

    #[test]
    fn interval_is_positive_after_any_transition() {
        let sm2 = Sm2::default();
        // A malformed zero interval with an established streak.
        let result = sm2.schedule(&state(2.5, 0, 4), q(5), now());
        assert_eq!(result.interval, 1);
        for value in 0..=5 {
            for reps in 0..6 {
                let result = sm2.schedule(&state(1.3, 0, reps), q(value), now());
                assert!(result.interval >= 1);
            }
        }
    }

    #[test]
    fn transition_is_deterministic() {
        let sm2 = Sm2::default();
        let input = state(2.1, 9, 3);
        assert_eq!(sm2.schedule(&input, q(4), now()), sm2.schedule(&input, q(4), now()));
    }

    #[test]
    fn full_streak_from_new_card() {
        let sm2 = Sm2::default();
        let mut schedule = sm2.initial_state();
        let mut intervals = Vec::new();
        for _ in 0..5 {
            let result = sm2.schedule(&schedule, q(4), now());
            schedule.apply(&result);
            intervals.push(schedule.interval);
        }
        // 6 * 2.5 = 15, 15 * 2.5 = 37.5 -> 38, 38 * 2.5 = 95
        assert_eq!(intervals, vec![1, 6, 15, 38, 95]);
        assert_eq!(schedule.difficulty, Difficulty::Mastered);
    }

    #[test]
    fn huge_interval_saturates_due_date() {
        let sm2 = Sm2::default();
        let result = sm2.schedule(&state(2.5, u32::MAX / 2, 3), q(5), now());
        assert_eq!(result.interval, u32::MAX);
        assert_eq!(result.next_review_date, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn initial_state_uses_configured_ease() {
        let sm2 = Sm2 {
            initial_ease: 2.0,
            ..Sm2::default()
        };
        let schedule = sm2.initial_state();
        assert_eq!(schedule.ease_factor, 2.0);
        assert_eq!(schedule.repetitions, 0);
        assert!(schedule.next_review_date.is_none());
    }
}
