//! Spaced repetition algorithm implementations.

pub mod sm2;

use crate::types::{Quality, Schedule, SchedulingResult};
use chrono::{DateTime, Utc};

/// Trait for spaced repetition algorithms.
pub trait SpacedRepetitionAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Calculate the next scheduling state after a grading event at `now`.
    fn schedule(&self, state: &Schedule, quality: Quality, now: DateTime<Utc>) -> SchedulingResult;

    /// Initial state for a new card.
    fn initial_state(&self) -> Schedule;
}

/// Get algorithm by name.
pub fn get_algorithm(name: &str) -> Option<Box<dyn SpacedRepetitionAlgorithm>> {
    match name {
        "sm2" => Some(Box::new(sm2::Sm2::default())),
        _ => None,
    }
}
