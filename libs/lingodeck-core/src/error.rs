//! Error types for lingodeck-core.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias using SchedulerError.
pub type Result<T> = std::result::Result<T, SchedulerError>;

/// Errors raised before a grading event reaches the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    #[error("invalid quality {value}: expected a rating between 0 and 5")]
    InvalidQuality { value: i32 },
}

/// Errors from driving a study session out of order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("card {card_id} is not the current card of this session")]
    NotCurrentCard { card_id: Uuid },

    #[error("session is already complete")]
    Complete,
}
