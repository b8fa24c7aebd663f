//! Study session over the due cards of one deck.
//!
//! The due set is captured when the session starts and shown one card at a
//! time. Callers persist each grade first and only then call
//! [`StudySession::record_answer`], so a failed write keeps the same card
//! current.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SessionError;
use crate::queue::due_cards;
use crate::types::Flashcard;

/// Where a session stands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionProgress {
    /// Zero-based index of the current card.
    pub position: usize,
    pub total: usize,
    pub studied: usize,
    pub percent: f64,
    pub complete: bool,
    /// Nothing was due when the session was assembled.
    pub caught_up: bool,
}

#[derive(Debug, Clone)]
pub struct StudySession {
    deck_id: Uuid,
    queue: Vec<Uuid>,
    position: usize,
    studied: HashSet<Uuid>,
    started_at: DateTime<Utc>,
}

impl StudySession {
    /// Start a session over whichever of `cards` are due at `now`.
    pub fn start(deck_id: Uuid, cards: &[Flashcard], now: DateTime<Utc>) -> Self {
        Self {
            deck_id,
            queue: Self::snapshot(cards, now),
            position: 0,
            studied: HashSet::new(),
            started_at: now,
        }
    }

    fn snapshot(cards: &[Flashcard], now: DateTime<Utc>) -> Vec<Uuid> {
        due_cards(cards, now).into_iter().map(|card| card.id).collect()
    }

    pub fn deck_id(&self) -> Uuid {
        self.deck_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Card waiting for an answer, if any.
    pub fn current(&self) -> Option<Uuid> {
        self.queue.get(self.position).copied()
    }

    pub fn is_complete(&self) -> bool {
        self.position >= self.queue.len()
    }

    /// Mark the current card as answered and move on.
    pub fn record_answer(&mut self, card_id: Uuid) -> Result<SessionProgress, SessionError> {
        match self.current() {
            None => Err(SessionError::Complete),
            Some(current) if current != card_id => Err(SessionError::NotCurrentCard { card_id }),
            Some(current) => {
                self.studied.insert(current);
                self.position += 1;
                Ok(self.progress())
            }
        }
    }

    /// Drop a card that has not been answered yet, for instance because it
    /// was deleted. Returns false if it is not waiting in the queue.
    pub fn discard(&mut self, card_id: Uuid) -> bool {
        let pending = self.queue.get(self.position..).unwrap_or_default();
        match pending.iter().position(|id| *id == card_id) {
            Some(offset) => {
                self.queue.remove(self.position + offset);
                true
            }
            None => false,
        }
    }

    /// Start over with a freshly evaluated due set.
    pub fn restart(&mut self, cards: &[Flashcard], now: DateTime<Utc>) {
        self.queue = Self::snapshot(cards, now);
        self.position = 0;
        self.studied.clear();
        self.started_at = now;
    }

    pub fn progress(&self) -> SessionProgress {
        let total = self.queue.len();
        let complete = self.is_complete();
        let percent = if complete {
            100.0
        } else {
            (self.position + 1) as f64 / total as f64 * 100.0
        };

        SessionProgress {
            position: self.position.min(total),
            total,
            studied: self.studied.len(),
            percent,
            complete,
            caught_up: total == 0,
        }
    }
}
