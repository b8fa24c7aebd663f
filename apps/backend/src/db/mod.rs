//! Deck and card persistence.
//!
//! Handlers only see the [`CardStore`] trait. Schedule writes go through
//! [`CardStore::update_schedule`], which must replace all scheduling fields
//! of a card in one step.

mod memory;

pub use memory::MemoryDatabase;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Deck, Flashcard, SchedulingResult};

#[async_trait]
pub trait CardStore: Send + Sync {
    // === Deck Repository ===

    async fn create_deck(&self, deck: Deck) -> Result<Deck>;

    async fn get_deck(&self, deck_id: Uuid) -> Result<Option<Deck>>;

    /// All decks, newest first.
    async fn list_decks(&self) -> Result<Vec<Deck>>;

    /// Delete a deck and every card in it. Returns false if it did not exist.
    async fn delete_deck(&self, deck_id: Uuid) -> Result<bool>;

    // === Card Repository ===

    async fn insert_card(&self, card: Flashcard) -> Result<Flashcard>;

    async fn get_card(&self, card_id: Uuid) -> Result<Option<Flashcard>>;

    /// Cards in creation order, optionally limited to one deck.
    async fn list_cards(&self, deck_id: Option<Uuid>) -> Result<Vec<Flashcard>>;

    /// Replace the text of a card. Scheduling state is untouched.
    async fn update_content(&self, card_id: Uuid, front: String, back: String) -> Result<Option<Flashcard>>;

    /// Write the outcome of a grading event.
    async fn update_schedule(&self, card_id: Uuid, result: &SchedulingResult) -> Result<Option<Flashcard>>;

    async fn delete_card(&self, card_id: Uuid) -> Result<bool>;
}
