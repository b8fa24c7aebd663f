//! In-process store backing the [`CardStore`] trait.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::CardStore;
use crate::error::Result;
use crate::models::{Deck, Flashcard, SchedulingResult};

#[derive(Default)]
struct Tables {
    decks: Vec<Deck>,
    cards: Vec<Flashcard>,
}

/// Decks and cards held in memory, in insertion order.
#[derive(Default)]
pub struct MemoryDatabase {
    tables: RwLock<Tables>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CardStore for MemoryDatabase {
    async fn create_deck(&self, deck: Deck) -> Result<Deck> {
        self.tables.write().await.decks.push(deck.clone());
        Ok(deck)
    }

    async fn get_deck(&self, deck_id: Uuid) -> Result<Option<Deck>> {
        let tables = self.tables.read().await;
        Ok(tables.decks.iter().find(|d| d.id == deck_id).cloned())
    }

    async fn list_decks(&self) -> Result<Vec<Deck>> {
        let tables = self.tables.read().await;
        let mut decks = tables.decks.clone();
        // Stable sort keeps later inserts first among equal timestamps.
        decks.reverse();
        decks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(decks)
    }

    async fn delete_deck(&self, deck_id: Uuid) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.decks.len();
        tables.decks.retain(|d| d.id != deck_id);
        if tables.decks.len() == before {
            return Ok(false);
        }
        tables.cards.retain(|c| c.deck_id != deck_id);
        Ok(true)
    }

    async fn insert_card(&self, card: Flashcard) -> Result<Flashcard> {
        self.tables.write().await.cards.push(card.clone());
        Ok(card)
    }

    async fn get_card(&self, card_id: Uuid) -> Result<Option<Flashcard>> {
        let tables = self.tables.read().await;
        Ok(tables.cards.iter().find(|c| c.id == card_id).cloned())
    }

    async fn list_cards(&self, deck_id: Option<Uuid>) -> Result<Vec<Flashcard>> {
        let tables = self.tables.read().await;
        Ok(tables
            .cards
            .iter()
            .filter(|c| deck_id.map_or(true, |id| c.deck_id == id))
            .cloned()
            .collect())
    }

    async fn update_content(&self, card_id: Uuid, front: String, back: String) -> Result<Option<Flashcard>> {
        let mut tables = self.tables.write().await;
        Ok(tables.cards.iter_mut().find(|c| c.id == card_id).map(|card| {
            card.front = front;
            card.back = back;
            card.clone()
        }))
    }

    async fn update_schedule(&self, card_id: Uuid, result: &SchedulingResult) -> Result<Option<Flashcard>> {
        let mut tables = self.tables.write().await;
        Ok(tables.cards.iter_mut().find(|c| c.id == card_id).map(|card| {
            card.schedule.apply(result);
            card.clone()
        }))
    }

    async fn delete_card(&self, card_id: Uuid) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.cards.len();
        tables.cards.retain(|c| c.id != card_id);
        Ok(tables.cards.len() != before)
    }
}
