//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext wiring the router to an in-memory store
//! - Helpers for seeding decks and cards with a given schedule

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use lingodeck_backend::db::{CardStore, MemoryDatabase};
use lingodeck_backend::models::{Deck, Flashcard};
use lingodeck_backend::{router, AppState};
use lingodeck_core::Schedule;

/// Test context holding the store and the router built on top of it.
pub struct TestContext {
    pub db: Arc<MemoryDatabase>,
    app: Router,
}

impl TestContext {
    pub fn new() -> Self {
        let db = Arc::new(MemoryDatabase::new());
        let state = AppState::new(db.clone());
        Self {
            db,
            app: router(state),
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }

    /// Insert a deck directly into the store.
    pub async fn seed_deck(&self, name: &str, category: &str) -> Deck {
        let mut deck = Deck::new(name, Utc::now());
        deck.category = category.to_string();
        self.db.create_deck(deck).await.unwrap()
    }

    /// Insert a card with an explicit schedule.
    pub async fn seed_card(&self, deck_id: Uuid, front: &str, schedule: Schedule) -> Flashcard {
        let mut card = Flashcard::new(deck_id, front, format!("{front} (back)"), Utc::now());
        card.schedule = schedule;
        self.db.insert_card(card).await.unwrap()
    }

    pub async fn card(&self, card_id: Uuid) -> Flashcard {
        self.db.get_card(card_id).await.unwrap().expect("card exists")
    }
}

/// Schedule that is not due until `next`.
pub fn scheduled(ease_factor: f64, interval: u32, repetitions: u32, next: DateTime<Utc>) -> Schedule {
    Schedule {
        ease_factor,
        interval,
        repetitions,
        next_review_date: Some(next),
        ..Schedule::default()
    }
}
