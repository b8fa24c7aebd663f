//! Test fixtures and factory functions for request bodies.

use serde_json::json;
use uuid::Uuid;

/// Create a deck request body with `num_cards` generated cards.
pub fn create_deck_request(name: &str, category: &str, num_cards: usize) -> serde_json::Value {
    let cards: Vec<serde_json::Value> = (0..num_cards)
        .map(|i| json!({ "front": format!("palabra {}", i + 1), "back": format!("word {}", i + 1) }))
        .collect();
    json!({
        "name": name,
        "description": "Test deck",
        "category": category,
        "target_language": "Spanish",
        "cards": cards,
    })
}

pub fn card_request(front: &str, back: &str) -> serde_json::Value {
    json!({ "front": front, "back": back })
}

/// Create a submit review request body with a numeric quality.
pub fn review_request(card_id: Uuid, quality: i32) -> serde_json::Value {
    json!({ "card_id": card_id, "quality": quality })
}

/// Create a submit review request body with a button name.
pub fn review_request_rating(card_id: Uuid, rating: &str) -> serde_json::Value {
    json!({ "card_id": card_id, "quality": rating })
}

pub fn start_session_request(deck_id: Uuid) -> serde_json::Value {
    json!({ "deck_id": deck_id })
}

pub fn answer_request(quality: i32) -> serde_json::Value {
    json!({ "quality": quality })
}

/// Answer body naming the card the grade is meant for.
pub fn answer_request_for(card_id: Uuid, quality: i32) -> serde_json::Value {
    json!({ "card_id": card_id, "quality": quality })
}
