pub mod cards;
pub mod decks;
pub mod sessions;
pub mod stats;
pub mod study;
