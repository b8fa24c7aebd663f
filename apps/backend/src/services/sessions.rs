//! Study sessions kept in memory for the lifetime of the server.
//!
//! Each session sits behind its own lock, held from reading the current card
//! until the grade is stored and the session has advanced. Sessions left idle
//! longer than the registry's time to live are dropped.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use lingodeck_core::{SessionError, SpacedRepetitionAlgorithm, StudySession};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use uuid::Uuid;

use crate::db::CardStore;
use crate::error::{ApiError, Result};
use crate::models::{AnswerResponse, Flashcard, Quality, SessionResponse};
use crate::services::review::grade_card;

pub const DEFAULT_SESSION_TTL_MINUTES: u32 = 120;

struct Slot {
    session: StudySession,
    touched_at: DateTime<Utc>,
}

impl Slot {
    fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.touched_at) > ttl
    }
}

pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Arc<Mutex<Slot>>>>,
    ttl: Duration,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::with_ttl(Duration::minutes(i64::from(DEFAULT_SESSION_TTL_MINUTES)))
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Open a session over the cards of `deck_id` due at `now`.
    pub async fn start(&self, store: &dyn CardStore, deck_id: Uuid, now: DateTime<Utc>) -> Result<SessionResponse> {
        ensure_deck(store, deck_id).await?;
        let cards = store.list_cards(Some(deck_id)).await?;
        let mut session = StudySession::start(deck_id, &cards, now);
        let session_id = Uuid::new_v4();

        tracing::info!(
            session_id = %session_id,
            deck_id = %deck_id,
            due = session.progress().total,
            "started study session"
        );

        let response = describe(store, session_id, &mut session).await?;
        self.evict_idle(now).await;
        self.sessions.write().await.insert(
            session_id,
            Arc::new(Mutex::new(Slot {
                session,
                touched_at: now,
            })),
        );
        Ok(response)
    }

    pub async fn get(&self, store: &dyn CardStore, session_id: Uuid, now: DateTime<Utc>) -> Result<SessionResponse> {
        let mut slot = self.checkout(session_id, now).await?;
        describe(store, session_id, &mut slot.session).await
    }

    /// Grade the current card, then advance.
    ///
    /// The session only moves on once the grade has been stored. When
    /// `card_id` is given and another card is current, nothing is graded.
    pub async fn answer(
        &self,
        store: &dyn CardStore,
        algorithm: &dyn SpacedRepetitionAlgorithm,
        session_id: Uuid,
        card_id: Option<Uuid>,
        quality: Quality,
        now: DateTime<Utc>,
    ) -> Result<AnswerResponse> {
        let mut slot = self.checkout(session_id, now).await?;

        let current = settle(store, &mut slot.session)
            .await?
            .ok_or(SessionError::Complete)?
            .id;
        if let Some(card_id) = card_id.filter(|id| *id != current) {
            return Err(SessionError::NotCurrentCard { card_id }.into());
        }

        let graded = grade_card(store, algorithm, current, quality, now).await?;
        slot.session.record_answer(current)?;

        Ok(AnswerResponse {
            graded,
            session: describe(store, session_id, &mut slot.session).await?,
        })
    }

    /// Rebuild the queue from the cards due now.
    pub async fn restart(&self, store: &dyn CardStore, session_id: Uuid, now: DateTime<Utc>) -> Result<SessionResponse> {
        let mut slot = self.checkout(session_id, now).await?;
        let cards = store.list_cards(Some(slot.session.deck_id())).await?;
        slot.session.restart(&cards, now);

        tracing::info!(session_id = %session_id, due = slot.session.progress().total, "restarted study session");
        describe(store, session_id, &mut slot.session).await
    }

    pub async fn remove(&self, session_id: Uuid) -> Result<()> {
        self.sessions
            .write()
            .await
            .remove(&session_id)
            .map(|_| ())
            .ok_or_else(|| session_not_found(session_id))
    }

    /// Lock a live session and mark it as used at `now`.
    async fn checkout(&self, session_id: Uuid, now: DateTime<Utc>) -> Result<OwnedMutexGuard<Slot>> {
        let slot = self
            .sessions
            .read()
            .await
            .get(&session_id)
            .cloned()
            .ok_or_else(|| session_not_found(session_id))?;

        let mut slot = slot.lock_owned().await;
        if slot.is_expired(now, self.ttl) {
            drop(slot);
            self.sessions.write().await.remove(&session_id);
            tracing::info!(session_id = %session_id, "study session expired");
            return Err(session_not_found(session_id));
        }
        slot.touched_at = now;
        Ok(slot)
    }

    /// Drop idle sessions. Sessions busy with a request are kept.
    async fn evict_idle(&self, now: DateTime<Utc>) {
        let ttl = self.ttl;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, slot| match slot.try_lock() {
            Ok(slot) => !slot.is_expired(now, ttl),
            Err(_) => true,
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, "evicted idle study sessions");
        }
    }
}

async fn ensure_deck(store: &dyn CardStore, deck_id: Uuid) -> Result<()> {
    store
        .get_deck(deck_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| ApiError::NotFound(format!("Deck {deck_id}")))
}

/// Load the current card, dropping queued cards that no longer exist.
async fn settle(store: &dyn CardStore, session: &mut StudySession) -> Result<Option<Flashcard>> {
    while let Some(card_id) = session.current() {
        match store.get_card(card_id).await? {
            Some(card) => return Ok(Some(card)),
            None => {
                tracing::debug!(card_id = %card_id, "skipping card deleted during session");
                session.discard(card_id);
            }
        }
    }
    Ok(None)
}

async fn describe(store: &dyn CardStore, session_id: Uuid, session: &mut StudySession) -> Result<SessionResponse> {
    let current_card = settle(store, session).await?;

    Ok(SessionResponse {
        session_id,
        deck_id: session.deck_id(),
        current_card,
        progress: session.progress(),
    })
}

fn session_not_found(session_id: Uuid) -> ApiError {
    ApiError::NotFound(format!("Session {session_id}"))
}
