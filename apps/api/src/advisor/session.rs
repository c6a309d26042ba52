//! Per-session conversation history for the hospice chat.
//!
//! Each session owns a bounded queue of its most recent turns; pushing past capacity drops
//! the oldest turn. The store holds a bounded number of sessions and drops the one whose
//! last turn is oldest when a new session would exceed it.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

/// Turns kept per session.
pub const HISTORY_CAPACITY: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Turn {
    pub question: String,
    pub answer: String,
    pub asked_at: DateTime<Utc>,
}

/// Fixed-capacity FIFO of conversation turns.
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    turns: VecDeque<Turn>,
    capacity: usize,
}

impl ConversationHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a turn, evicting the oldest when full.
    pub fn push(&mut self, turn: Turn) {
        if self.capacity == 0 {
            return;
        }
        while self.turns.len() >= self.capacity {
            self.turns.pop_front();
        }
        self.turns.push_back(turn);
    }

    /// Oldest first.
    pub fn turns(&self) -> Vec<Turn> {
        self.turns.iter().cloned().collect()
    }
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

/// Sessions kept in memory before the least recently active one is evicted.
pub const MAX_SESSIONS: usize = 1_000;

#[derive(Debug, Default)]
struct SessionEntry {
    history: ConversationHistory,
    /// Store-wide tick of the last recorded turn.
    last_active: u64,
}

#[derive(Debug)]
struct Sessions {
    entries: HashMap<Uuid, SessionEntry>,
    max_sessions: usize,
    tick: u64,
}

impl Sessions {
    fn evict_least_recent(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_active)
            .map(|(id, _)| *id);
        if let Some(id) = oldest {
            self.entries.remove(&id);
            debug!("Evicted hospice session {id}");
        }
    }
}

/// In-memory session map shared across handlers, capped at `max_sessions`.
/// The lock is never held across an await.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<Sessions>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_max_sessions(MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn with_max_sessions(max_sessions: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Sessions {
                entries: HashMap::new(),
                max_sessions: max_sessions.max(1),
                tick: 0,
            })),
        }
    }

    /// History for `id`, or `None` if the session is unknown or was evicted.
    pub fn history(&self, id: Uuid) -> Option<Vec<Turn>> {
        let sessions = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        sessions.entries.get(&id).map(|entry| entry.history.turns())
    }

    /// Records a completed turn and returns the session's history after the push.
    pub fn record(&self, id: Uuid, turn: Turn) -> Vec<Turn> {
        let mut sessions = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if !sessions.entries.contains_key(&id) && sessions.entries.len() >= sessions.max_sessions {
            sessions.evict_least_recent();
        }

        sessions.tick += 1;
        let tick = sessions.tick;
        let entry = sessions.entries.entry(id).or_default();
        entry.last_active = tick;
        entry.history.push(turn);
        entry.history.turns()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(q: &str) -> Turn {
        Turn {
            question: q.to_string(),
            answer: format!("answer to {q}"),
            asked_at: Utc::now(),
        }
    }

    #[test]
    fn test_history_evicts_oldest() {
        let mut history = ConversationHistory::default();
        for q in ["一", "二", "三", "四"] {
            history.push(turn(q));
        }
        assert_eq!(history.turns().len(), HISTORY_CAPACITY);
        let questions: Vec<String> = history.turns().into_iter().map(|t| t.question).collect();
        assert_eq!(questions, vec!["二", "三", "四"]);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut history = ConversationHistory::with_capacity(0);
        history.push(turn("一"));
        assert!(history.turns().is_empty());
    }

    #[test]
    fn test_store_sessions_are_independent() {
        let store = SessionStore::default();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        store.record(a, turn("a1"));
        store.record(a, turn("a2"));
        let b_history = store.record(b, turn("b1"));

        assert_eq!(b_history.len(), 1);
        assert_eq!(store.history(a).unwrap().len(), 2);
        assert!(store.history(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_store_evicts_least_recently_active_session() {
        let store = SessionStore::with_max_sessions(2);
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();

        store.record(a, turn("a1"));
        store.record(b, turn("b1"));
        // a is now the most recently active
        store.record(a, turn("a2"));
        store.record(c, turn("c1"));

        assert_eq!(store.len(), 2);
        assert!(store.history(b).is_none());
        assert_eq!(store.history(a).unwrap().len(), 2);
        assert_eq!(store.history(c).unwrap().len(), 1);
    }

    #[test]
    fn test_store_never_exceeds_cap() {
        let store = SessionStore::with_max_sessions(5);
        for i in 0..50 {
            store.record(Uuid::new_v4(), turn(&format!("q{i}")));
        }
        assert_eq!(store.len(), 5);
    }
}
