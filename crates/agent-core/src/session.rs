//! Per-user session storage.
//!
//! Sessions are keyed by a stable user identifier (e.g., phone number) and
//! hold an ordered, append-only sequence of turns. The in-memory
//! implementation bounds the number of tracked users with LRU eviction so
//! messages from many unique senders cannot exhaust memory; turns within a
//! live session are never truncated, since tool turns must keep the
//! tool-call turns they reference.

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::turn::Turn;

/// Default maximum number of users to track before LRU eviction.
const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Storage abstraction for per-user conversation sessions.
///
/// The orchestrator stays agnostic to backing storage; an in-memory map,
/// an external cache, or a durable store all satisfy this interface.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Ensure a session exists for `key`, seeding `seed` as its only turn
    /// when newly created. Returns true if the session was created.
    async fn get_or_create(&self, key: &str, seed: Turn) -> bool;

    /// Append a turn to the session for `key`.
    async fn append(&self, key: &str, turn: Turn);

    /// Snapshot the ordered turn history for `key` (empty if unknown).
    async fn history(&self, key: &str) -> Vec<Turn>;

    /// Number of sessions currently tracked.
    async fn session_count(&self) -> usize;
}

#[async_trait]
impl<T: SessionStore + ?Sized> SessionStore for std::sync::Arc<T> {
    async fn get_or_create(&self, key: &str, seed: Turn) -> bool {
        (**self).get_or_create(key, seed).await
    }

    async fn append(&self, key: &str, turn: Turn) {
        (**self).append(key, turn).await
    }

    async fn history(&self, key: &str) -> Vec<Turn> {
        (**self).history(key).await
    }

    async fn session_count(&self) -> usize {
        (**self).session_count().await
    }
}

/// In-memory session store with LRU eviction of least-recently-active users.
#[derive(Debug)]
pub struct InMemorySessionStore {
    /// Map from user key to turn history. IndexMap keeps insertion order,
    /// which doubles as the LRU order: touched sessions move to the end.
    sessions: RwLock<IndexMap<String, Vec<Turn>>>,
    max_sessions: usize,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SESSIONS)
    }
}

impl InMemorySessionStore {
    /// Create a store tracking at most `max_sessions` users.
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(IndexMap::new()),
            max_sessions: max_sessions.max(1),
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, key: &str, seed: Turn) -> bool {
        let mut sessions = self.sessions.write().await;

        // Move to end to mark as recently used
        if let Some(existing) = sessions.shift_remove(key) {
            sessions.insert(key.to_string(), existing);
            return false;
        }

        sessions.insert(key.to_string(), vec![seed]);

        while sessions.len() > self.max_sessions {
            // shift_remove_index(0) drops the least recently used session
            sessions.shift_remove_index(0);
        }

        true
    }

    async fn append(&self, key: &str, turn: Turn) {
        let mut sessions = self.sessions.write().await;
        sessions.entry(key.to_string()).or_default().push(turn);
    }

    async fn history(&self, key: &str) -> Vec<Turn> {
        let sessions = self.sessions.read().await;
        sessions.get(key).cloned().unwrap_or_default()
    }

    async fn session_count(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_seeds_single_system_turn() {
        let store = InMemorySessionStore::default();

        let created = store.get_or_create("+1234", Turn::system("prompt")).await;
        assert!(created);

        let history = store.history("+1234").await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].role, "system");
    }

    #[tokio::test]
    async fn test_get_or_create_is_idempotent() {
        let store = InMemorySessionStore::default();

        store.get_or_create("+1234", Turn::system("prompt")).await;
        store.append("+1234", Turn::user("Hello")).await;
        let created = store.get_or_create("+1234", Turn::system("prompt")).await;

        assert!(!created);
        let history = store.history("+1234").await;
        assert_eq!(history.len(), 2);
    }

    #[tokio::test]
    async fn test_append_preserves_order() {
        let store = InMemorySessionStore::default();

        store.get_or_create("+1234", Turn::system("prompt")).await;
        store.append("+1234", Turn::user("First")).await;
        store.append("+1234", Turn::assistant("Second")).await;

        let history = store.history("+1234").await;
        let roles: Vec<&str> = history.iter().map(|t| t.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "user", "assistant"]);
    }

    #[tokio::test]
    async fn test_separate_users_do_not_share_turns() {
        let store = InMemorySessionStore::default();

        store.get_or_create("+1111", Turn::system("prompt")).await;
        store.get_or_create("+2222", Turn::system("prompt")).await;
        store.append("+1111", Turn::user("Hello A")).await;

        assert_eq!(store.history("+1111").await.len(), 2);
        assert_eq!(store.history("+2222").await.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_key_yields_empty_history() {
        let store = InMemorySessionStore::default();
        assert!(store.history("+9999").await.is_empty());
    }

    #[tokio::test]
    async fn test_lru_eviction() {
        let store = InMemorySessionStore::new(3);

        for key in ["+1111", "+2222", "+3333", "+4444"] {
            store.get_or_create(key, Turn::system("prompt")).await;
        }

        assert_eq!(store.session_count().await, 3);
        assert!(store.history("+1111").await.is_empty());
        assert!(!store.history("+4444").await.is_empty());
    }

    #[tokio::test]
    async fn test_lru_touch_on_get_or_create() {
        let store = InMemorySessionStore::new(3);

        store.get_or_create("+1111", Turn::system("prompt")).await;
        store.get_or_create("+2222", Turn::system("prompt")).await;
        store.get_or_create("+3333", Turn::system("prompt")).await;

        // Touch +1111 so +2222 becomes the eviction candidate
        store.get_or_create("+1111", Turn::system("prompt")).await;
        store.get_or_create("+4444", Turn::system("prompt")).await;

        assert!(store.history("+2222").await.is_empty());
        assert!(!store.history("+1111").await.is_empty());
    }
}
