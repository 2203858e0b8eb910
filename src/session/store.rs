//! Session Store
//!
//! One [`SelectionState`] per browser session. Events of a session are
//! serialized by the session's mutex; different sessions never contend
//! beyond the short map lookups.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use super::state::SelectionState;
use super::SessionError;
use crate::config::SessionConfig;

/// A live session
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub state: SelectionState,
    pub created_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    /// Owned by a live WebSocket connection; never swept as idle
    pub connection_owned: bool,
}

impl Session {
    fn new(connection_owned: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            state: SelectionState::default(),
            created_at: now,
            last_seen: now,
            connection_owned,
        }
    }

    /// Mark the session as used now
    pub fn touch(&mut self) {
        self.last_seen = Utc::now();
    }

    fn idle_for(&self, now: DateTime<Utc>) -> Duration {
        (now - self.last_seen).to_std().unwrap_or_default()
    }
}

/// Handle to one session, locked for the duration of an event
pub type SessionHandle = Arc<Mutex<Session>>;

/// All live sessions
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SessionHandle>>,
    config: SessionConfig,
}

impl SessionStore {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Open a new session in the initial state.
    ///
    /// At the cap, idle sessions are swept first; if none can be dropped the
    /// request is refused.
    pub async fn create(&self) -> Result<SessionHandle, SessionError> {
        self.open(false).await
    }

    /// Open a session that lives until its connection closes.
    ///
    /// The idle sweep skips it; the owner must [`remove`](Self::remove) it.
    pub async fn create_for_connection(&self) -> Result<SessionHandle, SessionError> {
        self.open(true).await
    }

    async fn open(&self, connection_owned: bool) -> Result<SessionHandle, SessionError> {
        if self.len().await >= self.config.max_sessions {
            let evicted = self.evict_idle().await;
            tracing::debug!(evicted, "Session cap reached, swept idle sessions");
        }

        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.config.max_sessions {
            tracing::warn!(limit = self.config.max_sessions, "Session limit reached");
            return Err(SessionError::TooManySessions(self.config.max_sessions));
        }

        let session = Session::new(connection_owned);
        let id = session.id;
        let handle = Arc::new(Mutex::new(session));
        sessions.insert(id, Arc::clone(&handle));

        tracing::info!(session_id = %id, connection_owned, "Session created");
        Ok(handle)
    }

    pub async fn get(&self, id: Uuid) -> Result<SessionHandle, SessionError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(SessionError::NotFound(id))
    }

    /// End a session. Returns whether it existed.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            tracing::info!(session_id = %id, "Session closed");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Drop sessions idle for longer than the configured timeout.
    ///
    /// Sessions currently processing an event are locked and therefore kept,
    /// as are sessions owned by an open connection.
    pub async fn evict_idle(&self) -> usize {
        let timeout = Duration::from_secs(self.config.idle_timeout_secs);
        let now = Utc::now();

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, handle| match handle.try_lock() {
            Ok(session) => session.connection_owned || session.idle_for(now) < timeout,
            Err(_) => true,
        });
        let evicted = before - sessions.len();

        if evicted > 0 {
            tracing::info!(evicted, remaining = sessions.len(), "Evicted idle sessions");
        }
        evicted
    }

    /// Spawn the periodic idle sweep.
    pub fn start_background_sweep(self: Arc<Self>) {
        let interval = Duration::from_secs(self.config.sweep_interval_secs.max(1));
        tracing::info!(
            interval_secs = interval.as_secs(),
            idle_timeout_secs = self.config.idle_timeout_secs,
            "Starting idle session sweep"
        );

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);

            // Skip the first immediate tick
            ticker.tick().await;

            loop {
                ticker.tick().await;
                self.evict_idle().await;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(max_sessions: usize, idle_timeout_secs: u64) -> SessionConfig {
        SessionConfig {
            max_sessions,
            idle_timeout_secs,
            sweep_interval_secs: 60,
        }
    }

    #[tokio::test]
    async fn test_create_get_remove() {
        let store = SessionStore::new(SessionConfig::default());
        let handle = store.create().await.unwrap();
        let id = handle.lock().await.id;

        assert_eq!(store.len().await, 1);
        let fetched = store.get(id).await.unwrap();
        assert!(Arc::ptr_eq(&handle, &fetched));

        assert!(store.remove(id).await);
        assert!(!store.remove(id).await);
        assert!(matches!(store.get(id).await, Err(SessionError::NotFound(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let store = SessionStore::new(SessionConfig::default());
        let a = store.create().await.unwrap();
        let b = store.create().await.unwrap();

        a.lock().await.state.select_country("Brazil");
        assert_eq!(b.lock().await.state, SelectionState::default());
    }

    #[tokio::test]
    async fn test_session_cap() {
        let store = SessionStore::new(config(2, 3600));
        store.create().await.unwrap();
        store.create().await.unwrap();

        let err = store.create().await.unwrap_err();
        assert!(matches!(err, SessionError::TooManySessions(2)));
    }

    #[tokio::test]
    async fn test_cap_sweeps_idle_sessions() {
        let store = SessionStore::new(config(1, 0));
        store.create().await.unwrap();

        // With a zero timeout every unlocked session counts as idle.
        assert!(store.create().await.is_ok());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_evict_keeps_busy_sessions() {
        let store = SessionStore::new(config(10, 0));
        let busy = store.create().await.unwrap();
        store.create().await.unwrap();

        let _guard = busy.lock().await;
        assert_eq!(store.evict_idle().await, 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_connection_sessions_survive_sweep() {
        let store = SessionStore::new(config(10, 0));
        let owned = store.create_for_connection().await.unwrap();
        store.create().await.unwrap();

        assert_eq!(store.evict_idle().await, 1);
        assert_eq!(store.len().await, 1);

        let id = owned.lock().await.id;
        assert!(store.get(id).await.is_ok());
        assert!(store.remove(id).await);
    }

    #[tokio::test]
    async fn test_cap_counts_connection_sessions() {
        let store = SessionStore::new(config(1, 0));
        store.create_for_connection().await.unwrap();

        let err = store.create().await.unwrap_err();
        assert!(matches!(err, SessionError::TooManySessions(1)));
    }

    #[tokio::test]
    async fn test_recent_sessions_survive_sweep() {
        let store = SessionStore::new(config(10, 3600));
        let handle = store.create().await.unwrap();
        handle.lock().await.touch();

        assert_eq!(store.evict_idle().await, 0);
        assert_eq!(store.len().await, 1);
    }
}
