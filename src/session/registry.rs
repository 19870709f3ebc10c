//! Session registry keyed by an external session key (a chat, a table).
//!
//! The registry is an ordinary value owned by the caller; there is no
//! global state. Each session sits behind its own mutex so commands for one
//! session run one at a time while different sessions proceed in parallel.

use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

use super::game::GameSession;
use super::status::SessionStatus;
use crate::core::SessionConfig;

/// Registry lookup failures.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    #[error("a game is already running here")]
    SessionExists,

    #[error("no game is running here")]
    NoSession,
}

/// Shared handle to one session.
pub type SessionHandle = Arc<Mutex<GameSession>>;

/// Map from session key to an independently locked session.
#[derive(Debug)]
pub struct SessionRegistry<K> {
    config: SessionConfig,
    sessions: Mutex<FxHashMap<K, SessionHandle>>,
}

impl<K: Eq + Hash + Clone + std::fmt::Debug> Default for SessionRegistry<K> {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl<K: Eq + Hash + Clone + std::fmt::Debug> SessionRegistry<K> {
    /// Registry creating sessions with `config`.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            sessions: Mutex::new(FxHashMap::default()),
        }
    }

    // Commands commit only on success, so a poisoned map is still whole.
    fn map(&self) -> MutexGuard<'_, FxHashMap<K, SessionHandle>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open a new session under `key`.
    ///
    /// A finished game under the same key is replaced. The registry lock is
    /// never held while waiting on a session, and a session that is busy
    /// with a command counts as unfinished.
    ///
    /// # Errors
    ///
    /// `SessionExists` if an unfinished game already uses `key`.
    pub fn create(&self, key: K) -> Result<SessionHandle, RegistryError> {
        loop {
            let Some(existing) = self.get(&key) else {
                let mut map = self.map();
                if map.contains_key(&key) {
                    continue;
                }
                return Ok(self.open(&mut map, key));
            };

            let finished = match existing.try_lock() {
                Ok(session) => session.status() == SessionStatus::GameOver,
                Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner().status() == SessionStatus::GameOver,
                Err(TryLockError::WouldBlock) => false,
            };
            if !finished {
                return Err(RegistryError::SessionExists);
            }

            // Replace only if the finished game is still the one registered
            let mut map = self.map();
            if map.get(&key).is_some_and(|current| Arc::ptr_eq(current, &existing)) {
                return Ok(self.open(&mut map, key));
            }
        }
    }

    fn open(&self, map: &mut FxHashMap<K, SessionHandle>, key: K) -> SessionHandle {
        debug!(session = ?key, "session created");
        let handle = Arc::new(Mutex::new(GameSession::with_config(self.config.clone())));
        map.insert(key, Arc::clone(&handle));
        handle
    }

    /// Insert an existing session, e.g. one restored from storage.
    pub fn insert(&self, key: K, session: GameSession) -> Option<SessionHandle> {
        self.map().insert(key, Arc::new(Mutex::new(session)))
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<SessionHandle> {
        self.map().get(key).cloned()
    }

    pub fn remove(&self, key: &K) -> Option<SessionHandle> {
        let removed = self.map().remove(key);
        if removed.is_some() {
            debug!(session = ?key, "session removed");
        }
        removed
    }

    /// Run `f` with exclusive access to the session under `key`.
    ///
    /// The registry lock is released before `f` runs, so a slow command
    /// only blocks its own session.
    ///
    /// # Errors
    ///
    /// `NoSession` if nothing is registered under `key`.
    pub fn with_session<R>(&self, key: &K, f: impl FnOnce(&mut GameSession) -> R) -> Result<R, RegistryError> {
        let handle = self.get(key).ok_or(RegistryError::NoSession)?;
        let mut session = lock(&handle);
        Ok(f(&mut session))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map().is_empty()
    }
}

/// Lock one session, recovering from poisoning.
pub fn lock(handle: &SessionHandle) -> MutexGuard<'_, GameSession> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}
