//! In-memory session store

use crate::error::{BotError, Result};
use crate::game::GameSession;
use crate::session::RestartTimer;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockWriteGuard};

/// A user's session and its pending restart, if any
#[derive(Debug)]
pub struct SessionEntry {
    /// Game state
    pub session: GameSession,
    timer: Option<RestartTimer>,
}

impl SessionEntry {
    fn new(session: GameSession) -> Self {
        Self {
            session,
            timer: None,
        }
    }

    /// Id of the pending restart timer
    pub fn timer_id(&self) -> Option<u64> {
        self.timer.as_ref().map(RestartTimer::id)
    }

    fn cancel_timer(&mut self) -> bool {
        match self.timer.take() {
            Some(timer) => {
                timer.cancel();
                true
            }
            None => false,
        }
    }
}

/// Process-wide map from user id to session
///
/// Cloning the store yields another handle to the same map.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionEntry>>>,
    next_timer_id: Arc<AtomicU64>,
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the store for a read-modify-write sequence
    ///
    /// Never hold the guard across an `.await`.
    pub fn write(&self) -> Result<SessionsGuard<'_>> {
        let sessions = self
            .sessions
            .write()
            .map_err(|e| BotError::SessionStore(format!("Lock error: {e}")))?;
        Ok(SessionsGuard { sessions })
    }

    /// Snapshot of a user's session
    pub fn get(&self, user_id: &str) -> Option<GameSession> {
        self.sessions
            .read()
            .ok()?
            .get(user_id)
            .map(|entry| entry.session.clone())
    }

    /// Number of users with a session
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .map(|sessions| sessions.len())
            .unwrap_or_default()
    }

    /// Whether no user has a session
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Allocate an id for a new restart timer
    pub fn next_timer_id(&self) -> u64 {
        self.next_timer_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Drop every session and cancel every pending timer
    pub fn clear(&self) -> Result<usize> {
        let mut guard = self.write()?;
        let count = guard.sessions.len();
        for (_, mut entry) in guard.sessions.drain() {
            entry.cancel_timer();
        }
        Ok(count)
    }
}

/// Exclusive access to the session map
///
/// Every operation that replaces or deletes a session cancels the timer
/// that belonged to it first.
pub struct SessionsGuard<'a> {
    sessions: RwLockWriteGuard<'a, HashMap<String, SessionEntry>>,
}

impl SessionsGuard<'_> {
    /// Current session for a user
    pub fn get(&self, user_id: &str) -> Option<&GameSession> {
        self.sessions.get(user_id).map(|entry| &entry.session)
    }

    /// Id of the user's pending restart timer
    pub fn timer_id(&self, user_id: &str) -> Option<u64> {
        self.sessions.get(user_id).and_then(SessionEntry::timer_id)
    }

    /// Create or replace a user's session
    pub fn start(&mut self, user_id: &str, session: GameSession) {
        if let Some(mut previous) = self
            .sessions
            .insert(user_id.to_string(), SessionEntry::new(session))
        {
            previous.cancel_timer();
        }
    }

    /// Replace the game state of an existing session, keeping its timer
    ///
    /// Returns `false` if the user has no session.
    pub fn update(&mut self, user_id: &str, session: GameSession) -> bool {
        match self.sessions.get_mut(user_id) {
            Some(entry) => {
                entry.session = session;
                true
            }
            None => false,
        }
    }

    /// Delete a user's session
    pub fn remove(&mut self, user_id: &str) -> Option<GameSession> {
        self.sessions.remove(user_id).map(|mut entry| {
            entry.cancel_timer();
            entry.session
        })
    }

    /// Attach a restart timer, cancelling the previous one
    ///
    /// If the user has no session the timer is cancelled and `false` returned.
    pub fn arm_timer(&mut self, user_id: &str, timer: RestartTimer) -> bool {
        match self.sessions.get_mut(user_id) {
            Some(entry) => {
                entry.cancel_timer();
                entry.timer = Some(timer);
                true
            }
            None => {
                timer.cancel();
                false
            }
        }
    }

    /// Cancel the user's pending timer
    pub fn disarm_timer(&mut self, user_id: &str) -> bool {
        self.sessions
            .get_mut(user_id)
            .is_some_and(SessionEntry::cancel_timer)
    }

    /// Detach the timer that is currently firing
    ///
    /// Returns `true` only if `timer_id` is still the user's pending timer.
    /// The task is not aborted, since the caller is that task.
    pub fn claim_timer(&mut self, user_id: &str, timer_id: u64) -> bool {
        match self.sessions.get_mut(user_id) {
            Some(entry) if entry.timer_id() == Some(timer_id) => {
                entry.timer = None;
                true
            }
            _ => false,
        }
    }
}
