//! In-memory implementation of `SessionStore`.
//!
//! `InMemorySessionStore` keeps identities and sessions in two maps behind a
//! single `Mutex`. Holding one lock for both maps makes every operation
//! atomic: two concurrent registrations of the same name cannot both pass the
//! duplicate check, and a revoke cannot interleave with a resolve.
//!
//! Nothing is persisted; all state lives for the lifetime of the process.
//! Sessions expire after `SessionConfig::idle_timeout_secs` without a
//! successful `resolve`. Expired sessions are dropped lazily on lookup, or in
//! bulk by `purge_expired`; there is no background sweeper.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use stroke_contracts::{
    error::{StrokeError, StrokeResult},
    session::{SessionId, SessionToken},
};
use stroke_core::traits::{Clock, SessionStore, SystemClock};

use crate::{config::SessionConfig, credential::CredentialDigest, token::generate_token};

// ── Internal mutable state ────────────────────────────────────────────────────

pub(crate) struct Identity {
    pub(crate) credential: CredentialDigest,
}

pub(crate) struct Session {
    /// Log-safe identifier; the token itself is never logged.
    pub(crate) id: SessionId,
    pub(crate) username: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) last_seen: DateTime<Utc>,
}

#[derive(Default)]
pub(crate) struct StoreState {
    pub(crate) users: HashMap<String, Identity>,
    pub(crate) sessions: HashMap<SessionToken, Session>,
}

// ── Public store ──────────────────────────────────────────────────────────────

/// A process-lifetime session store.
///
/// Construct once per process and share it (e.g. behind an `Arc`) with every
/// request handler.
pub struct InMemorySessionStore {
    config: SessionConfig,
    clock: Box<dyn Clock>,
    pub(crate) state: Mutex<StoreState>,
}

impl InMemorySessionStore {
    /// Create an empty store using the system clock.
    ///
    /// Returns `ConfigError` if `config` fails validation.
    pub fn new(config: SessionConfig) -> StrokeResult<Self> {
        Self::with_clock(config, Box::new(SystemClock))
    }

    /// Create an empty store reading time from `clock`.
    pub fn with_clock(config: SessionConfig, clock: Box<dyn Clock>) -> StrokeResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            clock,
            state: Mutex::new(StoreState::default()),
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Number of live sessions, including idle ones not yet purged.
    pub fn session_count(&self) -> StrokeResult<usize> {
        Ok(self.lock()?.sessions.len())
    }

    pub fn user_count(&self) -> StrokeResult<usize> {
        Ok(self.lock()?.users.len())
    }

    /// Drop every session idle past the timeout. Returns how many were removed.
    pub fn purge_expired(&self) -> StrokeResult<usize> {
        let now = self.clock.now();
        let mut state = self.lock()?;
        let before = state.sessions.len();
        state
            .sessions
            .retain(|_, session| !self.is_expired(session, now));
        let purged = before - state.sessions.len();

        if purged > 0 {
            info!(purged, remaining = state.sessions.len(), "purged idle sessions");
        }
        Ok(purged)
    }

    fn is_expired(&self, session: &Session, now: DateTime<Utc>) -> bool {
        match self.config.idle_timeout() {
            Some(timeout) => now.signed_duration_since(session.last_seen) >= timeout,
            None => false,
        }
    }

    fn lock(&self) -> StrokeResult<MutexGuard<'_, StoreState>> {
        self.state.lock().map_err(|e| StrokeError::StoreUnavailable {
            reason: format!("session state lock poisoned: {}", e),
        })
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self {
            config: SessionConfig::default(),
            clock: Box::new(SystemClock),
            state: Mutex::new(StoreState::default()),
        }
    }
}

// ── SessionStore impl ─────────────────────────────────────────────────────────

impl SessionStore for InMemorySessionStore {
    fn register(&self, username: &str, credential: &str) -> StrokeResult<()> {
        // Hash outside the lock; the check-and-insert below is atomic.
        let credential = CredentialDigest::new(credential)?;

        let mut state = self.lock()?;
        if state.users.contains_key(username) {
            warn!(username = %username, "duplicate registration rejected");
            return Err(StrokeError::DuplicateUser {
                username: username.to_string(),
            });
        }
        state.users.insert(username.to_string(), Identity { credential });

        info!(username = %username, users = state.users.len(), "identity registered");
        Ok(())
    }

    fn authenticate(&self, username: &str, credential: &str) -> StrokeResult<SessionToken> {
        let now = self.clock.now();
        let mut state = self.lock()?;

        let verified = state
            .users
            .get(username)
            .is_some_and(|identity| identity.credential.matches(credential));
        if !verified {
            warn!(username = %username, "authentication failed");
            return Err(StrokeError::InvalidCredentials);
        }

        let token = loop {
            let candidate = generate_token(self.config.token_bytes)?;
            if !state.sessions.contains_key(&candidate) {
                break candidate;
            }
            warn!("generated token collided with a live session, regenerating");
        };

        let session = Session {
            id: SessionId::new(),
            username: username.to_string(),
            created_at: now,
            last_seen: now,
        };
        info!(
            username = %username,
            session_id = %session.id,
            "session opened"
        );
        state.sessions.insert(token.clone(), session);

        Ok(token)
    }

    fn resolve(&self, token: &SessionToken) -> StrokeResult<String> {
        if token.is_empty() {
            return Err(StrokeError::NoSession);
        }

        let now = self.clock.now();
        let mut state = self.lock()?;

        let expired = match state.sessions.get(token) {
            None => {
                debug!("unknown session token");
                return Err(StrokeError::NoSession);
            }
            Some(session) => self.is_expired(session, now),
        };

        if expired {
            if let Some(session) = state.sessions.remove(token) {
                info!(
                    username = %session.username,
                    session_id = %session.id,
                    opened_at = %session.created_at,
                    "session expired after idle timeout"
                );
            }
            return Err(StrokeError::NoSession);
        }

        match state.sessions.get_mut(token) {
            Some(session) => {
                session.last_seen = now;
                Ok(session.username.clone())
            }
            None => Err(StrokeError::NoSession),
        }
    }

    fn revoke(&self, token: &SessionToken) -> StrokeResult<()> {
        let mut state = self.lock()?;
        match state.sessions.remove(token) {
            Some(session) => {
                info!(
                    username = %session.username,
                    session_id = %session.id,
                    "session revoked"
                );
            }
            None => debug!("revoke of unknown session token ignored"),
        }
        Ok(())
    }
}
