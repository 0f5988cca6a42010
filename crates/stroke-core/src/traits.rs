//! Trait seams for the stroke risk service.
//!
//! - `SessionStore` — shared mutable state mapping tokens to identities
//! - `RiskScorer`   — pure mapping from health attributes to an assessment
//! - `Clock`        — wall-clock source, swappable in tests
//!
//! The session store and the scorer never depend on each other; the
//! `Gateway` is the only place they meet.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use stroke_contracts::{
    assessment::RiskAssessment,
    error::StrokeResult,
    health::HealthRecord,
    session::SessionToken,
};

/// Registered identities and the sessions authenticated against them.
///
/// Implementations are shared across concurrently handled requests, so every
/// operation must be safe to call from many threads at once. Failures other
/// than the three user-facing variants only occur when the store itself is
/// unusable (`StoreUnavailable`).
pub trait SessionStore: Send + Sync {
    /// Create an identity.
    ///
    /// Fails with `DuplicateUser` when `username` is already present; the
    /// existing identity is left untouched. No strength or format checks are
    /// applied to either argument.
    fn register(&self, username: &str, credential: &str) -> StrokeResult<()>;

    /// Check `credential` against the identity for `username` and open a new
    /// session.
    ///
    /// Fails with `InvalidCredentials` when the username is unknown or the
    /// credential differs, and creates no session in that case.
    fn authenticate(&self, username: &str, credential: &str) -> StrokeResult<SessionToken>;

    /// Return the username behind a live session.
    ///
    /// Fails with `NoSession` for an empty, unknown, revoked, or expired token.
    fn resolve(&self, token: &SessionToken) -> StrokeResult<String>;

    /// End a session. Revoking an unknown token is a no-op, not an error.
    fn revoke(&self, token: &SessionToken) -> StrokeResult<()>;
}

impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    fn register(&self, username: &str, credential: &str) -> StrokeResult<()> {
        (**self).register(username, credential)
    }

    fn authenticate(&self, username: &str, credential: &str) -> StrokeResult<SessionToken> {
        (**self).authenticate(username, credential)
    }

    fn resolve(&self, token: &SessionToken) -> StrokeResult<String> {
        (**self).resolve(token)
    }

    fn revoke(&self, token: &SessionToken) -> StrokeResult<()> {
        (**self).revoke(token)
    }
}

/// A deterministic, side-effect-free risk scorer.
///
/// `assess` is total: every input shape, including an empty record, yields
/// an assessment.
pub trait RiskScorer: Send + Sync {
    fn assess(&self, record: &HealthRecord) -> RiskAssessment;
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
