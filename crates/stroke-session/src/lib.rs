//! # stroke-session
//!
//! Identity registration and server-side sessions for the stroke risk
//! service.
//!
//! ## Overview
//!
//! [`InMemorySessionStore`] implements the
//! [`SessionStore`](stroke_core::traits::SessionStore) trait. Each session
//! token moves through two states:
//!
//! ```text
//!   absent ──authenticate──▶ active ──revoke / idle timeout──▶ absent
//!                              │  ▲
//!                              └──┘ resolve
//! ```
//!
//! Tokens are 256 bits from the OS CSPRNG by default, hex encoded.
//! Credentials are kept only as salted SHA-256 digests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stroke_core::traits::SessionStore;
//! use stroke_session::{InMemorySessionStore, SessionConfig};
//!
//! let store = InMemorySessionStore::new(SessionConfig::from_file(path)?)?;
//! store.register("alice", "p1")?;
//! let token = store.authenticate("alice", "p1")?;
//! assert_eq!(store.resolve(&token)?, "alice");
//! store.revoke(&token)?;
//! ```

pub mod config;
pub mod credential;
pub mod memory;
pub mod token;

pub use config::SessionConfig;
pub use memory::InMemorySessionStore;
pub use token::generate_token;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};
    use std::thread;

    use chrono::{DateTime, Duration, TimeZone, Utc};

    use stroke_contracts::{error::StrokeError, session::SessionToken};
    use stroke_core::traits::{Clock, SessionStore};

    use super::{InMemorySessionStore, SessionConfig};

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// A clock that only moves when told to.
    #[derive(Clone)]
    struct ManualClock(Arc<Mutex<DateTime<Utc>>>);

    impl ManualClock {
        fn new() -> Self {
            Self(Arc::new(Mutex::new(
                Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap(),
            )))
        }

        fn advance(&self, by: Duration) {
            *self.0.lock().unwrap() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    fn store() -> InMemorySessionStore {
        InMemorySessionStore::new(SessionConfig::default()).unwrap()
    }

    fn store_with_timeout(secs: u64) -> (InMemorySessionStore, ManualClock) {
        let clock = ManualClock::new();
        let config = SessionConfig {
            idle_timeout_secs: secs,
            ..SessionConfig::default()
        };
        let store = InMemorySessionStore::with_clock(config, Box::new(clock.clone())).unwrap();
        (store, clock)
    }

    // ── Registration ──────────────────────────────────────────────────────────

    /// A second registration fails and leaves the first credential in place.
    #[test]
    fn test_registration_uniqueness() {
        let store = store();
        store.register("alice", "p1").unwrap();

        let err = store.register("alice", "p2").unwrap_err();
        assert_eq!(
            err,
            StrokeError::DuplicateUser {
                username: "alice".to_string()
            }
        );

        assert!(store.authenticate("alice", "p1").is_ok());
        assert_eq!(
            store.authenticate("alice", "p2").unwrap_err(),
            StrokeError::InvalidCredentials
        );
        assert_eq!(store.user_count().unwrap(), 1);
    }

    #[test]
    fn test_usernames_are_case_sensitive() {
        let store = store();
        store.register("alice", "p1").unwrap();
        store.register("Alice", "p2").unwrap();
        assert_eq!(store.user_count().unwrap(), 2);
    }

    // ── Authentication ────────────────────────────────────────────────────────

    /// A wrong credential fails and opens no session.
    #[test]
    fn test_credential_check() {
        let store = store();
        store.register("alice", "p1").unwrap();

        assert_eq!(
            store.authenticate("alice", "wrong").unwrap_err(),
            StrokeError::InvalidCredentials
        );
        assert_eq!(store.session_count().unwrap(), 0);
    }

    #[test]
    fn test_unknown_user_is_invalid_credentials() {
        let store = store();
        assert_eq!(
            store.authenticate("nobody", "").unwrap_err(),
            StrokeError::InvalidCredentials
        );
    }

    /// Tokens are 32 random bytes, hex encoded, and distinct per login.
    #[test]
    fn test_tokens_are_long_and_unique() {
        let store = store();
        store.register("alice", "p1").unwrap();

        let tokens: HashSet<String> = (0..50)
            .map(|_| store.authenticate("alice", "p1").unwrap().as_str().to_string())
            .collect();

        assert_eq!(tokens.len(), 50);
        assert!(tokens
            .iter()
            .all(|t| t.len() == 64 && t.chars().all(|c| c.is_ascii_hexdigit())));
        assert_eq!(store.session_count().unwrap(), 50);
    }

    // ── Session lifecycle ─────────────────────────────────────────────────────

    /// authenticate → resolve → revoke → resolve fails.
    #[test]
    fn test_session_lifecycle() {
        let store = store();
        store.register("alice", "p1").unwrap();
        let token = store.authenticate("alice", "p1").unwrap();

        assert_eq!(store.resolve(&token).unwrap(), "alice");

        store.revoke(&token).unwrap();
        assert_eq!(store.resolve(&token).unwrap_err(), StrokeError::NoSession);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let store = store();
        store.register("alice", "p1").unwrap();
        let token = store.authenticate("alice", "p1").unwrap();

        for _ in 0..5 {
            assert_eq!(store.resolve(&token).unwrap(), "alice");
        }
        assert_eq!(store.session_count().unwrap(), 1);
    }

    #[test]
    fn test_resolve_rejects_empty_and_unknown_tokens() {
        let store = store();
        assert_eq!(
            store.resolve(&SessionToken::new("")).unwrap_err(),
            StrokeError::NoSession
        );
        assert_eq!(
            store.resolve(&SessionToken::new("deadbeef")).unwrap_err(),
            StrokeError::NoSession
        );
    }

    #[test]
    fn test_revoke_unknown_token_is_noop() {
        let store = store();
        assert!(store.revoke(&SessionToken::new("never-issued")).is_ok());
    }

    /// Revoking one session leaves the user's other sessions alive.
    #[test]
    fn test_revoke_is_per_token() {
        let store = store();
        store.register("alice", "p1").unwrap();
        let laptop = store.authenticate("alice", "p1").unwrap();
        let phone = store.authenticate("alice", "p1").unwrap();

        store.revoke(&laptop).unwrap();

        assert!(store.resolve(&laptop).is_err());
        assert_eq!(store.resolve(&phone).unwrap(), "alice");
    }

    // ── Idle timeout ──────────────────────────────────────────────────────────

    #[test]
    fn test_session_expires_after_idle_timeout() {
        let (store, clock) = store_with_timeout(60);
        store.register("alice", "p1").unwrap();
        let token = store.authenticate("alice", "p1").unwrap();

        clock.advance(Duration::seconds(59));
        assert_eq!(store.resolve(&token).unwrap(), "alice");

        // The successful resolve above restarted the idle window.
        clock.advance(Duration::seconds(59));
        assert_eq!(store.resolve(&token).unwrap(), "alice");

        clock.advance(Duration::seconds(60));
        assert_eq!(store.resolve(&token).unwrap_err(), StrokeError::NoSession);
        assert_eq!(store.session_count().unwrap(), 0);
    }

    #[test]
    fn test_zero_timeout_never_expires() {
        let (store, clock) = store_with_timeout(0);
        store.register("alice", "p1").unwrap();
        let token = store.authenticate("alice", "p1").unwrap();

        clock.advance(Duration::days(365));
        assert_eq!(store.resolve(&token).unwrap(), "alice");
    }

    #[test]
    fn test_purge_expired_removes_only_idle_sessions() {
        let (store, clock) = store_with_timeout(60);
        store.register("alice", "p1").unwrap();
        let old = store.authenticate("alice", "p1").unwrap();

        clock.advance(Duration::seconds(45));
        let fresh = store.authenticate("alice", "p1").unwrap();

        clock.advance(Duration::seconds(30));
        assert_eq!(store.purge_expired().unwrap(), 1);
        assert!(store.resolve(&old).is_err());
        assert_eq!(store.resolve(&fresh).unwrap(), "alice");
    }

    // ── Concurrency ───────────────────────────────────────────────────────────

    /// Many threads racing to register one name: exactly one wins.
    #[test]
    fn test_concurrent_registration_admits_one() {
        let store = Arc::new(store());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.register("alice", &format!("p{}", i)).is_ok())
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(winners, 1);
        assert_eq!(store.user_count().unwrap(), 1);
    }

    #[test]
    fn test_concurrent_logins_get_distinct_tokens() {
        let store = Arc::new(store());
        store.register("alice", "p1").unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    (0..25)
                        .map(|_| store.authenticate("alice", "p1").unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let tokens: HashSet<SessionToken> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();

        assert_eq!(tokens.len(), 200);
        assert_eq!(store.session_count().unwrap(), 200);
    }

    // ── Configuration ─────────────────────────────────────────────────────────

    #[test]
    fn test_config_from_toml() {
        let config = SessionConfig::from_toml_str(
            r#"
                idle_timeout_secs = 600
                token_bytes = 24
            "#,
        )
        .unwrap();
        assert_eq!(config.idle_timeout_secs, 600);
        assert_eq!(config.token_bytes, 24);
        assert_eq!(config.idle_timeout(), Some(Duration::seconds(600)));
    }

    #[test]
    fn test_config_empty_toml_uses_defaults() {
        assert_eq!(SessionConfig::from_toml_str("").unwrap(), SessionConfig::default());
    }

    #[test]
    fn test_config_rejects_short_tokens() {
        match SessionConfig::from_toml_str("token_bytes = 8") {
            Err(StrokeError::ConfigError { reason }) => {
                assert!(reason.contains("token_bytes"), "unexpected reason: {reason}");
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    /// An absurd token size fails validation up front instead of aborting on
    /// the first login's allocation.
    #[test]
    fn test_config_rejects_oversized_tokens() {
        match SessionConfig::from_toml_str("token_bytes = 9223372036854775807") {
            Err(StrokeError::ConfigError { reason }) => {
                assert!(reason.contains("token_bytes"), "unexpected reason: {reason}");
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
        assert!(SessionConfig::from_toml_str("token_bytes = 257").is_err());

        let config = SessionConfig::from_toml_str("token_bytes = 256").unwrap();
        let store = InMemorySessionStore::new(config).unwrap();
        store.register("alice", "p1").unwrap();
        assert_eq!(store.authenticate("alice", "p1").unwrap().as_str().len(), 512);

        let config = SessionConfig {
            token_bytes: usize::MAX,
            ..SessionConfig::default()
        };
        assert!(matches!(
            InMemorySessionStore::new(config),
            Err(StrokeError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_config_rejects_unknown_keys() {
        assert!(matches!(
            SessionConfig::from_toml_str("session_ttl = 5"),
            Err(StrokeError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_store_rejects_invalid_config() {
        let config = SessionConfig {
            token_bytes: 4,
            ..SessionConfig::default()
        };
        assert!(InMemorySessionStore::new(config).is_err());
    }

    /// Dropping a guard mid-panic poisons the lock; the store reports it
    /// instead of panicking.
    #[test]
    fn test_poisoned_lock_is_store_unavailable() {
        let store = Arc::new(store());
        let poisoner = Arc::clone(&store);
        let _ = thread::spawn(move || {
            let _guard = poisoner.state.lock().unwrap();
            panic!("poison the session lock");
        })
        .join();

        assert!(matches!(
            store.register("alice", "p1"),
            Err(StrokeError::StoreUnavailable { .. })
        ));
    }
}
