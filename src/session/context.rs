//! Session Context
//!
//! The single process-wide owner of "who is logged in". Views read the
//! session through it and subscribe to changes instead of re-reading
//! storage on their own.

use std::sync::Arc;
use tokio::sync::watch;

use super::store::{SessionResult, SessionStorage, SessionStore};
use crate::models::Session;

/// Shared handle to the current session
pub struct SessionContext<S> {
    inner: Arc<Inner<S>>,
}

struct Inner<S> {
    store: SessionStore<S>,
    current: watch::Sender<Option<Session>>,
}

impl<S> Clone for SessionContext<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: SessionStorage> SessionContext<S> {
    /// Create the context, seeded from whatever the store holds
    pub fn new(store: SessionStore<S>) -> Self {
        let (current, _) = watch::channel(store.load());
        Self {
            inner: Arc::new(Inner { store, current }),
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.inner.current.borrow().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.inner.current.borrow().is_some()
    }

    /// Persist `session` and notify subscribers.
    ///
    /// Subscribers see the new session even if persisting it failed; the
    /// error is still returned so the caller can report it.
    pub fn sign_in(&self, session: Session) -> SessionResult<()> {
        let session = session.without_password();
        let saved = self.inner.store.save(&session);
        if let Err(e) = &saved {
            tracing::warn!("Session for {} not persisted: {}", session.name, e);
        }

        tracing::info!(user = %session.name, "Signed in");
        self.inner.current.send_replace(Some(session));
        saved
    }

    /// Forget the session locally and notify subscribers
    pub fn sign_out(&self) -> SessionResult<()> {
        let cleared = self.inner.store.clear();
        if let Err(e) = &cleared {
            tracing::warn!("Stored session not removed: {}", e);
        }

        tracing::info!("Signed out");
        self.inner.current.send_replace(None);
        cleared
    }

    /// Receiver that observes every sign-in and sign-out
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.inner.current.subscribe()
    }

    pub fn store(&self) -> &SessionStore<S> {
        &self.inner.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::store::{MemoryStorage, SessionError, SESSION_KEY};

    fn context() -> SessionContext<MemoryStorage> {
        SessionContext::new(SessionStore::new(MemoryStorage::new()))
    }

    #[test]
    fn test_starts_from_stored_session() {
        let store = SessionStore::new(MemoryStorage::new());
        store.save(&Session::new("1", "Ana")).unwrap();

        let ctx = SessionContext::new(store);
        assert!(ctx.is_signed_in());
        assert_eq!(ctx.current().map(|s| s.name), Some("Ana".to_string()));
    }

    #[test]
    fn test_sign_in_persists_without_password() {
        let ctx = context();
        let mut session = Session::new("1", "Ana");
        session
            .extra
            .insert("password".to_string(), serde_json::json!("hash"));

        ctx.sign_in(session).unwrap();

        let stored = ctx.store().load().unwrap();
        assert_eq!(stored.name, "Ana");
        assert!(!stored.extra.contains_key("password"));
    }

    #[test]
    fn test_sign_out_clears_storage() {
        let ctx = context();
        ctx.sign_in(Session::new("1", "Ana")).unwrap();
        ctx.sign_out().unwrap();

        assert!(!ctx.is_signed_in());
        assert_eq!(ctx.store().load(), None);
    }

    #[tokio::test]
    async fn test_subscribers_observe_changes() {
        let ctx = context();
        let mut rx = ctx.subscribe();
        assert!(rx.borrow().is_none());

        ctx.sign_in(Session::new("1", "Ana")).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().as_ref().map(|s| s.id.clone()), Some("1".to_string()));

        let other = ctx.clone();
        other.sign_out().unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
    }

    struct ReadOnlyStorage;

    impl SessionStorage for ReadOnlyStorage {
        fn get(&self, _key: &str) -> SessionResult<Option<String>> {
            Ok(None)
        }

        fn set(&self, key: &str, _value: &str) -> SessionResult<()> {
            Err(SessionError::Unavailable(format!("{} is read-only", key)))
        }

        fn remove(&self, _key: &str) -> SessionResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_persist_still_updates_context() {
        let ctx = SessionContext::new(SessionStore::new(ReadOnlyStorage));

        let err = ctx.sign_in(Session::new("1", "Ana")).unwrap_err();
        assert_eq!(
            err,
            SessionError::Unavailable(format!("{} is read-only", SESSION_KEY))
        );
        assert!(ctx.is_signed_in());
    }
}
