//! In-process session attribute store.

use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;
use saml_sso_sdk::{SessionId, SessionStore, SsoError};
use serde_json::Value;

/// Well-known session attribute keys.
pub mod correlation {
    /// URI of the protected resource originally requested, stored
    /// before the redirect to the IdP and consumed on the callback leg.
    pub const INITIAL_REQUEST_URI: &str = "fedgate.initialRequestURI";
}

/// Session store backed by a concurrent map.
///
/// `take` removes the attribute while holding the session's shard
/// lock, so two executions racing on the same key cannot both observe
/// the value.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: DashMap<SessionId, HashMap<String, Value>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop a whole session (logout, expiry sweep).
    pub fn remove_session(&self, session: &SessionId) {
        self.sessions.remove(session);
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, session: &SessionId, key: &str) -> Result<Option<Value>, SsoError> {
        Ok(self
            .sessions
            .get(session)
            .and_then(|attrs| attrs.get(key).cloned()))
    }

    async fn put(&self, session: &SessionId, key: &str, value: Value) -> Result<(), SsoError> {
        self.sessions
            .entry(*session)
            .or_default()
            .insert(key.to_owned(), value);
        Ok(())
    }

    async fn take(&self, session: &SessionId, key: &str) -> Result<Option<Value>, SsoError> {
        Ok(self
            .sessions
            .get_mut(session)
            .and_then(|mut attrs| attrs.remove(key)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use saml_sso_sdk::{SessionId, SessionStore};
    use serde_json::json;

    use super::{MemorySessionStore, correlation};

    #[tokio::test]
    async fn get_does_not_consume() {
        let store = MemorySessionStore::new();
        let sid = SessionId::random();

        store
            .put(&sid, correlation::INITIAL_REQUEST_URI, json!("/app/resource"))
            .await
            .unwrap();

        assert_eq!(
            store.get(&sid, correlation::INITIAL_REQUEST_URI).await.unwrap(),
            Some(json!("/app/resource"))
        );
        assert_eq!(
            store.get(&sid, correlation::INITIAL_REQUEST_URI).await.unwrap(),
            Some(json!("/app/resource"))
        );
    }

    #[tokio::test]
    async fn take_consumes_exactly_once() {
        let store = MemorySessionStore::new();
        let sid = SessionId::random();

        store
            .put(&sid, correlation::INITIAL_REQUEST_URI, json!("/app/resource"))
            .await
            .unwrap();

        assert_eq!(
            store.take(&sid, correlation::INITIAL_REQUEST_URI).await.unwrap(),
            Some(json!("/app/resource"))
        );
        assert_eq!(
            store.take(&sid, correlation::INITIAL_REQUEST_URI).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = MemorySessionStore::new();
        let a = SessionId::random();
        let b = SessionId::random();

        store.put(&a, "k", json!(1)).await.unwrap();
        assert_eq!(store.get(&b, "k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn concurrent_takes_yield_a_single_winner() {
        let store = Arc::new(MemorySessionStore::new());
        let sid = SessionId::random();

        store
            .put(&sid, correlation::INITIAL_REQUEST_URI, json!("/app/resource"))
            .await
            .unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.take(&sid, correlation::INITIAL_REQUEST_URI).await.unwrap()
            }));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap().is_some() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }
}
