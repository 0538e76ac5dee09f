//! Policy persistence seam.
//!
//! The pipeline's authorization step loads policies by (service, kind)
//! on every decision; saves and deletes are owned by the administrative
//! layer. Reads are read-mostly, so a caching wrapper is provided that
//! invalidates per-service entries before a write becomes visible.

use async_trait::async_trait;
use dashmap::DashMap;
use policy_mapper_sdk::PolicyKind;
use thiserror::Error;
use tracing::debug;

use crate::record::PolicyRecord;

/// Errors from the policy persistence backend.
#[derive(Debug, Error)]
pub enum PolicyStoreError {
    #[error("policy store unavailable: {0}")]
    Unavailable(String),

    #[error("internal policy store error: {0}")]
    Internal(String),
}

/// Load/save/delete policies keyed by service and kind.
#[async_trait]
pub trait PolicyStore: Send + Sync {
    /// Load the policy of `kind` configured for `service`, if any.
    ///
    /// # Errors
    ///
    /// Backend failures only; an absent policy is `Ok(None)`.
    async fn find(
        &self,
        service: &str,
        kind: PolicyKind,
    ) -> Result<Option<PolicyRecord>, PolicyStoreError>;

    /// Save (create or replace) a policy for `service`.
    ///
    /// # Errors
    ///
    /// Backend failures.
    async fn save(&self, service: &str, record: PolicyRecord) -> Result<(), PolicyStoreError>;

    /// Delete the policy of `kind` for `service`, if present.
    ///
    /// # Errors
    ///
    /// Backend failures.
    async fn delete(&self, service: &str, kind: PolicyKind) -> Result<(), PolicyStoreError>;
}

/// In-memory reference store.
#[derive(Default)]
pub struct MemoryPolicyStore {
    records: DashMap<(String, PolicyKind), PolicyRecord>,
}

impl MemoryPolicyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PolicyStore for MemoryPolicyStore {
    async fn find(
        &self,
        service: &str,
        kind: PolicyKind,
    ) -> Result<Option<PolicyRecord>, PolicyStoreError> {
        Ok(self
            .records
            .get(&(service.to_owned(), kind))
            .map(|r| r.clone()))
    }

    async fn save(&self, service: &str, record: PolicyRecord) -> Result<(), PolicyStoreError> {
        self.records
            .insert((service.to_owned(), record.kind), record);
        Ok(())
    }

    async fn delete(&self, service: &str, kind: PolicyKind) -> Result<(), PolicyStoreError> {
        self.records.remove(&(service.to_owned(), kind));
        Ok(())
    }
}

/// Read-mostly cache over any [`PolicyStore`].
///
/// Absent policies are cached too, so repeated lookups for services
/// without a policy of a kind stay cheap. Writes invalidate the
/// (service, kind) entry before reaching the backing store: a stale
/// read window is acceptable, serving a stale write is not.
pub struct CachedPolicyStore<S> {
    inner: S,
    cache: DashMap<(String, PolicyKind), Option<PolicyRecord>>,
}

impl<S: PolicyStore> CachedPolicyStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
        }
    }

    fn invalidate(&self, service: &str, kind: PolicyKind) {
        if self.cache.remove(&(service.to_owned(), kind)).is_some() {
            debug!(service, %kind, "invalidated cached policy");
        }
    }
}

#[async_trait]
impl<S: PolicyStore> PolicyStore for CachedPolicyStore<S> {
    async fn find(
        &self,
        service: &str,
        kind: PolicyKind,
    ) -> Result<Option<PolicyRecord>, PolicyStoreError> {
        let key = (service.to_owned(), kind);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached.clone());
        }

        let record = self.inner.find(service, kind).await?;
        self.cache.insert(key, record.clone());
        Ok(record)
    }

    async fn save(&self, service: &str, record: PolicyRecord) -> Result<(), PolicyStoreError> {
        self.invalidate(service, record.kind);
        self.inner.save(service, record).await
    }

    async fn delete(&self, service: &str, kind: PolicyKind) -> Result<(), PolicyStoreError> {
        self.invalidate(service, kind);
        self.inner.delete(service, kind).await
    }
}
