//! Mapper registry.
//!
//! Holds at most one [`PolicyMapper`] per policy kind. Mappers are
//! registered at startup; a lookup for an unregistered kind is a
//! recoverable [`PolicyMapperError::UnsupportedKind`], never a panic,
//! since kinds are meant to be extensible.

use std::sync::Arc;

use dashmap::DashMap;
use policy_mapper_sdk::{
    EnforcementStrategy, PolicyConf, PolicyKind, PolicyMapper, PolicyMapperError,
};
use tracing::{debug, warn};

use crate::mappers::{AccessMapper, AttrReleaseMapper};

/// Keyed set of bidirectional conf <-> strategy transforms.
#[derive(Default)]
pub struct MapperRegistry {
    mappers: DashMap<PolicyKind, Arc<dyn PolicyMapper>>,
}

impl MapperRegistry {
    /// An empty registry with no kinds supported.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in Access and AttrRelease mappers.
    ///
    /// The Ticket kind intentionally stays unregistered until a
    /// collaborator provides a mapper for it.
    #[must_use]
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register(Arc::new(AccessMapper));
        registry.register(Arc::new(AttrReleaseMapper));
        registry
    }

    /// Register a mapper for its kind, replacing any existing entry.
    ///
    /// Replacement keeps the at-most-one-mapper-per-kind invariant and
    /// is logged, since it normally indicates duplicate startup wiring.
    pub fn register(&self, mapper: Arc<dyn PolicyMapper>) {
        let kind = mapper.kind();
        if self.mappers.insert(kind, mapper).is_some() {
            warn!(%kind, "replacing previously registered policy mapper");
        } else {
            debug!(%kind, "registered policy mapper");
        }
    }

    /// Whether a mapper is registered for `kind`.
    #[must_use]
    pub fn supports(&self, kind: PolicyKind) -> bool {
        self.mappers.contains_key(&kind)
    }

    /// Build the enforcement strategy for a configuration.
    ///
    /// # Errors
    ///
    /// - `UnsupportedKind` if no mapper is registered for `kind`.
    /// - `KindMismatch` if `conf` is not of `kind`.
    pub fn forward(
        &self,
        kind: PolicyKind,
        conf: &PolicyConf,
    ) -> Result<EnforcementStrategy, PolicyMapperError> {
        let mapper = self
            .mappers
            .get(&kind)
            .ok_or(PolicyMapperError::UnsupportedKind(kind))?;
        mapper.forward(conf)
    }

    /// Recover the configuration from an enforcement strategy.
    ///
    /// # Errors
    ///
    /// - `UnsupportedKind` if no mapper is registered for `kind`.
    /// - `KindMismatch` if `strategy` is not of `kind`.
    pub fn inverse(
        &self,
        kind: PolicyKind,
        strategy: &EnforcementStrategy,
    ) -> Result<PolicyConf, PolicyMapperError> {
        let mapper = self
            .mappers
            .get(&kind)
            .ok_or(PolicyMapperError::UnsupportedKind(kind))?;
        mapper.inverse(strategy)
    }
}
