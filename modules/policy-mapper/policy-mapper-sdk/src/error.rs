//! Error types for the `policy_mapper` module.

use thiserror::Error;

use crate::models::PolicyKind;

/// Errors that can occur when decoding policy configuration or mapping
/// it to an enforcement strategy.
#[derive(Debug, Error)]
pub enum PolicyMapperError {
    /// No mapper is registered for the requested kind.
    ///
    /// Recoverable: callers decide whether to treat the service as
    /// having no enforcement or to reject its configuration.
    #[error("no mapper registered for policy kind {0}")]
    UnsupportedKind(PolicyKind),

    /// The payload cannot be parsed as the declared kind's shape.
    #[error("malformed {kind} policy configuration: {reason}")]
    MalformedConf { kind: PolicyKind, reason: String },

    /// A conf or strategy of the wrong variant reached a mapper.
    /// Indicates a wiring defect, not bad persisted data.
    #[error("policy kind mismatch: expected {expected}, got {actual}")]
    KindMismatch {
        expected: PolicyKind,
        actual: PolicyKind,
    },
}

impl PolicyMapperError {
    pub fn malformed(kind: PolicyKind, reason: impl Into<String>) -> Self {
        Self::MalformedConf {
            kind,
            reason: reason.into(),
        }
    }
}
