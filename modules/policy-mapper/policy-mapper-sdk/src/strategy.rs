//! Enforcement strategies.
//!
//! These are the in-memory objects the federation/session engine
//! evaluates per authentication attempt to allow/deny a service or to
//! shape attribute release. They are produced from persisted
//! configuration by the registered [`PolicyMapper`](crate::PolicyMapper)
//! for each kind.

use std::collections::BTreeMap;

use crate::models::PolicyKind;

/// Access enforcement strategy.
///
/// All-defaults state: disabled, SSO disabled, empty attribute mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessStrategy {
    pub enabled: bool,
    pub sso_enabled: bool,

    /// Attribute mapping the engine checks subjects against.
    ///
    /// Populated from the configuration's `required_attrs`; the field
    /// name asymmetry is deliberate and kept as observed upstream.
    pub rejected_attributes: BTreeMap<String, String>,
}

/// Attribute-release enforcement strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrReleaseStrategy {
    pub allowed: Vec<String>,
    pub excluded: Vec<String>,
    pub include_only: Vec<String>,
}

/// Ticket-lifetime enforcement strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketStrategy {
    pub max_time_to_live_secs: Option<u64>,
}

/// Closed enum over the per-kind enforcement strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnforcementStrategy {
    Access(AccessStrategy),
    AttrRelease(AttrReleaseStrategy),
    Ticket(TicketStrategy),
}

impl EnforcementStrategy {
    /// The kind this strategy enforces.
    #[must_use]
    pub fn kind(&self) -> PolicyKind {
        match self {
            Self::Access(_) => PolicyKind::Access,
            Self::AttrRelease(_) => PolicyKind::AttrRelease,
            Self::Ticket(_) => PolicyKind::Ticket,
        }
    }
}
