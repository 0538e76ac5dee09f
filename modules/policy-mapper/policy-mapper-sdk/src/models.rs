//! Configuration models for the `policy_mapper` module.
//!
//! Each policy kind has a configuration shape that is persisted as a
//! kind-tagged JSON blob. Every field carries a serde default so that a
//! payload with absent fields (including the empty payload) decodes to
//! the documented "no configuration set" state for its kind.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Discriminator identifying which configuration/strategy shape a
/// policy record uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyKind {
    /// Whether (and under which attribute conditions) a service may
    /// proceed through SSO.
    Access,
    /// Which subject attributes are released to a service.
    AttrRelease,
    /// Ticket/assertion lifetime overrides.
    Ticket,
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Access => "ACCESS",
            Self::AttrRelease => "ATTR_RELEASE",
            Self::Ticket => "TICKET",
        };
        f.write_str(s)
    }
}

/// Access policy configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccessPolicyConf {
    /// Whether the service is enabled at all. Defaults to `false`.
    pub enabled: bool,

    /// Whether SSO participation is enabled. Defaults to `false`.
    pub sso_enabled: bool,

    /// Attribute name -> expected value pairs a subject must carry.
    /// Defaults to the empty mapping.
    pub required_attrs: BTreeMap<String, String>,
}

/// Attribute-release policy configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AttrReleasePolicyConf {
    /// Attributes explicitly allowed for release.
    pub allowed_attrs: Vec<String>,

    /// Attributes withheld even when otherwise allowed.
    pub excluded_attrs: Vec<String>,

    /// When non-empty, restricts release to exactly these attributes.
    pub include_only_attrs: Vec<String>,
}

/// Ticket policy configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TicketPolicyConf {
    /// Maximum ticket lifetime override, in seconds.
    pub max_time_to_live_secs: Option<u64>,
}

/// Closed tagged enum over the per-kind configuration shapes.
///
/// The serde tag is the persisted type discriminator: a serialized
/// payload carries `"kind": "ACCESS"` (etc.) alongside the conf fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyConf {
    Access(AccessPolicyConf),
    AttrRelease(AttrReleasePolicyConf),
    Ticket(TicketPolicyConf),
}

impl PolicyConf {
    /// The kind this configuration belongs to.
    #[must_use]
    pub fn kind(&self) -> PolicyKind {
        match self {
            Self::Access(_) => PolicyKind::Access,
            Self::AttrRelease(_) => PolicyKind::AttrRelease,
            Self::Ticket(_) => PolicyKind::Ticket,
        }
    }

    /// The documented "no configuration set" state for a kind.
    #[must_use]
    pub fn empty(kind: PolicyKind) -> Self {
        match kind {
            PolicyKind::Access => Self::Access(AccessPolicyConf::default()),
            PolicyKind::AttrRelease => Self::AttrRelease(AttrReleasePolicyConf::default()),
            PolicyKind::Ticket => Self::Ticket(TicketPolicyConf::default()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::{AccessPolicyConf, PolicyConf, PolicyKind};

    #[test]
    fn empty_conf_matches_declared_kind() {
        for kind in [PolicyKind::Access, PolicyKind::AttrRelease, PolicyKind::Ticket] {
            assert_eq!(PolicyConf::empty(kind).kind(), kind);
        }
    }

    #[test]
    fn serialized_conf_carries_kind_tag() {
        let conf = PolicyConf::Access(AccessPolicyConf::default());
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&conf).unwrap()).unwrap();
        assert_eq!(json["kind"], "ACCESS");
    }

    #[test]
    fn absent_fields_decode_to_defaults() {
        let conf: PolicyConf = serde_json::from_str(r#"{"kind":"ACCESS","enabled":true}"#).unwrap();
        let PolicyConf::Access(access) = conf else {
            panic!("wrong variant");
        };
        assert!(access.enabled);
        assert!(!access.sso_enabled);
        assert!(access.required_attrs.is_empty());
    }
}
