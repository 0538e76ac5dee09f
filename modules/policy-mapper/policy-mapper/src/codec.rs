//! Codec for persisted policy configuration payloads.
//!
//! Payloads are kind-tagged JSON. A missing or blank payload is the
//! valid "no configuration set" state and decodes to the defaulted
//! configuration for the declared kind; it is never an error.

use policy_mapper_sdk::{PolicyConf, PolicyKind, PolicyMapperError};

/// Decode a payload as the declared kind's configuration shape.
///
/// # Errors
///
/// - `MalformedConf` if the payload is not parseable as a policy
///   configuration at all.
/// - `KindMismatch` if the payload parses but its embedded tag declares
///   a different kind than the record does.
pub fn decode(kind: PolicyKind, payload: Option<&str>) -> Result<PolicyConf, PolicyMapperError> {
    let Some(raw) = payload.filter(|s| !s.trim().is_empty()) else {
        return Ok(PolicyConf::empty(kind));
    };

    let conf: PolicyConf = serde_json::from_str(raw)
        .map_err(|e| PolicyMapperError::malformed(kind, e.to_string()))?;

    if conf.kind() != kind {
        return Err(PolicyMapperError::KindMismatch {
            expected: kind,
            actual: conf.kind(),
        });
    }

    Ok(conf)
}

/// Encode a configuration as a kind-tagged payload.
///
/// # Errors
///
/// `MalformedConf` if serialization fails (not expected for the closed
/// set of conf shapes).
pub fn encode(conf: &PolicyConf) -> Result<String, PolicyMapperError> {
    serde_json::to_string(conf).map_err(|e| PolicyMapperError::malformed(conf.kind(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use policy_mapper_sdk::{
        AccessPolicyConf, AttrReleasePolicyConf, PolicyConf, PolicyKind, PolicyMapperError,
        TicketPolicyConf,
    };

    use super::{decode, encode};

    fn sample_confs() -> Vec<PolicyConf> {
        vec![
            PolicyConf::Access(AccessPolicyConf {
                enabled: true,
                sso_enabled: true,
                required_attrs: BTreeMap::from([("mail".to_owned(), "x".to_owned())]),
            }),
            PolicyConf::AttrRelease(AttrReleasePolicyConf {
                allowed_attrs: vec!["mail".to_owned(), "cn".to_owned()],
                excluded_attrs: vec!["password".to_owned()],
                include_only_attrs: vec![],
            }),
            PolicyConf::Ticket(TicketPolicyConf {
                max_time_to_live_secs: Some(3600),
            }),
        ]
    }

    #[test]
    fn round_trip_law_holds_for_every_kind() {
        for conf in sample_confs() {
            let payload = encode(&conf).unwrap();
            let decoded = decode(conf.kind(), Some(&payload)).unwrap();
            assert_eq!(decoded, conf);
        }
    }

    #[test]
    fn null_payload_decodes_to_empty_conf() {
        for kind in [PolicyKind::Access, PolicyKind::AttrRelease, PolicyKind::Ticket] {
            let conf = decode(kind, None).unwrap();
            assert_eq!(conf, PolicyConf::empty(kind));
        }
    }

    #[test]
    fn blank_payload_decodes_to_empty_conf() {
        let conf = decode(PolicyKind::Access, Some("  ")).unwrap();
        assert_eq!(conf, PolicyConf::empty(PolicyKind::Access));
    }

    #[test]
    fn garbage_payload_is_malformed() {
        let err = decode(PolicyKind::Access, Some("{not json")).unwrap_err();
        assert!(matches!(err, PolicyMapperError::MalformedConf { .. }));
    }

    #[test]
    fn wrong_kind_tag_is_a_mismatch() {
        let payload = encode(&PolicyConf::Ticket(TicketPolicyConf::default())).unwrap();
        let err = decode(PolicyKind::Access, Some(&payload)).unwrap_err();
        assert!(matches!(
            err,
            PolicyMapperError::KindMismatch {
                expected: PolicyKind::Access,
                actual: PolicyKind::Ticket,
            }
        ));
    }
}
