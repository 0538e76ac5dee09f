//! Access policy mapper.

use policy_mapper_sdk::{
    AccessPolicyConf, AccessStrategy, EnforcementStrategy, PolicyConf, PolicyKind, PolicyMapper,
    PolicyMapperError,
};

/// Maps [`AccessPolicyConf`] to [`AccessStrategy`] and back.
///
/// The configuration's `required_attrs` populate the strategy's
/// `rejected_attributes`, and the inverse reads them back from there.
// TODO: confirm the required_attrs -> rejected_attributes naming with the
// product owner; kept as observed upstream so round-trips stay exact.
pub struct AccessMapper;

impl PolicyMapper for AccessMapper {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Access
    }

    fn forward(&self, conf: &PolicyConf) -> Result<EnforcementStrategy, PolicyMapperError> {
        let PolicyConf::Access(conf) = conf else {
            return Err(PolicyMapperError::KindMismatch {
                expected: PolicyKind::Access,
                actual: conf.kind(),
            });
        };

        Ok(EnforcementStrategy::Access(AccessStrategy {
            enabled: conf.enabled,
            sso_enabled: conf.sso_enabled,
            rejected_attributes: conf.required_attrs.clone(),
        }))
    }

    fn inverse(&self, strategy: &EnforcementStrategy) -> Result<PolicyConf, PolicyMapperError> {
        let EnforcementStrategy::Access(strategy) = strategy else {
            return Err(PolicyMapperError::KindMismatch {
                expected: PolicyKind::Access,
                actual: strategy.kind(),
            });
        };

        Ok(PolicyConf::Access(AccessPolicyConf {
            enabled: strategy.enabled,
            sso_enabled: strategy.sso_enabled,
            required_attrs: strategy.rejected_attributes.clone(),
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use super::{
        AccessMapper, AccessPolicyConf, EnforcementStrategy, PolicyConf, PolicyMapper,
        PolicyMapperError,
    };

    #[test]
    fn required_attrs_surface_as_rejected_attributes() {
        let conf = PolicyConf::Access(AccessPolicyConf {
            enabled: true,
            sso_enabled: false,
            required_attrs: BTreeMap::from([("mail".to_owned(), "x".to_owned())]),
        });

        let strategy = AccessMapper.forward(&conf).unwrap();
        let EnforcementStrategy::Access(access) = &strategy else {
            panic!("wrong variant");
        };
        assert_eq!(
            access.rejected_attributes,
            BTreeMap::from([("mail".to_owned(), "x".to_owned())])
        );

        // Mapping back reproduces the original required_attrs exactly.
        let recovered = AccessMapper.inverse(&strategy).unwrap();
        assert_eq!(recovered, conf);
    }

    #[test]
    fn defaults_map_to_all_defaults_strategy() {
        let strategy = AccessMapper
            .forward(&PolicyConf::Access(AccessPolicyConf::default()))
            .unwrap();
        let EnforcementStrategy::Access(access) = strategy else {
            panic!("wrong variant");
        };
        assert!(!access.enabled);
        assert!(!access.sso_enabled);
        assert!(access.rejected_attributes.is_empty());
    }

    #[test]
    fn wrong_variant_is_rejected() {
        let err = AccessMapper
            .forward(&PolicyConf::empty(
                policy_mapper_sdk::PolicyKind::AttrRelease,
            ))
            .unwrap_err();
        assert!(matches!(err, PolicyMapperError::KindMismatch { .. }));
    }
}
