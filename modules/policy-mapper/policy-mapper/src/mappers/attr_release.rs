//! Attribute-release policy mapper.

use policy_mapper_sdk::{
    AttrReleasePolicyConf, AttrReleaseStrategy, EnforcementStrategy, PolicyConf, PolicyKind,
    PolicyMapper, PolicyMapperError,
};

/// Maps [`AttrReleasePolicyConf`] to [`AttrReleaseStrategy`] and back.
pub struct AttrReleaseMapper;

impl PolicyMapper for AttrReleaseMapper {
    fn kind(&self) -> PolicyKind {
        PolicyKind::AttrRelease
    }

    fn forward(&self, conf: &PolicyConf) -> Result<EnforcementStrategy, PolicyMapperError> {
        let PolicyConf::AttrRelease(conf) = conf else {
            return Err(PolicyMapperError::KindMismatch {
                expected: PolicyKind::AttrRelease,
                actual: conf.kind(),
            });
        };

        Ok(EnforcementStrategy::AttrRelease(AttrReleaseStrategy {
            allowed: conf.allowed_attrs.clone(),
            excluded: conf.excluded_attrs.clone(),
            include_only: conf.include_only_attrs.clone(),
        }))
    }

    fn inverse(&self, strategy: &EnforcementStrategy) -> Result<PolicyConf, PolicyMapperError> {
        let EnforcementStrategy::AttrRelease(strategy) = strategy else {
            return Err(PolicyMapperError::KindMismatch {
                expected: PolicyKind::AttrRelease,
                actual: strategy.kind(),
            });
        };

        Ok(PolicyConf::AttrRelease(AttrReleasePolicyConf {
            allowed_attrs: strategy.allowed.clone(),
            excluded_attrs: strategy.excluded.clone(),
            include_only_attrs: strategy.include_only.clone(),
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::{
        AttrReleaseMapper, AttrReleasePolicyConf, EnforcementStrategy, PolicyConf, PolicyMapper,
    };

    #[test]
    fn forward_then_inverse_is_identity() {
        let conf = PolicyConf::AttrRelease(AttrReleasePolicyConf {
            allowed_attrs: vec!["mail".to_owned(), "cn".to_owned()],
            excluded_attrs: vec!["password".to_owned()],
            include_only_attrs: vec!["mail".to_owned()],
        });

        let strategy = AttrReleaseMapper.forward(&conf).unwrap();
        assert_eq!(AttrReleaseMapper.inverse(&strategy).unwrap(), conf);
    }

    #[test]
    fn empty_conf_maps_to_empty_strategy() {
        let strategy = AttrReleaseMapper
            .forward(&PolicyConf::AttrRelease(AttrReleasePolicyConf::default()))
            .unwrap();
        let EnforcementStrategy::AttrRelease(release) = strategy else {
            panic!("wrong variant");
        };
        assert!(release.allowed.is_empty());
        assert!(release.excluded.is_empty());
        assert!(release.include_only.is_empty());
    }
}
