//! Persisted policy records.

use policy_mapper_sdk::{PolicyConf, PolicyKind, PolicyMapperError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::codec;

/// One persisted policy: an opaque configuration payload plus the kind
/// discriminator declaring its shape.
///
/// Records are owned by the persistence layer; the pipeline only ever
/// holds a transient, request-scoped snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRecord {
    pub key: Uuid,
    pub name: String,
    pub kind: PolicyKind,

    /// Kind-tagged JSON payload; `None` means "no configuration set".
    pub conf_json: Option<String>,
}

impl PolicyRecord {
    /// A record of `kind` with no configuration set.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: PolicyKind) -> Self {
        Self {
            key: Uuid::new_v4(),
            name: name.into(),
            kind,
            conf_json: None,
        }
    }

    /// Decode the payload as this record's declared kind.
    ///
    /// A `None` payload yields the defaulted configuration for the
    /// kind, never an error.
    ///
    /// # Errors
    ///
    /// `MalformedConf` / `KindMismatch` when the payload does not match
    /// the declared kind's shape.
    pub fn conf(&self) -> Result<PolicyConf, PolicyMapperError> {
        codec::decode(self.kind, self.conf_json.as_deref())
    }

    /// Replace the payload; `None` clears the configuration.
    ///
    /// # Errors
    ///
    /// `KindMismatch` if `conf` is not of this record's kind.
    pub fn set_conf(&mut self, conf: Option<&PolicyConf>) -> Result<(), PolicyMapperError> {
        match conf {
            Some(conf) if conf.kind() != self.kind => Err(PolicyMapperError::KindMismatch {
                expected: self.kind,
                actual: conf.kind(),
            }),
            Some(conf) => {
                self.conf_json = Some(codec::encode(conf)?);
                Ok(())
            }
            None => {
                self.conf_json = None;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use policy_mapper_sdk::{AccessPolicyConf, PolicyConf, PolicyKind, PolicyMapperError};

    use super::PolicyRecord;

    #[test]
    fn fresh_record_decodes_to_empty_conf() {
        let record = PolicyRecord::new("app access", PolicyKind::Access);
        assert_eq!(record.conf().unwrap(), PolicyConf::empty(PolicyKind::Access));
    }

    #[test]
    fn conf_round_trips_through_the_record() {
        let conf = PolicyConf::Access(AccessPolicyConf {
            enabled: true,
            sso_enabled: true,
            required_attrs: BTreeMap::from([("mail".to_owned(), "x".to_owned())]),
        });

        let mut record = PolicyRecord::new("app access", PolicyKind::Access);
        record.set_conf(Some(&conf)).unwrap();
        assert_eq!(record.conf().unwrap(), conf);

        record.set_conf(None).unwrap();
        assert_eq!(record.conf().unwrap(), PolicyConf::empty(PolicyKind::Access));
    }

    #[test]
    fn conf_of_other_kind_is_rejected() {
        let mut record = PolicyRecord::new("app access", PolicyKind::Access);
        let err = record
            .set_conf(Some(&PolicyConf::empty(PolicyKind::Ticket)))
            .unwrap_err();
        assert!(matches!(err, PolicyMapperError::KindMismatch { .. }));
    }
}
