//! Public mapper trait for the `policy_mapper` module.
//!
//! One implementation exists per policy kind and is registered in the
//! mapper registry at startup. Both directions are pure functions; the
//! forward direction must be total over every configuration the codec
//! can produce for the mapper's kind.

use crate::error::PolicyMapperError;
use crate::models::{PolicyConf, PolicyKind};
use crate::strategy::EnforcementStrategy;

/// A bidirectional transform between one configuration kind and its
/// enforcement strategy.
///
/// The inverse direction is not required to be a field-for-field mirror
/// of the forward one: a strategy may carry derived or renamed fields.
/// Implementations must preserve such asymmetries exactly so that
/// `inverse(forward(c)) == c` still holds for every valid `c`.
pub trait PolicyMapper: Send + Sync {
    /// The kind this mapper handles.
    fn kind(&self) -> PolicyKind;

    /// Build the enforcement strategy for a configuration.
    ///
    /// # Errors
    ///
    /// `KindMismatch` if `conf` is not of this mapper's kind.
    fn forward(&self, conf: &PolicyConf) -> Result<EnforcementStrategy, PolicyMapperError>;

    /// Recover the configuration from an enforcement strategy.
    ///
    /// # Errors
    ///
    /// `KindMismatch` if `strategy` is not of this mapper's kind.
    fn inverse(&self, strategy: &EnforcementStrategy) -> Result<PolicyConf, PolicyMapperError>;
}
