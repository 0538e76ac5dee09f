//! Policy Mapper SDK
//!
//! This crate provides the public API for the `policy_mapper` module:
//!
//! - [`PolicyKind`] - Discriminator for persisted policy records
//! - [`PolicyConf`] - Closed tagged enum over per-kind configuration shapes
//! - [`EnforcementStrategy`] - In-memory objects the federation engine evaluates
//! - [`PolicyMapper`] - Bidirectional conf <-> strategy transform, one per kind
//! - [`PolicyMapperError`] - Error types
//!
//! ## Usage
//!
//! Mappers are registered at startup and looked up per authorization
//! decision:
//!
//! ```ignore
//! use policy_mapper_sdk::{PolicyKind, PolicyMapper};
//!
//! registry.register(Arc::new(AccessMapper));
//!
//! let strategy = registry.forward(PolicyKind::Access, &conf)?;
//! ```

pub mod api;
pub mod error;
pub mod models;
pub mod strategy;

// Re-export main types at crate root
pub use api::PolicyMapper;
pub use error::PolicyMapperError;
pub use models::{
    AccessPolicyConf, AttrReleasePolicyConf, PolicyConf, PolicyKind, TicketPolicyConf,
};
pub use strategy::{AccessStrategy, AttrReleaseStrategy, EnforcementStrategy, TicketStrategy};
