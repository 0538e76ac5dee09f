//! Policy Mapper Module
//!
//! Translates persisted, kind-tagged policy configuration into the
//! enforcement strategies the federation engine evaluates per
//! authentication attempt, and back.
//!
//! - [`codec`] - decode/encode configuration payloads
//! - [`MapperRegistry`] - keyed set of bidirectional mappers
//! - [`PolicyRecord`] - persisted blob + kind discriminator
//! - [`PolicyStore`] / [`CachedPolicyStore`] - load-by-service-and-kind

pub mod codec;
pub mod mappers;
pub mod record;
pub mod registry;
pub mod store;

pub use mappers::{AccessMapper, AttrReleaseMapper};
pub use record::PolicyRecord;
pub use registry::MapperRegistry;
pub use store::{CachedPolicyStore, MemoryPolicyStore, PolicyStore, PolicyStoreError};
