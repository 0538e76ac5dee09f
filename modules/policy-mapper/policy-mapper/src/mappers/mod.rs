//! Built-in policy mappers.

pub mod access;
pub mod attr_release;

pub use access::AccessMapper;
pub use attr_release::AttrReleaseMapper;
