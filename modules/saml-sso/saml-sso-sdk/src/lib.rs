//! SAML SSO SDK
//!
//! This crate provides the capability seams consumed and exposed by the
//! `saml_sso` module:
//!
//! - [`CredentialExtractor`] / [`AssertionValidator`] - the SAML
//!   protocol black box (extraction and cryptographic validation)
//! - [`AuthenticationManager`] - downstream acceptance of a validated
//!   credential
//! - [`SessionStore`] - keyed attributes scoped to one browser session
//! - [`SamlCredential`] / [`AuthenticationResult`] - credential models
//! - [`SsoError`] - error taxonomy of the callback pipeline
//!
//! ## Usage
//!
//! The pipeline is generic over these traits; deployments plug in a
//! concrete SAML library behind the extractor/validator pair:
//!
//! ```ignore
//! use saml_sso_sdk::{CredentialExtractor, SessionStore};
//!
//! let pipeline = SsoPipeline::new(config, extractor, validator, manager, sessions);
//! ```

pub mod api;
pub mod error;
pub mod models;

// Re-export main types at crate root
pub use api::{AssertionValidator, AuthenticationManager, CredentialExtractor, SessionStore};
pub use error::SsoError;
pub use models::{
    AuthenticatedPrincipal, AuthenticationResult, CallbackRequest, SamlCredential, SessionId,
};
