//! SAML SSO Module
//!
//! Handles the callback leg of the browser SSO flow: matches the IdP's
//! POST back to the gateway, extracts and validates the signed
//! assertion, and resumes the originally requested URI from session
//! correlation state.
//!
//! - [`CallbackMatcher`] - pure predicate over inbound requests
//! - [`SsoPipeline`] - match -> extract -> validate -> resume
//! - [`MemorySessionStore`] - in-process session attribute store
//! - [`filter`] - axum middleware wiring the pipeline into a router

pub mod config;
pub mod filter;
pub mod matcher;
pub mod pipeline;
pub mod session;

pub use config::SamlSsoConfig;
pub use filter::{SsoFilterState, saml_sso_filter};
pub use matcher::CallbackMatcher;
pub use pipeline::{PipelineOutcome, SsoPipeline};
pub use session::MemorySessionStore;
