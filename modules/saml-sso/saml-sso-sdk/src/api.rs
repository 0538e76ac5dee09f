//! Capability traits consumed by the SSO pipeline.
//!
//! The extractor/validator pair is the boundary to the SAML protocol
//! library: signature and temporal checks happen behind
//! [`AssertionValidator`] and are a trusted black box here.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::SsoError;
use crate::models::{AuthenticationResult, CallbackRequest, SamlCredential, SessionId};

/// Pulls a credential assertion out of a matched callback request.
#[async_trait]
pub trait CredentialExtractor: Send + Sync {
    /// Extract the assertion, if one is present.
    ///
    /// `Ok(None)` means "nothing to extract" and is distinct from
    /// failure: on a matched request it indicates matcher/extractor
    /// disagreement, which the pipeline reports as a configuration
    /// defect rather than an authentication failure.
    ///
    /// # Errors
    ///
    /// Protocol-library failures while reading the request.
    async fn extract(
        &self,
        request: &CallbackRequest,
        session: &SessionId,
    ) -> Result<Option<SamlCredential>, SsoError>;
}

/// Validates an extracted credential cryptographically and temporally.
#[async_trait]
pub trait AssertionValidator: Send + Sync {
    /// # Errors
    ///
    /// `InvalidAssertion` when signature, issuer or time-window checks
    /// fail.
    async fn validate(
        &self,
        credential: &SamlCredential,
        session: &SessionId,
    ) -> Result<(), SsoError>;
}

/// Downstream acceptance of a validated credential.
#[async_trait]
pub trait AuthenticationManager: Send + Sync {
    /// Turn a validated credential into an authentication result.
    ///
    /// # Errors
    ///
    /// `Rejected` when policy refuses the credential.
    async fn authenticate(
        &self,
        credential: SamlCredential,
    ) -> Result<AuthenticationResult, SsoError>;
}

/// Keyed attributes scoped to one browser session.
///
/// Holds the original-target URI and any opaque correlation data the
/// protocol library needs across the two legs of the flow.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read an attribute without consuming it.
    ///
    /// # Errors
    ///
    /// Backend failures; an absent attribute is `Ok(None)`.
    async fn get(&self, session: &SessionId, key: &str) -> Result<Option<Value>, SsoError>;

    /// Write an attribute.
    ///
    /// # Errors
    ///
    /// Backend failures.
    async fn put(&self, session: &SessionId, key: &str, value: Value) -> Result<(), SsoError>;

    /// Read and clear an attribute as one logical step.
    ///
    /// When two executions race on the same key, at most one observes
    /// the value; the other sees `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Backend failures.
    async fn take(&self, session: &SessionId, key: &str) -> Result<Option<Value>, SsoError>;
}
