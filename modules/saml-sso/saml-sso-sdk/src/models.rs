//! Credential and request models for the `saml_sso` module.

use std::collections::HashMap;
use std::fmt;

use http::Method;
use serde::{Deserialize, Serialize};

/// Browser session identifier (16 random bytes, hex-encoded in the
/// session cookie).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId([u8; 16]);

impl SessionId {
    /// Generate a new random session ID.
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }

    /// Hex form, as carried in the session cookie.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from the hex cookie value.
    #[must_use]
    pub fn from_hex(s: &str) -> Option<Self> {
        let bytes = hex::decode(s).ok()?;
        let arr: [u8; 16] = bytes.try_into().ok()?;
        Some(Self(arr))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A materialized inbound request, as seen by the callback matcher and
/// the credential extractor.
///
/// `form` is `Some` only when the body was present and parseable as a
/// form; anything else (no body, non-form content) is `None`.
#[derive(Debug, Clone)]
pub struct CallbackRequest {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub form: Option<HashMap<String, String>>,
}

impl CallbackRequest {
    /// Whether the form body carries `field`.
    #[must_use]
    pub fn has_form_field(&self, field: &str) -> bool {
        self.form.as_ref().is_some_and(|f| f.contains_key(field))
    }

    /// Whether the query string carries `param`.
    #[must_use]
    pub fn has_query_param(&self, param: &str) -> bool {
        self.query.contains_key(param)
    }
}

/// The signed statement asserting a user's authenticated identity,
/// extracted from a callback request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamlCredential {
    /// Assertion ID, unique per assertion (replay detection input).
    pub assertion_id: String,

    /// Subject NameID.
    pub name_id: String,

    /// NameID format URN, when the IdP provided one.
    pub name_id_format: Option<String>,

    /// Entity ID of the issuing IdP.
    pub idp_entity_id: String,

    /// Session index from the assertion (used for single logout).
    pub session_index: Option<String>,

    /// Released attributes; SAML allows multi-valued attributes.
    pub attributes: HashMap<String, Vec<String>>,
}

/// The identity carried forward after validation and acceptance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedPrincipal {
    pub name_id: String,
    pub idp_entity_id: String,
    pub attributes: HashMap<String, Vec<String>>,
}

/// Outcome of a successful callback leg.
///
/// Produced once per callback, consumed exactly once by the success
/// handler, never persisted beyond the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    pub principal: AuthenticatedPrincipal,
}

impl From<SamlCredential> for AuthenticatedPrincipal {
    fn from(credential: SamlCredential) -> Self {
        Self {
            name_id: credential.name_id,
            idp_entity_id: credential.idp_entity_id,
            attributes: credential.attributes,
        }
    }
}
