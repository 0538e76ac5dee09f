//! Error taxonomy of the SSO callback pipeline.

use thiserror::Error;

/// Errors that can occur while handling the SSO callback leg.
///
/// `SessionLost`, `InvalidAssertion` and `Rejected` are ordinary
/// authentication failures and are converted to a 401 or a
/// redirect-to-login by the filter. `ExtractorMiscue` and
/// `SessionStore` indicate defects and surface as server errors.
#[derive(Debug, Error)]
pub enum SsoError {
    /// Correlation state missing, expired or already consumed at
    /// callback time. A normal consequence of replay, expiry or
    /// client-side session loss.
    #[error("session correlation state lost")]
    SessionLost,

    /// Cryptographic or temporal rejection of the assertion. The
    /// reason is for logs only and must not reach the client.
    #[error("assertion validation failed")]
    InvalidAssertion {
        /// Internal reason, never surfaced to the user agent.
        reason: String,
    },

    /// The matcher matched but no credential could be extracted.
    /// Matcher/extractor disagreement is a configuration defect.
    #[error("matched callback carried no extractable credential")]
    ExtractorMiscue,

    /// The authentication manager rejected a validated credential for
    /// policy reasons.
    #[error("credential rejected: {0}")]
    Rejected(String),

    /// Session backend failure.
    #[error("session store failure: {0}")]
    SessionStore(String),
}

impl SsoError {
    pub fn invalid_assertion(reason: impl Into<String>) -> Self {
        Self::InvalidAssertion {
            reason: reason.into(),
        }
    }

    /// Whether this is an ordinary authentication failure (as opposed
    /// to an internal defect).
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::SessionLost | Self::InvalidAssertion { .. } | Self::Rejected(_)
        )
    }
}
