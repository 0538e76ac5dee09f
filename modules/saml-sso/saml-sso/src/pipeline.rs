//! SSO authentication pipeline.
//!
//! Drives one callback leg through the per-request state machine
//!
//! ```text
//! Unauthenticated -> AwaitingCallback -> Validating -> Authenticated | Failed
//! ```
//!
//! The Unauthenticated -> AwaitingCallback transition belongs to the
//! upstream anonymous filter: it calls [`SsoPipeline::record_initial_request`]
//! with the protected URI before redirecting the user agent to the
//! IdP. The remaining transitions happen in [`SsoPipeline::handle`],
//! strictly sequentially, one execution per inbound request.

use std::sync::Arc;

use saml_sso_sdk::{
    AssertionValidator, AuthenticationManager, AuthenticationResult, CallbackRequest,
    CredentialExtractor, SessionId, SessionStore, SsoError,
};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::config::SamlSsoConfig;
use crate::matcher::CallbackMatcher;
use crate::session::correlation;

/// Terminal outcome of one pipeline execution.
#[derive(Debug)]
pub enum PipelineOutcome {
    /// The request is not the SSO callback leg; the caller runs the
    /// rest of its chain.
    NotHandled,

    /// Authentication succeeded; exactly one redirect to the original
    /// target is owed, and the correlation state has been cleared.
    Authenticated {
        result: AuthenticationResult,
        redirect: String,
    },

    /// Terminal failure for this request. Correlation state survives
    /// every failure except its own absence, so a legitimate retry
    /// within the same session can still succeed.
    Failed(SsoError),
}

/// Orchestrates match -> extract -> validate -> authenticate -> resume.
pub struct SsoPipeline {
    matcher: CallbackMatcher,
    extractor: Arc<dyn CredentialExtractor>,
    validator: Arc<dyn AssertionValidator>,
    manager: Arc<dyn AuthenticationManager>,
    sessions: Arc<dyn SessionStore>,
}

impl SsoPipeline {
    pub fn new(
        config: &SamlSsoConfig,
        extractor: Arc<dyn CredentialExtractor>,
        validator: Arc<dyn AssertionValidator>,
        manager: Arc<dyn AuthenticationManager>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            matcher: CallbackMatcher::for_callback(config),
            extractor,
            validator,
            manager,
            sessions,
        }
    }

    /// Replace the callback matcher (additional exclusion rules).
    #[must_use]
    pub fn with_matcher(mut self, matcher: CallbackMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Whether `request` is the SSO callback leg. Pure.
    #[must_use]
    pub fn matches(&self, request: &CallbackRequest) -> bool {
        self.matcher.matches(request)
    }

    /// Store the original-request target before the IdP redirect is
    /// issued (the AwaitingCallback precondition).
    ///
    /// # Errors
    ///
    /// Session backend failures.
    pub async fn record_initial_request(
        &self,
        session: &SessionId,
        target: &str,
    ) -> Result<(), SsoError> {
        self.sessions
            .put(session, correlation::INITIAL_REQUEST_URI, Value::from(target))
            .await
    }

    /// Execute one callback leg.
    ///
    /// The correlation target is consumed (read-then-clear as one
    /// logical step) before validation: when duplicate deliveries of
    /// the same callback race, at most one execution observes the
    /// target and can redirect; the rest fail with `SessionLost`. Any
    /// failure after the consume restores the target so that a real
    /// retry still finds it; only success leaves the state cleared.
    #[tracing::instrument(skip_all, fields(session = %session))]
    pub async fn handle(&self, request: &CallbackRequest, session: &SessionId) -> PipelineOutcome {
        if !self.matcher.matches(request) {
            return PipelineOutcome::NotHandled;
        }
        debug!("callback matched, resolving correlation state");

        let target = match self
            .sessions
            .take(session, correlation::INITIAL_REQUEST_URI)
            .await
        {
            Ok(Some(Value::String(target))) => target,
            Ok(Some(other)) => {
                error!(value = ?other, "correlation target has unexpected shape");
                return PipelineOutcome::Failed(SsoError::SessionStore(
                    "correlation target is not a string".to_owned(),
                ));
            }
            Ok(None) => {
                debug!("correlation state absent or already consumed");
                return PipelineOutcome::Failed(SsoError::SessionLost);
            }
            Err(e) => return PipelineOutcome::Failed(e),
        };

        debug!("validating assertion");
        match self.validate_leg(request, session).await {
            Ok(result) => {
                debug!(redirect = %target, "authentication succeeded");
                PipelineOutcome::Authenticated {
                    result,
                    redirect: target,
                }
            }
            Err(e) => {
                self.restore_target(session, &target).await;
                match &e {
                    SsoError::ExtractorMiscue => {
                        error!("matcher fired but extractor found no credential");
                    }
                    SsoError::InvalidAssertion { reason } => {
                        debug!(reason = %reason, "assertion rejected");
                    }
                    SsoError::Rejected(reason) => {
                        debug!(reason = %reason, "credential rejected by authentication manager");
                    }
                    SsoError::SessionLost | SsoError::SessionStore(_) => {
                        error!(error = %e, "pipeline failure");
                    }
                }
                PipelineOutcome::Failed(e)
            }
        }
    }

    /// The Validating state: extract, validate, authenticate.
    async fn validate_leg(
        &self,
        request: &CallbackRequest,
        session: &SessionId,
    ) -> Result<AuthenticationResult, SsoError> {
        let credential = self
            .extractor
            .extract(request, session)
            .await?
            .ok_or(SsoError::ExtractorMiscue)?;

        self.validator.validate(&credential, session).await?;

        self.manager.authenticate(credential).await
    }

    /// Put the consumed target back after a failed attempt.
    async fn restore_target(&self, session: &SessionId, target: &str) {
        if let Err(e) = self
            .sessions
            .put(session, correlation::INITIAL_REQUEST_URI, Value::from(target))
            .await
        {
            warn!(error = %e, "could not restore correlation target after failure");
        }
    }
}
