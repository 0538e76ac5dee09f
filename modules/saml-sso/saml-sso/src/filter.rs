//! Axum middleware wiring the SSO pipeline into a router.
//!
//! For each request:
//! 1. Anything that is not a POST to the callback path passes through
//!    untouched.
//! 2. Candidate callbacks get their body buffered and form-decoded;
//!    an unparseable body simply fails the match and passes through.
//! 3. Matched callbacks are owned by the filter: it answers with the
//!    success redirect or a failure response itself and never runs the
//!    rest of the chain, so at most one response is written per
//!    exchange.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use http::{Method, StatusCode, header};
use saml_sso_sdk::{CallbackRequest, SessionId, SsoError};
use tracing::{debug, error, warn};

use crate::config::SamlSsoConfig;
use crate::pipeline::{PipelineOutcome, SsoPipeline};

/// Shared state for the SSO filter.
#[derive(Clone)]
pub struct SsoFilterState {
    pub pipeline: Arc<SsoPipeline>,
    pub config: Arc<SamlSsoConfig>,
}

/// The SSO callback filter.
pub async fn saml_sso_filter(
    State(state): State<SsoFilterState>,
    req: Request,
    next: Next,
) -> Response {
    if req.method() != Method::POST || req.uri().path() != state.config.callback_path {
        return next.run(req).await;
    }

    let (parts, body) = req.into_parts();
    let bytes = match axum::body::to_bytes(body, state.config.form_body_limit).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "callback body exceeded limit or could not be read");
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
    };

    let callback = CallbackRequest {
        method: parts.method.clone(),
        path: parts.uri.path().to_owned(),
        query: parts
            .uri
            .query()
            .and_then(|q| serde_urlencoded::from_str::<HashMap<String, String>>(q).ok())
            .unwrap_or_default(),
        form: form_fields(&parts.headers, &bytes),
    };

    if !state.pipeline.matches(&callback) {
        // Not the SSO callback leg (logout exchange, foreign POST);
        // reassemble the request for the rest of the chain.
        let req = Request::from_parts(parts, Body::from(bytes));
        return next.run(req).await;
    }

    let Some(session) = session_id(&parts.headers, &state.config.session_cookie) else {
        debug!("matched callback without a resolvable session cookie");
        return failure_response(&state.config, &SsoError::SessionLost);
    };

    match state.pipeline.handle(&callback, &session).await {
        PipelineOutcome::NotHandled => {
            let req = Request::from_parts(parts, Body::from(bytes));
            next.run(req).await
        }
        PipelineOutcome::Authenticated { result, redirect } => {
            debug!(name_id = %result.principal.name_id, "resuming original request");
            Redirect::to(&redirect).into_response()
        }
        PipelineOutcome::Failed(e) => failure_response(&state.config, &e),
    }
}

/// Decode the form body, `None` for absent or non-form content.
fn form_fields(headers: &header::HeaderMap, bytes: &[u8]) -> Option<HashMap<String, String>> {
    let content_type = headers.get(header::CONTENT_TYPE)?.to_str().ok()?;
    if !content_type.starts_with("application/x-www-form-urlencoded") {
        return None;
    }
    serde_urlencoded::from_bytes(bytes).ok()
}

/// Resolve the browser session from the configured cookie.
fn session_id(headers: &header::HeaderMap, cookie_name: &str) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .and_then(|(_, value)| SessionId::from_hex(value))
}

/// Map a pipeline failure to a response without leaking validation
/// internals to the client.
fn failure_response(config: &SamlSsoConfig, err: &SsoError) -> Response {
    if err.is_auth_failure() {
        return match &config.login_entry {
            Some(login) => Redirect::to(login).into_response(),
            None => (StatusCode::UNAUTHORIZED, "authentication failed").into_response(),
        };
    }
    error!(error = %err, "SSO filter internal failure");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use http::header::{COOKIE, HeaderMap, HeaderValue};
    use saml_sso_sdk::SessionId;

    use super::session_id;

    #[test]
    fn session_cookie_is_found_among_others() {
        let sid = SessionId::random();
        let mut headers = HeaderMap::new();
        headers.append(
            COOKIE,
            HeaderValue::from_str(&format!("theme=dark; FEDGATE_SESSION={sid}; lang=en"))
                .expect("valid header"),
        );

        assert_eq!(session_id(&headers, "FEDGATE_SESSION"), Some(sid));
    }

    #[test]
    fn absent_or_malformed_cookie_yields_none() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_id(&headers, "FEDGATE_SESSION"), None);

        headers.append(COOKIE, HeaderValue::from_static("FEDGATE_SESSION=nothex"));
        assert_eq!(session_id(&headers, "FEDGATE_SESSION"), None);
    }
}
