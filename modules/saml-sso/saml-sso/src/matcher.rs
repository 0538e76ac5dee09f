//! Callback request matcher.
//!
//! A pure, side-effect-free conjunction of predicates over a
//! materialized [`CallbackRequest`]. The SSO callback leg matches only
//! a POST to the configured callback path whose form body carries the
//! assertion field and whose query does not mark a logout exchange.
//! New exclusions compose via [`CallbackMatcher::and`] without touching
//! the existing predicates.

use http::Method;
use saml_sso_sdk::CallbackRequest;

use crate::config::SamlSsoConfig;

type Predicate = Box<dyn Fn(&CallbackRequest) -> bool + Send + Sync>;

/// Conjunctive request matcher.
pub struct CallbackMatcher {
    predicates: Vec<Predicate>,
}

impl CallbackMatcher {
    /// A matcher with no predicates; matches everything until
    /// predicates are added.
    #[must_use]
    pub fn any() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }

    /// The SSO callback matcher for `config`.
    #[must_use]
    pub fn for_callback(config: &SamlSsoConfig) -> Self {
        let path = config.callback_path.clone();
        let field = config.assertion_field.clone();
        let logout = config.logout_param.clone();

        Self::any()
            .and(|req| req.method == Method::POST)
            .and(move |req| req.path == path)
            .and(move |req| req.has_form_field(&field))
            .and(move |req| !req.has_query_param(&logout))
    }

    /// Add a predicate; the matcher matches only when every predicate
    /// holds.
    #[must_use]
    pub fn and(mut self, predicate: impl Fn(&CallbackRequest) -> bool + Send + Sync + 'static) -> Self {
        self.predicates.push(Box::new(predicate));
        self
    }

    /// Evaluate the conjunction. Pure; safe to call repeatedly.
    #[must_use]
    pub fn matches(&self, request: &CallbackRequest) -> bool {
        self.predicates.iter().all(|p| p(request))
    }
}
