//! Configuration for the SAML SSO module.

use serde::Deserialize;

/// Configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamlSsoConfig {
    /// Fixed path the IdP posts the assertion back to.
    pub callback_path: String,

    /// Form field carrying the assertion on the callback leg.
    pub assertion_field: String,

    /// Query parameter marking a logout exchange on the callback path.
    /// Its presence forces a non-match so login and logout flows
    /// sharing the URI never collide.
    pub logout_param: String,

    /// Name of the browser session cookie.
    pub session_cookie: String,

    /// Where to send the user agent on ordinary authentication
    /// failures. `None` answers with a bare 401 instead.
    pub login_entry: Option<String>,

    /// Upper bound on the buffered callback body, in bytes.
    pub form_body_limit: usize,
}

impl Default for SamlSsoConfig {
    fn default() -> Self {
        Self {
            callback_path: "/login/saml2/sso".to_owned(),
            assertion_field: "SAMLResponse".to_owned(),
            logout_param: "logoutendpoint".to_owned(),
            session_cookie: "FEDGATE_SESSION".to_owned(),
            login_entry: None,
            form_body_limit: 1024 * 1024,
        }
    }
}
