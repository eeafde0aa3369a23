use std::fmt;

/// Name of the cookie the backend reads the session token from.
pub const SESSION_COOKIE_NAME: &str = "better-auth.session_token";

const FRAGMENT_TOKEN_PREFIX: &str = "#token=";

/// Session token sent to the backend as a cookie.
///
/// The token is never printed; `Debug` redacts it.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCredentials {
    token: String,
}

impl SessionCredentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Extracts a token from a URL fragment of the form `#token=<value>`.
    ///
    /// Returns `None` when the fragment has another shape or the token is
    /// empty.
    pub fn from_url_fragment(fragment: &str) -> Option<Self> {
        let token = fragment.strip_prefix(FRAGMENT_TOKEN_PREFIX)?;
        let token = token.split('&').next().unwrap_or_default().trim();
        if token.is_empty() {
            return None;
        }
        let decoded = urlencoding::decode(token)
            .map(|t| t.into_owned())
            .unwrap_or_else(|_| token.to_string());
        Some(Self::new(decoded))
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value for the `Cookie` request header.
    pub fn cookie_header(&self) -> String {
        format!("{SESSION_COOKIE_NAME}={}", self.token)
    }
}

impl fmt::Debug for SessionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredentials")
            .field("token", &"<redacted>")
            .finish()
    }
}
