//! Runtime settings for the server, gathered from the command line and the environment.

use std::time::Duration;

/// The environment variable holding the optional ledger API token.
pub const API_TOKEN_VAR: &str = "LEDGER_API_TOKEN";

/// The environment variable holding the CSRF token forwarded to the ledger server.
pub const CSRF_TOKEN_VAR: &str = "LEDGER_CSRF_TOKEN";

/// The settings needed to build an [AppState](crate::AppState).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// The base URL of the ledger API, e.g. "http://localhost:8000".
    pub api_base_url: String,
    /// Sent as `Authorization: Token <token>` with every API request when set.
    pub api_token: Option<String>,
    /// Sent as `csrfmiddlewaretoken` with every form that posts to the ledger server.
    pub csrf_token: String,
    /// The ledger server's logout URL, the target of the logout control.
    pub logout_url: String,
    /// How long to wait for the ledger API before giving up on a request.
    pub request_timeout: Duration,
}

impl Config {
    /// Create a config from the server's settings.
    ///
    /// Blank tokens are treated as missing.
    pub fn new(
        api_base_url: String,
        logout_url: String,
        request_timeout: Duration,
        api_token: Option<String>,
        csrf_token: Option<String>,
    ) -> Self {
        let non_blank = |token: Option<String>| token.filter(|token| !token.trim().is_empty());

        Self {
            api_base_url,
            api_token: non_blank(api_token),
            csrf_token: non_blank(csrf_token).unwrap_or_default(),
            logout_url,
            request_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::Config;

    #[test]
    fn keeps_tokens() {
        let config = Config::new(
            "http://ledger.test".to_owned(),
            "/logout/".to_owned(),
            Duration::from_secs(5),
            Some("abc123".to_owned()),
            Some("csrf".to_owned()),
        );

        assert_eq!(config.api_token.as_deref(), Some("abc123"));
        assert_eq!(config.csrf_token, "csrf");
    }

    #[test]
    fn missing_or_empty_tokens() {
        let config = Config::new(
            "http://ledger.test".to_owned(),
            "/logout/".to_owned(),
            Duration::from_secs(5),
            Some("  ".to_owned()),
            None,
        );

        assert_eq!(config.api_token, None);
        assert_eq!(config.csrf_token, "");
    }
}
