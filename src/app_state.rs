//! Implements a struct that holds the state of the web server.

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    Error,
    api::{HttpLedgerApi, LedgerApi},
    config::Config,
    theme::Theme,
};

/// The state of the web server.
///
/// Built once at startup, handlers take the narrower states below.
#[derive(Clone)]
pub struct AppState {
    /// The client for the ledger API.
    pub api: Arc<dyn LedgerApi>,

    /// The colours used by the dashboard charts.
    pub theme: Theme,

    /// The token the ledger server expects in posted forms.
    pub csrf_token: String,

    /// Where the logout control posts to.
    pub logout_url: String,
}

impl AppState {
    /// Create a new [AppState] that talks to the ledger API described by `config`.
    ///
    /// # Errors
    /// Returns an error if the API base URL is invalid or the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self, Error> {
        let api = HttpLedgerApi::new(
            &config.api_base_url,
            config.api_token,
            config.request_timeout,
        )?;

        Ok(Self::with_api(
            Arc::new(api),
            config.csrf_token,
            config.logout_url,
        ))
    }

    /// Create a new [AppState] around an existing API client.
    pub fn with_api(api: Arc<dyn LedgerApi>, csrf_token: String, logout_url: String) -> Self {
        Self {
            api,
            theme: Theme::default(),
            csrf_token,
            logout_url,
        }
    }
}

/// The state needed by handlers that only talk to the ledger API.
#[derive(Clone)]
pub struct ApiState {
    pub api: Arc<dyn LedgerApi>,
}

impl FromRef<AppState> for ApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// The state needed to render forms and controls that post to the ledger server.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub csrf_token: String,
    pub logout_url: String,
}

impl FromRef<AppState> for SessionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            csrf_token: state.csrf_token.clone(),
            logout_url: state.logout_url.clone(),
        }
    }
}

/// The state needed by the dashboard chart widgets.
#[derive(Clone)]
pub struct ChartState {
    pub api: Arc<dyn LedgerApi>,
    pub theme: Theme,
}

impl FromRef<AppState> for ChartState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            theme: state.theme.clone(),
        }
    }
}
