use std::{fs::OpenOptions, net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use ledger_web::{API_TOKEN_VAR, AppState, CSRF_TOKEN_VAR, Config, build_router, graceful_shutdown};

/// The web front end for the ledger API.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The base URL of the ledger API.
    #[arg(long, default_value = "http://localhost:8000")]
    api_url: String,

    /// The port to serve the app from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The ledger server's logout URL.
    #[arg(long, default_value = "/logout/")]
    logout_url: String,

    /// How many seconds to wait for the ledger API before giving up on a request.
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// The token sent to the ledger API as `Authorization: Token <token>`.
    #[arg(long, env = API_TOKEN_VAR, hide_env_values = true)]
    api_token: Option<String>,

    /// The CSRF token the ledger server expects in posted forms.
    #[arg(long, env = CSRF_TOKEN_VAR, hide_env_values = true)]
    csrf_token: Option<String>,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let config = Config::new(
        args.api_url,
        args.logout_url,
        Duration::from_secs(args.timeout_secs),
        args.api_token,
        args.csrf_token,
    );
    if config.csrf_token.is_empty() {
        tracing::warn!("{CSRF_TOKEN_VAR} is not set, the ledger server may reject posted forms");
    }

    let api_base_url = config.api_base_url.clone();
    let state = AppState::new(config).expect("Could not create the ledger API client.");

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state));

    tracing::info!("HTTP server listening on {addr}, using the ledger API at {api_base_url}");
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .expect("The server stopped unexpectedly.");
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
