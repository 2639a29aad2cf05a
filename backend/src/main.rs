//! Werd backend
//!
//! Serves registration, login and logout over HTML form posts and keeps
//! one server-side session per account.
//!
//! ## Architecture
//!
//! - Routes: HTTP handlers and the session interceptor
//! - Services: authentication and the word bank
//! - Repositories: credential and session storage
//! - Database: PostgreSQL with SQLx

use anyhow::Result;
use clap::Parser;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use werd_backend::{config, db, routes, services::WordBank, state::AppState};

/// How often expired sessions are purged from storage
const SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

#[derive(Parser, Debug)]
#[command(name = "werd", version, about = "Werd authentication server")]
struct Cli {
    /// Verbose logging, including SQL statements
    #[arg(long, env = "WERD_DEBUG")]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing(cli.debug);

    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting Werd backend"
    );

    if config::AppConfig::is_production() {
        check_production_config(&config);
    }

    info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database.url).await?;

    // Production deployments run migrations as a separate step
    if !config::AppConfig::is_production() {
        db::run_migrations(&db_pool).await?;
    }

    let words = load_words(&config.words.dictionary_dir);

    let state = AppState::new(db_pool, words, config.clone());

    tokio::spawn(state.auth().clone().run_session_sweeper(SWEEP_INTERVAL));

    let app = routes::create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(address = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Load the word lists, or start with an empty bank
///
/// `/words` answers 503 until lists are available.
fn load_words(dir: &str) -> WordBank {
    match WordBank::load(dir) {
        Ok(bank) if !bank.is_empty() => {
            info!(words = bank.total_words(), dir, "Word lists loaded");
            bank
        }
        Ok(bank) => {
            warn!(dir, "No word lists found");
            bank
        }
        Err(e) => {
            warn!(dir, "Failed to load word lists: {:#}", e);
            WordBank::default()
        }
    }
}

/// Initialize tracing/logging
fn init_tracing(debug: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            "werd_backend=debug,tower_http=debug,sqlx=debug".into()
        } else if config::AppConfig::is_production() {
            "werd_backend=info,tower_http=info".into()
        } else {
            "werd_backend=debug,tower_http=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Warn about settings that are almost certainly wrong in production
fn check_production_config(config: &config::AppConfig) {
    let url = &config.database.url;
    if url.contains("localhost") || url.contains("127.0.0.1") {
        warn!("Database URL points at localhost - ensure this is intentional for production");
    }
    if url.contains("postgres:password@") {
        error!("Database URL still uses the development credentials");
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
