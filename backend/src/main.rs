//! BMI Calculator
//!
//! Computes BMI, ideal weight and BMR from a short form and keeps the last
//! few results in an XML file.
//!
//! ## Modes
//!
//! - Default: interactive terminal session
//! - `--web`: HTTP API served with Axum

use anyhow::Result;
use bmi_calculator_backend::{
    config::AppConfig, console::Console, repositories::HistoryStore, routes, state::AppState,
};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "bmi-calculator", version, about = "BMI, ideal weight and BMR calculator")]
struct Cli {
    /// Serve the HTTP API instead of the terminal session
    #[arg(long)]
    web: bool,

    /// History file to use instead of the configured one
    #[arg(long, value_name = "PATH")]
    history_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // The terminal session owns stdout, so logs go to stderr there
    init_tracing(!cli.web);

    let mut config = AppConfig::load()?;
    if let Some(path) = cli.history_file {
        config.history.path = path;
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if AppConfig::is_production() { "production" } else { "development" },
        mode = if cli.web { "web" } else { "console" },
        history = %config.history.path.display(),
        "Starting BMI Calculator"
    );

    let store = HistoryStore::open(&config.history.path, config.history.effective_capacity());

    if cli.web {
        serve(config, store).await
    } else {
        run_console(store).await
    }
}

/// Run the HTTP API until a shutdown signal arrives
async fn serve(config: AppConfig, store: HistoryStore) -> Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState::new(config, store);
    let app = routes::create_router(state);

    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Run the terminal session on the blocking pool
async fn run_console(mut store: HistoryStore) -> Result<()> {
    tokio::task::spawn_blocking(move || {
        let mut console = Console::new(io::stdin().lock(), io::stdout());
        console.run(&mut store)
    })
    .await??;

    info!("Session ended");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(to_stderr: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if AppConfig::is_production() {
            "bmi_calculator_backend=info,tower_http=info".into()
        } else if to_stderr {
            "bmi_calculator_backend=warn".into()
        } else {
            "bmi_calculator_backend=debug,tower_http=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if AppConfig::is_production() && to_stderr {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else if AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else if to_stderr {
        subscriber
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    } else {
        // Pretty logging for development
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Graceful shutdown signal handler
///
/// If a handler cannot be installed, that branch never completes.
async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
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
