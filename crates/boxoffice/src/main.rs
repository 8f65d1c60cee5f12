mod catalog;
mod config;
mod demo;
mod state;
mod store;
mod workers;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{config::Config, state::AppState};

/// Boxoffice - event ticketing demo over a cache, a work queue, and pub/sub
#[derive(Parser, Debug)]
#[command(name = "boxoffice")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Pause between demo steps, in milliseconds
    #[arg(long, short, default_value = "1000", env = "DEMO_PAUSE_MS")]
    pause_ms: u64,

    /// Exit after the scripted demo instead of waiting for Ctrl+C
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boxoffice=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let state = AppState::new(&config).await?;

    let events = state.catalog.all_events().await?;
    tracing::info!(events = events.len(), "Event catalog ready");

    // The demo spawns the background units itself, right before the
    // script sections that feed them.
    let workers = demo::run(&state, Duration::from_millis(cli.pause_ms)).await?;

    if cli.once {
        tracing::info!("Demo finished");
    } else {
        tracing::info!("Demo finished, press Ctrl+C to exit");
        shutdown_signal().await;
    }

    // Stop the background units and wait for them to wind down
    state.signal_shutdown();
    for worker in workers {
        let _ = worker.await;
    }

    tracing::info!("Stopped");
    Ok(())
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
