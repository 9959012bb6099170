use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, error, info, Level};
use tracing_subscriber::{self, EnvFilter};

mod client;
mod config;
mod display;
mod error;
mod poller;
mod stats;

use crate::client::StatsClient;
use crate::config::Config;
use crate::display::ConsoleDisplay;
use crate::error::{ErrorRecovery, StatswatchError};
use crate::poller::{PollerHandle, StatsPoller};

#[derive(Parser)]
#[command(name = "statswatch")]
#[command(about = "Polls verification statistics from a dashboard endpoint and renders them in the terminal")]
#[command(version)]
struct Cli {
    /// Path to configuration file (can also be set via STATSWATCH_CONFIG env var)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Enable verbose logging (equivalent to --log-level debug)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Get config path from CLI arg or STATSWATCH_CONFIG environment variable
    fn config_path(&self) -> Option<PathBuf> {
        self.config
            .clone()
            .or_else(|| std::env::var("STATSWATCH_CONFIG").ok().map(PathBuf::from))
    }
}

/// Initialize structured logging from CLI args, config, or environment
fn init_logging(config: &Config, cli: &Cli) -> Result<(), StatswatchError> {
    let log_level = if cli.verbose {
        "debug"
    } else if let Some(ref level) = cli.log_level {
        level.as_str()
    } else {
        config.logging().level.as_deref().unwrap_or("info")
    };

    // Validate log level
    let _level = match log_level.to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => {
            return Err(StatswatchError::InvalidData(format!(
                "Invalid log level: {log_level}. Valid levels are: error, warn, info, debug, trace"
            )));
        }
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(|e| StatswatchError::InvalidData(format!("Failed to create log filter: {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .init();

    debug!("Logging initialized with level: {}", log_level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), StatswatchError> {
    let cli = Cli::parse();

    // Load configuration first
    let config = match Config::load(cli.config_path()) {
        Ok(config) => config,
        Err(e) => {
            // Initialize basic logging for configuration errors
            tracing_subscriber::fmt().init();
            let error = StatswatchError::Config(e);
            error!("Configuration error: {}", error);
            error!("Please check your configuration file and environment variables");
            return Err(StatswatchError::Shutdown);
        }
    };

    // Initialize structured logging
    if let Err(e) = init_logging(&config, &cli) {
        eprintln!("Failed to initialize logging: {e}");
        return Err(e);
    }

    info!("Starting statswatch v{}", env!("CARGO_PKG_VERSION"));
    info!("Dashboard server: {}", config.server.base_url);
    debug!("Configuration file path: {:?}", cli.config);

    match run_application(config).await {
        Ok(()) => {
            info!("Application shutdown complete");
            Ok(())
        }
        Err(e) => {
            error!("Application error: {}", e);
            if ErrorRecovery::should_shutdown(&e) {
                error!("Fatal error encountered, shutting down application");
            }
            Err(StatswatchError::Shutdown)
        }
    }
}

/// Wire up the stats client, the display, and the poll loop, then run until
/// a shutdown signal arrives.
async fn run_application(config: Config) -> Result<(), StatswatchError> {
    let stats_client = StatsClient::new(&config.server)?;
    info!("Polling {}", stats_client.stats_url());

    let display = ConsoleDisplay::new();
    let poller = StatsPoller::new(stats_client, display);

    let handle = PollerHandle::new(tokio::spawn(poller.run()));

    shutdown_signal().await;
    info!("Shutdown signal received, stopping application");

    handle.stop().await;

    Ok(())
}

/// Wait for a graceful shutdown signal
async fn shutdown_signal() {
    use tokio::signal;

    #[cfg(unix)]
    {
        let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to register SIGTERM handler");
        let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt())
            .expect("Failed to register SIGINT handler");

        tokio::select! {
            _ = sigterm.recv() => {
                info!("Received SIGTERM, initiating graceful shutdown");
            }
            _ = sigint.recv() => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
            }
        }
    }

    #[cfg(not(unix))]
    {
        signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
        info!("Received Ctrl+C, initiating graceful shutdown");
    }
}
