#![forbid(unsafe_code)]

mod background;
mod color;
mod config;
mod constants;
mod gui;
mod input;
mod launch;
mod metrics;
mod overlay;
mod panels;
mod types;
mod window_behavior;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use tracing::{Level as TraceLevel, info, warn};
use tracing_subscriber::FmtSubscriber;

use constants::paths;
use gui::LauncherOptions;

#[derive(Parser, Debug)]
#[command(version, about = "Program launcher with an always-on-top HUD overlay")]
struct Cli {
    /// Settings file to load and save
    #[arg(long, default_value = paths::SETTINGS_FILE)]
    config: PathBuf,

    /// PNG drawn behind the launcher
    #[arg(long, default_value = paths::BACKGROUND_IMAGE)]
    background: PathBuf,

    /// Run the launcher without the overlay window
    #[arg(long)]
    no_overlay: bool,

    /// trace, debug, info, warn or error; overrides LOG_LEVEL
    #[arg(long)]
    log_level: Option<String>,
}

fn parse_level(name: &str) -> TraceLevel {
    match name.to_lowercase().as_str() {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    }
}

fn init_logging(cli_level: Option<&str>) -> Result<()> {
    let level = match cli_level {
        Some(name) => parse_level(name),
        None => parse_level(&std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string())),
    };

    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")?;
    Ok(())
}

/// Ask the launcher to close on SIGINT/SIGTERM so settings still get saved
#[cfg(unix)]
fn register_shutdown(flag: &Arc<AtomicBool>) {
    use signal_hook::consts::{SIGINT, SIGTERM};

    for signal in [SIGINT, SIGTERM] {
        if let Err(e) = signal_hook::flag::register(signal, Arc::clone(flag)) {
            warn!(signal, error = %e, "Failed to register signal handler");
        }
    }
}

#[cfg(not(unix))]
fn register_shutdown(_flag: &Arc<AtomicBool>) {}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref())?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %cli.config.display(),
        "Starting launcher"
    );

    let shutdown = Arc::new(AtomicBool::new(false));
    register_shutdown(&shutdown);

    let input = input::detect();

    gui::run_launcher(LauncherOptions {
        settings_path: cli.config,
        background_path: cli.background,
        overlay_enabled: !cli.no_overlay,
        input,
        shutdown,
    })
}
