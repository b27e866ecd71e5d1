//! Macropad: record, arm and replay keyboard and mouse macros.

mod app;
mod cli;
mod config;
mod enigo_injector;
mod error;
mod rdev_hook;

pub(crate) use {
    app::App,
    cli::{Cli, Command},
    enigo_injector::EnigoInjector,
    error::{AppError, Result as AppResult},
    rdev_hook::RdevHook,
};

use crate::config::{Config, DEFAULT_LOG_FILTER, LoggingConfig};

use std::sync::Arc;

use clap::Parser;
use macropad_core::KeySymbolCatalog;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Application entry point.
fn main() {
    let cli = Cli::parse();

    let config = Config::load();
    match &config {
        Ok(config) => init_tracing(&config.logging),
        Err(_) => init_tracing(&LoggingConfig {
            filter: DEFAULT_LOG_FILTER.to_string(),
            json: false,
        }),
    }

    let config = match config {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    let catalog = Arc::new(KeySymbolCatalog::standard());
    let app = App::new(
        config,
        Arc::clone(&catalog),
        Arc::new(RdevHook::new(catalog)),
        Arc::new(EnigoInjector::new()),
    );

    if let Err(e) = runtime.block_on(app.execute(cli.command)) {
        error!(error = ?e, "Command failed");
        std::process::exit(1);
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the configured filter.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
