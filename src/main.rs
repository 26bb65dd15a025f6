//! KUtils command line entry point.
//!
//! Loads the settings file, initializes logging and dispatches the parsed
//! subcommand against a file-backed preference store.

use std::io::{stderr, stdout};

use {
    anyhow::Result,
    clap::Parser,
    tracing_subscriber::EnvFilter,
};

use kutils::{
    cli::{Cli, run},
    config::SettingsManager,
    error::{ErrorReporter, ResultExt},
    prefs::PreferencesManager,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings_manager = match &cli.config {
        Some(path) => SettingsManager::with_config_path(path.clone()),
        None => SettingsManager::new(),
    }
    .add_context("load settings")?;
    let mut settings = settings_manager.get_settings().clone();
    if let Some(prefs_dir) = cli.prefs_dir {
        settings.prefs_dir = prefs_dir;
    }

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stderr)
        .init();

    let prefs = PreferencesManager::from_settings(&settings)
        .add_contextf(format_args!("open preferences in {:?}", settings.prefs_dir))?;

    let mut out = stdout().lock();
    if let Err(error) = run(cli.command, &prefs, &mut out) {
        ErrorReporter::error(&error, "command");
        eprintln!("error: {}", ErrorReporter::to_user_message(&error));
        std::process::exit(1);
    }
    Ok(())
}
