mod platform;

use anyhow::Context;
use clap::Parser;
use fetch_logging::fetch_info;

use platform::{AppConfig, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli).context("failed to load configuration")?;

    fetch_logging::initialize(
        config.log_destination()?,
        config.log_level()?,
        &config.log_file,
    );
    fetch_info!("mediafetch {} starting", env!("CARGO_PKG_VERSION"));
    match &config.source {
        Some(path) => fetch_info!("Loaded config from {:?}", path),
        None => fetch_info!("No config file; using defaults"),
    }

    platform::run_app(&config)
}
