//! flatdb - flat-file snapshot tool
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use flatdb::cli::{Cli, Commands};
use flatdb::config::{Config, ConfigManager};
use flatdb::error::FlatDbResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> FlatDbResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let mut config = config_manager.load()?;

    init_logging(cli.verbose, &config);
    debug!("Using config {}", config_manager.path().display());

    apply_overrides(&cli, &mut config);

    match cli.command {
        Commands::Verify(args) => flatdb::cli::commands::verify(args, &config),
        Commands::Inspect(args) => flatdb::cli::commands::inspect(args, &config),
        Commands::Cache(args) => flatdb::cli::commands::cache(args, &config),
        Commands::Config(args) => flatdb::cli::commands::config(args, &config, &config_manager),
    }
}

/// Initialize logging: 0 = warn, 1 = info, 2+ = debug
fn init_logging(verbose: u8, config: &Config) {
    let filter = match verbose {
        0 => EnvFilter::new("flatdb=warn"),
        1 => EnvFilter::new("flatdb=info"),
        _ => EnvFilter::new("flatdb=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}

fn apply_overrides(cli: &Cli, config: &mut Config) {
    if let Some(ref dir) = cli.data_dir {
        config.storage.data_dir = Some(dir.clone());
    }
    if let Some(network) = cli.network {
        config.network.name = network;
        config.network.tag = None;
    }
}
