//! CLI argument definitions using clap derive

use crate::config::Network;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// flatdb - checksummed flat-file snapshots
///
/// Verifies, inspects and maintains single-object flat files framed with
/// a type tag, a network tag and a trailing checksum.
#[derive(Parser, Debug)]
#[command(name = "flatdb")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "FLATDB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Data directory (overrides config)
    #[arg(long, global = true, env = "FLATDB_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Network whose tag files must carry (overrides config)
    #[arg(long, global = true, env = "FLATDB_NETWORK")]
    pub network: Option<Network>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a flat file's checksum and tags without loading it
    Verify(VerifyArgs),

    /// Show what a flat file contains
    Inspect(InspectArgs),

    /// Work with the expiring key/value cache
    Cache(CacheArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Arguments for the verify command
#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Flat file to verify
    pub file: PathBuf,

    /// Type tag the file must carry
    #[arg(short, long)]
    pub type_tag: String,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the inspect command
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Flat file to inspect
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Subcommand for cache
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Store a value
    Put {
        /// Entry key
        key: String,
        /// Entry value
        value: String,
        /// Seconds until the entry expires
        #[arg(long, default_value = "3600")]
        ttl: i64,
    },

    /// Print a value
    Get {
        /// Entry key
        key: String,
    },

    /// Remove a value
    Remove {
        /// Entry key
        key: String,
    },

    /// List live entries
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Load, drop expired entries and save
    Prune,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_verify() {
        let cli = Cli::parse_from(["flatdb", "verify", "mncache.dat", "--type-tag", "Cache"]);
        match cli.command {
            Commands::Verify(args) => {
                assert_eq!(args.file, PathBuf::from("mncache.dat"));
                assert_eq!(args.type_tag, "Cache");
                assert!(matches!(args.format, OutputFormat::Table));
            }
            _ => panic!("expected Verify command"),
        }
    }

    #[test]
    fn cli_verify_requires_type_tag() {
        assert!(Cli::try_parse_from(["flatdb", "verify", "x.dat"]).is_err());
    }

    #[test]
    fn cli_parses_cache_put() {
        let cli = Cli::parse_from(["flatdb", "cache", "put", "k", "v", "--ttl", "60"]);
        match cli.command {
            Commands::Cache(CacheArgs {
                action: CacheAction::Put { key, value, ttl },
            }) => {
                assert_eq!(key, "k");
                assert_eq!(value, "v");
                assert_eq!(ttl, 60);
            }
            _ => panic!("expected cache put"),
        }
    }

    #[test]
    fn cli_parses_global_overrides() {
        let cli = Cli::parse_from([
            "flatdb",
            "--network",
            "regtest",
            "--data-dir",
            "/tmp/flat",
            "cache",
            "list",
        ]);
        assert_eq!(cli.network, Some(Network::Regtest));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/flat")));
    }

    #[test]
    fn cli_verbose_levels() {
        let cli = Cli::parse_from(["flatdb", "config", "path"]);
        assert_eq!(cli.verbose, 0);

        let cli = Cli::parse_from(["flatdb", "-vv", "config", "path"]);
        assert_eq!(cli.verbose, 2);
    }
}
