//! CLI argument parsing with clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::build;

/// Load and merge application configuration from remote JSON documents
#[derive(Parser, Debug)]
#[command(name = "runtime-config")]
#[command(about = "Load and merge application configuration from remote JSON documents")]
#[command(long_about = "
runtime-config resolves a list of configuration URLs, fetches every JSON
document concurrently, merges them in declaration order (later documents win
per key) and prints the merged configuration. Any failing document aborts the
whole load.

EXAMPLES:
    # Load ./config.json relative to a base URL
    runtime-config load --base-url https://app.example.com/

    # Layer an environment document over a common one
    runtime-config load --base-url https://app.example.com/ \\
        --url config.common.json --url config.LOCAL.json

    # Use config/config.common.json + config/config.<env>.json
    runtime-config --env production load --base-url https://app.example.com/ --layered config

    # Show the URLs that would be fetched
    runtime-config resolve --base-url https://app.example.com/ --url /config.json
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute (default: load)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Settings file path
    ///
    /// TOML file with [source], [client] and [logger] sections.
    /// Defaults to ./runtime-config.toml when present.
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects the environment document for layered sources.
    #[arg(short, long, value_enum)]
    pub env: Option<EnvironmentArg>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Where configuration documents come from
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceArgs {
    /// Configuration document URL; repeat to layer documents in order
    #[arg(short, long = "url", value_name = "URL", value_parser = super::validation::validate_url)]
    pub urls: Vec<String>,

    /// Directory holding config.common.json and config.<env>.json
    #[arg(long, value_name = "DIR", conflicts_with = "urls")]
    pub layered: Option<String>,

    /// Base URL relative document URLs are joined against
    #[arg(short, long, value_name = "URL", value_parser = super::validation::validate_url)]
    pub base_url: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch, merge and print the configuration (default)
    Load {
        #[command(flatten)]
        source: SourceArgs,

        /// Log the merged configuration after loading
        #[arg(long)]
        log_config: bool,

        /// Request timeout in seconds (no timeout by default)
        #[arg(short, long, value_name = "SECONDS", value_parser = super::validation::validate_timeout)]
        timeout: Option<u64>,
    },
    /// Print the absolute URLs that would be fetched, without fetching
    Resolve {
        #[command(flatten)]
        source: SourceArgs,
    },
}

impl Commands {
    pub fn source(&self) -> &SourceArgs {
        match self {
            Commands::Load { source, .. } | Commands::Resolve { source } => source,
        }
    }
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvironmentArg {
    #[value(name = "local")]
    Local,
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

impl From<EnvironmentArg> for crate::config::Environment {
    fn from(arg: EnvironmentArg) -> Self {
        use crate::config::Environment;
        match arg {
            EnvironmentArg::Local => Environment::Local,
            EnvironmentArg::Development => Environment::Development,
            EnvironmentArg::Test => Environment::Test,
            EnvironmentArg::Staging => Environment::Staging,
            EnvironmentArg::Production => Environment::Production,
        }
    }
}

impl Cli {
    /// Log level implied by --verbose / --quiet
    pub fn log_level_override(&self) -> Option<&'static str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        }
    }
}
