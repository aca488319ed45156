//! Command-line interface handling for the Horizon inventory runtime.
//!
//! Options given here override the matching settings of the configuration file.

use clap::{value_parser, Arg, Command};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Command line arguments parsed from user input.
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Path to the configuration file
    pub config_path: PathBuf,
    /// Optional override for log level
    pub log_level: Option<String>,
    /// Whether to force JSON log output
    pub json_logs: bool,
    /// Optional override for the NPC tick interval in milliseconds
    pub tick_interval_ms: Option<u64>,
}

impl CliArgs {
    /// Parses the process arguments.
    pub fn parse() -> Self {
        Self::from_matches(Self::command().get_matches())
    }

    /// Parses an explicit argument list, for tests and embedding.
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Ok(Self::from_matches(Self::command().try_get_matches_from(args)?))
    }

    fn command() -> Command {
        Command::new("Horizon Inventory Runtime")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Headless host for inventory sessions and NPC behaviors")
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path")
                    .default_value(DEFAULT_CONFIG_PATH),
            )
            .arg(
                Arg::new("log-level")
                    .short('l')
                    .long("log-level")
                    .value_name("LEVEL")
                    .help("Log level (trace, debug, info, warn, error)"),
            )
            .arg(
                Arg::new("json-logs")
                    .long("json-logs")
                    .help("Output logs in JSON format")
                    .action(clap::ArgAction::SetTrue),
            )
            .arg(
                Arg::new("tick-interval")
                    .short('t')
                    .long("tick-interval")
                    .value_name("MS")
                    .help("NPC tick interval in milliseconds (0 disables ticking)")
                    .value_parser(value_parser!(u64)),
            )
    }

    fn from_matches(matches: clap::ArgMatches) -> Self {
        Self {
            config_path: matches
                .get_one::<String>("config")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH)),
            log_level: matches.get_one::<String>("log-level").cloned(),
            json_logs: matches.get_flag("json-logs"),
            tick_interval_ms: matches.get_one::<u64>("tick-interval").copied(),
        }
    }
}
