//! Command-line interface parsing for the countrydex binary
//!
//! The binary is a thin consumer of [`QueryService`](crate::service::QueryService):
//! one subcommand per query plus `cache` to show what is stored on disk.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::config::{CategoryDelays, ServiceConfig};
use crate::data::Region;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified region name is not recognized
    #[error("Invalid region: '{0}'. Valid regions: africa, americas, asia, europe, oceania")]
    InvalidRegion(String),
}

/// Look up countries by capital, name, region, or ISO code
#[derive(Parser, Debug)]
#[command(name = "countrydex")]
#[command(about = "Country lookups with a cached last result per search")]
#[command(version)]
pub struct Cli {
    /// Base URL of the country API
    #[arg(long, value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Directory the cache snapshot is stored in (defaults to the XDG cache dir)
    #[arg(long, value_name = "DIR", global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Skip the pacing delay on capital searches
    #[arg(long, global = true)]
    pub no_delay: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search countries by capital city
    Capital { term: String },
    /// Search countries by name
    Country { term: String },
    /// List the countries of a region
    ///
    /// Valid regions: africa, americas, asia, europe, oceania
    Region {
        #[arg(value_parser = parse_region_arg)]
        region: Region,
    },
    /// Look up one country by ISO alpha-2 or alpha-3 code
    Alpha { code: String },
    /// Show the cached result of each search category
    Cache,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    /// Settings passed to the query service
    pub service: ServiceConfig,
    /// Explicit cache directory, if one was given
    pub cache_dir: Option<PathBuf>,
}

/// Parses a region string argument into a Region.
///
/// # Returns
/// * `Ok(Region)` if the string names a region, ignoring case
/// * `Err(CliError::InvalidRegion)` otherwise
pub fn parse_region_arg(s: &str) -> Result<Region, CliError> {
    Region::parse(s).ok_or_else(|| CliError::InvalidRegion(s.to_string()))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        let mut service = ServiceConfig::default();
        if let Some(base_url) = &cli.base_url {
            service.base_url = base_url.clone();
        }
        if cli.no_delay {
            service.delays = CategoryDelays::none();
        }

        StartupConfig {
            service,
            cache_dir: cli.cache_dir.clone(),
        }
    }
}
