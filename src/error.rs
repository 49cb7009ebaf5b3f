use std::path::PathBuf;

use crate::{config::ConfigError, network::NetworkError};

/// Anything that can stop a run before or after the search itself
#[derive(thiserror::Error, Debug)]
pub enum PlannerError {
    /// The run parameters failed validation
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// The network description could not be built into a network
    #[error("invalid network: {0}")]
    Network(#[from] NetworkError),
    /// Reading or writing a file failed
    #[error("failed to access {}: {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("failed to parse {}: {source}", .path.display())]
    TomlParse { path: PathBuf, source: toml::de::Error },
    #[error("failed to write TOML: {0}")]
    TomlWrite(#[from] toml::ser::Error),
    /// A CSV file was malformed, or a report could not be written
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Neither a TOML network nor a pair of CSV files was given
    #[error("no network given: pass --network, or both --stations and --connections")]
    MissingNetwork,
}
