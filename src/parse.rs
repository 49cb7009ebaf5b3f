//! Reads and writes networks and run configurations

use std::{fs, path::Path};

use serde::Deserialize;

use crate::{
    config::PlannerConfig, error::PlannerError,
    network::{ConnectionDescription, Network, NetworkDescription, Station},
};

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> PlannerError + '_ {
    move |source| PlannerError::Io { path: path.to_path_buf(), source }
}

fn read(path: &Path) -> Result<String, PlannerError> {
    fs::read_to_string(path).map_err(io_error(path))
}

/// Reads a network from a file, in TOML format
pub fn parse_network(path: impl AsRef<Path>) -> Result<Network, PlannerError> {
    let path = path.as_ref();
    let description: NetworkDescription = toml::from_str(&read(path)?)
        .map_err(|source| PlannerError::TomlParse { path: path.to_path_buf(), source })?;
    Ok(Network::from_description(description)?)
}

/// Saves a network in TOML format to a file
pub fn save_network(path: impl AsRef<Path>, network: &Network) -> Result<(), PlannerError> {
    let path = path.as_ref();
    let contents = toml::to_string(&network.to_description())?;
    fs::write(path, contents).map_err(io_error(path))
}

/// Reads a run configuration, in TOML format
pub fn parse_config(path: impl AsRef<Path>) -> Result<PlannerConfig, PlannerError> {
    let path = path.as_ref();
    toml::from_str(&read(path)?)
        .map_err(|source| PlannerError::TomlParse { path: path.to_path_buf(), source })
}

/// A row of a station file: name, latitude, longitude and kind
#[derive(Deserialize)]
struct StationRow(String, f64, f64, String);

/// A row of a connection file: both station names and the travel time
#[derive(Deserialize)]
struct ConnectionRow(String, String, f64);

/// Reads a network from the header-less CSV station and connection files
/// the rail datasets ship as. A station is critical when its kind is `Critical`.
pub fn load_csv_network(
    stations: impl AsRef<Path>,
    connections: impl AsRef<Path>,
) -> Result<Network, PlannerError> {
    let reader = |path: &Path| csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path);

    let stations = reader(stations.as_ref())?
        .deserialize::<StationRow>()
        .map(|row| row.map(|StationRow(name, y, x, kind)| Station {
            name,
            critical: kind == "Critical",
            position: (x, y),
        }))
        .collect::<Result<Vec<_>, _>>()?;
    let connections = reader(connections.as_ref())?
        .deserialize::<ConnectionRow>()
        .map(|row| {
            row.map(|ConnectionRow(from, to, time)| ConnectionDescription { from, to, time })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Network::from_description(NetworkDescription { stations, connections })?)
}
