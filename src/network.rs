//! The rail network: stations joined by timed connections.
//! A `Network` is built once and only read afterwards, so one instance
//! can be shared by every service generation run.

use std::collections::HashMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Index of a station in its network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(pub usize);

/// Index of a connection in its network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub usize);

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    #[error("station '{0}' is listed more than once")]
    DuplicateStation(String),
    #[error("connection refers to unknown station '{0}'")]
    UnknownStation(String),
    #[error("connection {from} - {to} has invalid travel time {time}")]
    InvalidTime { from: String, to: String, time: f64 },
    #[error("connection from '{0}' to itself")]
    SelfLoop(String),
}

/// A node of the network
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Station {
    pub name: String,
    /// Whether the station is particularly important to serve
    #[serde(default)]
    pub critical: bool,
    /// Map position, only used for drawing
    #[serde(default)]
    pub position: (f64, f64),
}

/// An undirected, timed edge between two stations.
/// A connection is critical iff either endpoint is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub id: ConnectionId,
    pub stations: [StationId; 2],
    pub time: f64,
    pub critical: bool,
}
impl Connection {
    /// The station at the far end when leaving `from`,
    /// or `None` if `from` is not an endpoint
    pub fn other(&self, from: StationId) -> Option<StationId> {
        match self.stations {
            [a, b] if a == from => Some(b),
            [a, b] if b == from => Some(a),
            _ => None,
        }
    }

    pub fn touches(&self, station: StationId) -> bool {
        self.stations.contains(&station)
    }
}

/// A connection as written in a network file
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ConnectionDescription {
    pub from: String,
    pub to: String,
    /// Travel time, in minutes
    pub time: f64,
}

/// The serialisable form of a network
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct NetworkDescription {
    pub stations: Vec<Station>,
    pub connections: Vec<ConnectionDescription>,
}

/// A weighted, undirected multigraph of stations with cached incidence lists
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    stations: Vec<Station>,
    connections: Vec<Connection>,
    /// Connections incident to each station, indexed by `StationId`
    incidence: Vec<Vec<ConnectionId>>,
    by_name: HashMap<String, StationId>,
}
impl Network {
    /// Builds a network from stations and `(from, to, time)` triples.
    /// Parallel connections between the same pair are kept.
    pub fn new(
        stations: Vec<Station>,
        links: impl IntoIterator<Item = (StationId, StationId, f64)>,
    ) -> Result<Self, NetworkError> {
        let mut by_name = HashMap::with_capacity(stations.len());
        for (i, station) in stations.iter().enumerate() {
            if by_name.insert(station.name.clone(), StationId(i)).is_some() {
                return Err(NetworkError::DuplicateStation(station.name.clone()));
            }
        }

        let mut incidence = vec![Vec::new(); stations.len()];
        let mut connections = Vec::new();
        for (a, b, time) in links {
            let name = |s: StationId| {
                stations.get(s.0)
                    .map(|st| st.name.clone())
                    .ok_or_else(|| NetworkError::UnknownStation(format!("#{}", s.0)))
            };
            let (from, to) = (name(a)?, name(b)?);
            if a == b {
                return Err(NetworkError::SelfLoop(from));
            }
            if !(time.is_finite() && time > 0.0) {
                return Err(NetworkError::InvalidTime { from, to, time });
            }
            let id = ConnectionId(connections.len());
            connections.push(Connection {
                id,
                stations: [a, b],
                time,
                critical: stations[a.0].critical || stations[b.0].critical,
            });
            incidence[a.0].push(id);
            incidence[b.0].push(id);
        }

        Ok(Self { stations, connections, incidence, by_name })
    }

    /// Resolves station names and builds the network
    pub fn from_description(description: NetworkDescription) -> Result<Self, NetworkError> {
        let lookup: HashMap<&str, usize> = description.stations.iter()
            .enumerate()
            .map(|(i, s)| (s.name.as_str(), i))
            .collect();
        let links = description.connections.iter().map(|c| {
            let find = |name: &str| lookup.get(name)
                .map(|&i| StationId(i))
                .ok_or_else(|| NetworkError::UnknownStation(name.to_string()));
            Ok((find(&c.from)?, find(&c.to)?, c.time))
        }).collect::<Result<Vec<_>, NetworkError>>()?;
        Self::new(description.stations, links)
    }

    /// Converts back into the serialisable form
    pub fn to_description(&self) -> NetworkDescription {
        NetworkDescription {
            stations: self.stations.clone(),
            connections: self.connections.iter().map(|c| ConnectionDescription {
                from: self.station(c.stations[0]).name.clone(),
                to: self.station(c.stations[1]).name.clone(),
                time: c.time,
            }).collect(),
        }
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn station_ids(&self) -> impl Iterator<Item = StationId> {
        (0..self.stations.len()).map(StationId)
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Panics if `id` does not belong to this network
    pub fn station(&self, id: StationId) -> &Station {
        &self.stations[id.0]
    }

    /// Panics if `id` does not belong to this network
    pub fn connection(&self, id: ConnectionId) -> &Connection {
        &self.connections[id.0]
    }

    pub fn get_connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(id.0)
    }

    pub fn station_by_name(&self, name: &str) -> Option<StationId> {
        self.by_name.get(name).copied()
    }

    /// Connections incident to a station
    pub fn incident(&self, station: StationId) -> &[ConnectionId] {
        &self.incidence[station.0]
    }

    pub fn degree(&self, station: StationId) -> usize {
        self.incidence[station.0].len()
    }

    /// Stations with exactly one incident connection
    pub fn leaf_stations(&self) -> Vec<StationId> {
        self.station_ids().filter(|&s| self.degree(s) == 1).collect_vec()
    }

    pub fn critical_connection_count(&self) -> usize {
        self.connections.iter().filter(|c| c.critical).count()
    }
}
