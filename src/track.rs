//! A track is one generated route: a connected walk over the network.

use itertools::Itertools;

use crate::network::{ConnectionId, Network, StationId};

/// A connected walk, stored both as the stations visited
/// and the connections travelled between them
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Always one longer than `connections`
    stations: Vec<StationId>,
    connections: Vec<ConnectionId>,
    total_time: f64,
    critical_count: usize,
}
impl Track {
    /// Follows `connections` from `start`, returning `None` if any
    /// connection is missing from the network or does not continue the walk
    pub fn walk(network: &Network, start: StationId, connections: &[ConnectionId]) -> Option<Self> {
        if connections.is_empty() || start.0 >= network.stations().len() {
            return None;
        }
        let mut stations = Vec::with_capacity(connections.len() + 1);
        stations.push(start);
        let mut total_time = 0.0;
        let mut critical_count = 0;
        let mut current = start;
        for &id in connections {
            let connection = network.get_connection(id)?;
            current = connection.other(current)?;
            stations.push(current);
            total_time += connection.time;
            if connection.critical {
                critical_count += 1;
            }
        }
        Some(Self { stations, connections: connections.to_vec(), total_time, critical_count })
    }

    /// Assembles a track from parts the caller already accumulated
    pub(crate) fn from_parts(
        stations: Vec<StationId>,
        connections: Vec<ConnectionId>,
        total_time: f64,
        critical_count: usize,
    ) -> Self {
        debug_assert_eq!(stations.len(), connections.len() + 1);
        Self { stations, connections, total_time, critical_count }
    }

    pub fn stations(&self) -> &[StationId] {
        &self.stations
    }

    pub fn connections(&self) -> &[ConnectionId] {
        &self.connections
    }

    pub fn start(&self) -> StationId {
        self.stations[0]
    }

    pub fn end(&self) -> StationId {
        self.stations[self.stations.len() - 1]
    }

    /// Sum of travel times of every connection
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    pub fn critical_count(&self) -> usize {
        self.critical_count
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// The same walk travelled the other way
    pub fn reversed(&self) -> Self {
        Self {
            stations: self.stations.iter().rev().copied().collect_vec(),
            connections: self.connections.iter().rev().copied().collect_vec(),
            total_time: self.total_time,
            critical_count: self.critical_count,
        }
    }

    /// Joins two tracks sharing an end station into one walk,
    /// reversing either where needed
    pub fn join(&self, other: &Track) -> Option<Self> {
        let (first, second) = if self.end() == other.start() {
            (self.clone(), other.clone())
        } else if other.end() == self.start() {
            (other.clone(), self.clone())
        } else if self.start() == other.start() {
            (self.reversed(), other.clone())
        } else if self.end() == other.end() {
            (self.clone(), other.reversed())
        } else {
            return None;
        };
        let mut stations = first.stations;
        stations.extend_from_slice(&second.stations[1..]);
        let mut connections = first.connections;
        connections.extend_from_slice(&second.connections);
        Some(Self {
            stations,
            connections,
            total_time: first.total_time + second.total_time,
            critical_count: first.critical_count + second.critical_count,
        })
    }
}
