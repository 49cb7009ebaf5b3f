//! A service is the set of tracks generated in one assembly run,
//! and is the unit that gets scored.

use std::collections::HashSet;

use crate::{network::{ConnectionId, Network}, score, track::Track};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Service {
    tracks: Vec<Track>,
}
impl Service {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn into_tracks(self) -> Vec<Track> {
        self.tracks
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn total_time(&self) -> f64 {
        self.tracks.iter().map(Track::total_time).sum()
    }

    /// Connections traversed, counted once per track they appear in
    pub fn connection_count(&self) -> usize {
        self.tracks.iter().map(Track::connection_count).sum()
    }

    pub fn critical_count(&self) -> usize {
        self.tracks.iter().map(Track::critical_count).sum()
    }

    /// Percentage (0 to 100) of traversed connections that are critical.
    /// An empty service has 0.
    pub fn critical_percentage(&self) -> f64 {
        match self.connection_count() {
            0 => 0.0,
            n => self.critical_count() as f64 / n as f64 * 100.0,
        }
    }

    /// Distinct connections covered by any track
    pub fn covered(&self) -> HashSet<ConnectionId> {
        self.tracks.iter().flat_map(|t| t.connections().iter().copied()).collect()
    }

    /// Percentage (0 to 100) of the network's critical connections covered
    pub fn critical_coverage(&self, network: &Network) -> f64 {
        let total = network.critical_connection_count();
        if total == 0 {
            return 0.0;
        }
        let covered = self.covered().into_iter()
            .filter(|&id| network.connection(id).critical)
            .count();
        covered as f64 / total as f64 * 100.0
    }

    pub fn score(&self) -> f64 {
        score::score(self.critical_percentage(), self.track_count(), self.total_time())
    }
}
