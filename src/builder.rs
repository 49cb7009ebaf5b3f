//! Builds single tracks with a randomised variant of Hierholzer's
//! circuit stitching: start at a leaf where possible, then walk over
//! unused connections until the walk is stuck or out of time.
//!
//! The network need not be Eulerian, so a walk may end anywhere.

use fastrand::Rng;

use crate::{network::{Connection, Network, StationId}, track::Track, usage::ConnectionUsage};

/// Builds tracks over one network under a per-track time limit
#[derive(Debug, Clone, Copy)]
pub struct TrackBuilder<'a> {
    network: &'a Network,
    max_time: f64,
    /// Extra draw weight for critical connections, see `choose_connection`
    critical_preference: f64,
}
impl<'a> TrackBuilder<'a> {
    pub fn new(network: &'a Network, max_time: f64, critical_preference: f64) -> Self {
        Self { network, max_time, critical_preference }
    }

    pub fn network(&self) -> &'a Network {
        self.network
    }

    /// Unused connections at `station` that still fit after `elapsed` minutes
    fn feasible(
        &self,
        usage: &ConnectionUsage,
        station: StationId,
        elapsed: f64,
    ) -> Vec<&'a Connection> {
        usage.unused_at(self.network, station)
            .filter(|c| elapsed + c.time <= self.max_time)
            .collect()
    }

    /// Picks a starting station. Stations with a single usable connection
    /// left come first, and of those the ones whose connection is critical.
    /// Returns `None` once no station has a usable connection.
    pub fn choose_start(&self, usage: &ConnectionUsage, rng: &mut Rng) -> Option<StationId> {
        let mut critical_leaves = vec![];
        let mut leaves = vec![];
        let mut open = vec![];
        for station in self.network.station_ids() {
            match self.feasible(usage, station, 0.0).as_slice() {
                [] => continue,
                [only] => {
                    if only.critical {
                        critical_leaves.push(station);
                    }
                    leaves.push(station);
                }
                _ => {}
            }
            open.push(station);
        }
        [critical_leaves, leaves, open].into_iter()
            .find(|tier| !tier.is_empty())
            .map(|tier| tier[rng.usize(..tier.len())])
    }

    /// Weighted random choice among candidates. While the track is not yet
    /// entirely critical, a critical connection raises its critical fraction
    /// and gets weight `1 + critical_preference`; everything else weighs 1.
    fn choose_connection(
        &self,
        candidates: &[&'a Connection],
        critical: usize,
        len: usize,
        rng: &mut Rng,
    ) -> &'a Connection {
        let all_critical = len > 0 && critical == len;
        let weight = |c: &Connection| {
            if c.critical && !all_critical { 1.0 + self.critical_preference } else { 1.0 }
        };
        let total: f64 = candidates.iter().map(|&c| weight(c)).sum();
        let mut target = rng.f64() * total;
        for &candidate in candidates {
            target -= weight(candidate);
            if target < 0.0 {
                return candidate;
            }
        }
        // Only reachable through rounding
        candidates[candidates.len() - 1]
    }

    /// Builds one track, marking the connections it uses.
    ///
    /// Returns `None` when no track can be started, which tells the
    /// caller the service is complete.
    pub fn build(&self, usage: &mut ConnectionUsage, rng: &mut Rng) -> Option<Track> {
        let start = self.choose_start(usage, rng)?;
        let mut stations = vec![start];
        let mut connections = vec![];
        let mut elapsed = 0.0;
        let mut critical = 0;
        let mut current = start;

        loop {
            let candidates = self.feasible(usage, current, elapsed);
            if candidates.is_empty() {
                break;
            }
            let chosen = self.choose_connection(&candidates, critical, connections.len(), rng);
            // Never breaks: candidates come from the incidence list of `current`
            let Some(next) = chosen.other(current) else { break };
            usage.mark_used(chosen.id);
            connections.push(chosen.id);
            stations.push(next);
            elapsed += chosen.time;
            if chosen.critical {
                critical += 1;
            }
            current = next;
        }

        if connections.is_empty() {
            return None;
        }
        log::trace!("built track of {} connections, {} min, starting at {}",
            connections.len(), elapsed, self.network.station(start).name);
        Some(Track::from_parts(stations, connections, elapsed, critical))
    }
}
