//! Row-per-service records for reporting, and plain-text track summaries

use std::io::Write;

use itertools::Itertools;
use serde::Serialize;

use crate::{error::PlannerError, network::Network, optimize::Outcome, track::Track};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ServiceRecord {
    pub service: usize,
    pub score: f64,
    pub tracks: usize,
    pub total_time: f64,
    pub critical_percentage: f64,
    /// Share of the network's critical connections covered, in percent
    pub critical_coverage: f64,
}

pub fn records(network: &Network, outcome: &Outcome) -> Vec<ServiceRecord> {
    outcome.services().iter().map(|s| ServiceRecord {
        service: s.index,
        score: s.score,
        tracks: s.service.track_count(),
        total_time: s.service.total_time(),
        critical_percentage: s.service.critical_percentage(),
        critical_coverage: s.service.critical_coverage(network),
    }).collect_vec()
}

/// Writes one CSV row per generated service, with a header
pub fn write_scores_csv<W: Write>(
    writer: W,
    network: &Network,
    outcome: &Outcome,
) -> Result<(), PlannerError> {
    let mut out = csv::Writer::from_writer(writer);
    for record in records(network, outcome) {
        out.serialize(record)?;
    }
    out.flush().map_err(|e| PlannerError::Csv(e.into()))
}

/// Station names along a track, e.g. `Den Helder - Alkmaar - Hoorn (84 min)`
pub fn describe_track(network: &Network, track: &Track) -> String {
    let route = track.stations().iter().map(|&s| network.station(s).name.as_str()).join(" - ");
    format!("{route} ({} min)", track.total_time())
}
