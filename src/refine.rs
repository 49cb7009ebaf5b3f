//! Optional clean-up of an assembled service: dropping tracks without
//! critical connections and joining tracks that meet end to end.

use itertools::Itertools;

use crate::{service::Service, track::Track};

/// Keeps only tracks that traverse at least one critical connection
pub fn prune_non_critical(service: Service) -> Service {
    Service::new(service.into_tracks().into_iter().filter(|t| t.critical_count() > 0).collect_vec())
}

/// Repeatedly joins two tracks sharing an end station whose combined
/// time stays within `max_time`, until no such pair is left
pub fn merge_tracks(service: Service, max_time: f64) -> Service {
    let mut tracks = service.into_tracks();
    while let Some((i, j, joined)) = find_merge(&tracks, max_time) {
        // j > i, so removing j first keeps i valid
        tracks.swap_remove(j);
        tracks[i] = joined;
    }
    Service::new(tracks)
}

fn find_merge(tracks: &[Track], max_time: f64) -> Option<(usize, usize, Track)> {
    (0..tracks.len()).tuple_combinations().find_map(|(i, j)| {
        if tracks[i].total_time() + tracks[j].total_time() > max_time {
            return None;
        }
        tracks[i].join(&tracks[j]).map(|joined| (i, j, joined))
    })
}
