//! The fitness of a service, where higher is better.
//!
//! `score = p * (10000 - (t * 20 + total_time / 100000))`
//!
//! The critical percentage `p` multiplies everything, so a service
//! without critical connections scores 0. The time term is small
//! enough to only separate otherwise similar services.

pub const BASE_SCORE: f64 = 10_000.0;
pub const TRACK_PENALTY: f64 = 20.0;
pub const TIME_DIVISOR: f64 = 100_000.0;

/// Scores a service from its critical percentage (0 to 100),
/// number of tracks and total travel time. No clamping is done.
pub fn score(critical_percentage: f64, track_count: usize, total_time: f64) -> f64 {
    let penalty = track_count as f64 * TRACK_PENALTY + total_time / TIME_DIVISOR;
    critical_percentage * (BASE_SCORE - penalty)
}
