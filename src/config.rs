//! Run parameters for the optimiser, readable from TOML

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("max tracks per service must be positive")]
    NonPositiveMaxTracks,
    #[error("max time per track must be a positive number, got {0}")]
    InvalidMaxTrackTime(f64),
    #[error("number of services to generate must be positive")]
    NonPositiveServiceCount,
    #[error("critical preference must be a non-negative number, got {0}")]
    InvalidCriticalPreference(f64),
}

/// Post-assembly refinements, all off by default
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(default)]
pub struct RefineConfig {
    /// Drop tracks that traverse no critical connection
    pub prune_non_critical: bool,
    /// Join tracks meeting end to end while within the time limit
    pub merge_tracks: bool,
}

/// Parameters of one optimisation run.
/// Varying these changes both the quality and the speed of the search.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// The most tracks a single service may contain
    pub max_tracks: usize,
    /// The longest a single track may take, in minutes
    pub max_track_time: f64,
    /// How many services to generate
    pub services: usize,
    /// Extra draw weight given to critical connections while building a track
    #[serde(default = "default_critical_preference")]
    pub critical_preference: f64,
    /// Seed for replaying a run; a random one is used when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Generate services on the rayon thread pool
    #[serde(default)]
    pub parallel: bool,
    #[serde(default)]
    pub refine: RefineConfig,
}

fn default_critical_preference() -> f64 {
    1.0
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::new(7, 120.0, 1000)
    }
}

impl PlannerConfig {
    pub fn new(max_tracks: usize, max_track_time: f64, services: usize) -> Self {
        Self {
            max_tracks,
            max_track_time,
            services,
            critical_preference: default_critical_preference(),
            seed: None,
            parallel: false,
            refine: RefineConfig::default(),
        }
    }

    /// Checks every parameter is in its domain
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_tracks == 0 {
            return Err(ConfigError::NonPositiveMaxTracks);
        }
        if !(self.max_track_time.is_finite() && self.max_track_time > 0.0) {
            return Err(ConfigError::InvalidMaxTrackTime(self.max_track_time));
        }
        if self.services == 0 {
            return Err(ConfigError::NonPositiveServiceCount);
        }
        if !(self.critical_preference.is_finite() && self.critical_preference >= 0.0) {
            return Err(ConfigError::InvalidCriticalPreference(self.critical_preference));
        }
        Ok(())
    }
}
