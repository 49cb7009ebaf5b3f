//! Generates many independent services and keeps the best scoring one.
//!
//! Every iteration gets its own generator, seeded from the caller's
//! generator before any work starts. Sequential and parallel runs from
//! the same generator state therefore produce the same services.

use std::sync::atomic::{AtomicUsize, Ordering};

use fastrand::Rng;
use itertools::Itertools;
use rayon::prelude::*;

use crate::{
    assembler::ServiceAssembler, builder::TrackBuilder, config::{ConfigError, PlannerConfig},
    network::Network, refine, service::Service,
};

/// A generated service together with its score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredService {
    /// Position in generation order
    pub index: usize,
    pub service: Service,
    pub score: f64,
}

/// Every generated service and which one scored highest
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    services: Vec<ScoredService>,
    best: usize,
}
impl Outcome {
    fn new(services: Vec<ScoredService>) -> Self {
        // First maximum wins, so ties resolve to the earliest service
        let best = services.iter()
            .enumerate()
            .fold(0, |best, (i, s)| if s.score > services[best].score { i } else { best });
        Self { services, best }
    }

    /// All services in generation order
    pub fn services(&self) -> &[ScoredService] {
        &self.services
    }

    pub fn scores(&self) -> Vec<f64> {
        self.services.iter().map(|s| s.score).collect_vec()
    }

    pub fn best_index(&self) -> usize {
        self.best
    }

    pub fn best(&self) -> &ScoredService {
        &self.services[self.best]
    }
}

/// Runs the search over one network
#[derive(Debug, Clone)]
pub struct Optimizer<'a> {
    network: &'a Network,
    config: PlannerConfig,
}
impl<'a> Optimizer<'a> {
    /// Validates the configuration; nothing can run with an invalid one
    pub fn new(network: &'a Network, config: PlannerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { network, config })
    }

    fn assembler(&self) -> ServiceAssembler<'a> {
        let builder = TrackBuilder::new(
            self.network,
            self.config.max_track_time,
            self.config.critical_preference,
        );
        ServiceAssembler::new(builder, self.config.max_tracks)
    }

    /// Assembles, refines and scores a single service
    pub fn generate(&self, index: usize, seed: u64) -> ScoredService {
        let mut rng = Rng::with_seed(seed);
        let mut service = self.assembler().assemble(&mut rng);
        if self.config.refine.prune_non_critical {
            service = refine::prune_non_critical(service);
        }
        if self.config.refine.merge_tracks {
            service = refine::merge_tracks(service, self.config.max_track_time);
        }
        let score = service.score();
        log::debug!("service {index}: {} tracks, {:.1} min, score {score:.3}",
            service.track_count(), service.total_time());
        ScoredService { index, service, score }
    }

    fn seeds(&self, rng: &mut Rng) -> Vec<u64> {
        (0..self.config.services).map(|_| rng.u64(..)).collect_vec()
    }

    /// Runs sequentially or on the rayon pool, as configured
    pub fn run(&self, rng: &mut Rng) -> Outcome {
        if self.config.parallel {
            self.run_parallel(rng)
        } else {
            self.run_sequential(rng)
        }
    }

    pub fn run_sequential(&self, rng: &mut Rng) -> Outcome {
        self.log_start();
        let seeds = self.seeds(rng);
        let progress = Progress::new(seeds.len());
        let services = seeds.into_iter()
            .enumerate()
            .map(|(i, seed)| {
                let service = self.generate(i, seed);
                progress.report();
                service
            })
            .collect_vec();
        self.finish(services)
    }

    pub fn run_parallel(&self, rng: &mut Rng) -> Outcome {
        self.log_start();
        let seeds = self.seeds(rng);
        let progress = Progress::new(seeds.len());
        let services: Vec<ScoredService> = seeds.into_par_iter()
            .enumerate()
            .map(|(i, seed)| {
                let service = self.generate(i, seed);
                progress.report();
                service
            })
            .collect();
        self.finish(services)
    }

    fn log_start(&self) {
        log::info!("generating {} services over {} stations and {} connections",
            self.config.services, self.network.stations().len(), self.network.connections().len());
        log::info!("at most {} tracks per service, {} min per track",
            self.config.max_tracks, self.config.max_track_time);
    }

    fn finish(&self, services: Vec<ScoredService>) -> Outcome {
        let outcome = Outcome::new(services);
        let best = outcome.best();
        log::info!("best service is #{} with score {:.3}", best.index, best.score);
        outcome
    }
}

/// Counts finished services across threads and reports every tenth of the run
#[derive(Debug)]
pub(crate) struct Progress {
    done: AtomicUsize,
    total: usize,
    step: usize,
}
impl Progress {
    pub(crate) fn new(total: usize) -> Self {
        Self { done: AtomicUsize::new(0), total, step: (total / 10).max(1) }
    }

    /// Counts one more finished service, returning the new count
    /// when a progress line is due
    pub(crate) fn tick(&self) -> Option<usize> {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        (done % self.step == 0 || done == self.total).then_some(done)
    }

    fn report(&self) {
        if let Some(done) = self.tick() {
            log::info!("generated {done}/{} services", self.total);
        }
    }
}
