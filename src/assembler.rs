//! Assembles a service by building tracks until the track limit
//! is reached or no further track can be started.

use fastrand::Rng;

use crate::{builder::TrackBuilder, service::Service, usage::ConnectionUsage};

#[derive(Debug, Clone, Copy)]
pub struct ServiceAssembler<'a> {
    builder: TrackBuilder<'a>,
    max_tracks: usize,
}
impl<'a> ServiceAssembler<'a> {
    pub fn new(builder: TrackBuilder<'a>, max_tracks: usize) -> Self {
        Self { builder, max_tracks }
    }

    /// Runs one assembly. Each run starts with every connection unused,
    /// and tracks within the run never share a connection.
    pub fn assemble(&self, rng: &mut Rng) -> Service {
        let mut usage = ConnectionUsage::new(self.builder.network());
        let mut tracks = Vec::with_capacity(self.max_tracks);
        while tracks.len() < self.max_tracks {
            match self.builder.build(&mut usage, rng) {
                Some(track) => tracks.push(track),
                None => break,
            }
        }
        Service::new(tracks)
    }
}
