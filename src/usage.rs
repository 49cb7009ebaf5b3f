//! Tracks which connections have been used during one service assembly run.
//! Kept apart from the network so the network itself never changes.

use crate::network::{Connection, ConnectionId, Network, StationId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionUsage {
    used: Vec<bool>,
    remaining: usize,
}
impl ConnectionUsage {
    /// A marker with every connection of `network` unused
    pub fn new(network: &Network) -> Self {
        let n = network.connections().len();
        Self { used: vec![false; n], remaining: n }
    }

    pub fn is_used(&self, id: ConnectionId) -> bool {
        self.used.get(id.0).copied().unwrap_or(true)
    }

    /// Marks a connection as used, returning whether it was unused before
    pub fn mark_used(&mut self, id: ConnectionId) -> bool {
        match self.used.get_mut(id.0) {
            Some(flag) if !*flag => {
                *flag = true;
                self.remaining -= 1;
                true
            }
            _ => false,
        }
    }

    /// The number of connections not yet used
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Unused connections at a station, in incidence order
    pub fn unused_at<'s, 'n: 's>(
        &'s self,
        network: &'n Network,
        station: StationId,
    ) -> impl Iterator<Item = &'n Connection> + 's {
        network.incident(station).iter()
            .filter(move |&&id| !self.is_used(id))
            .map(move |&id| network.connection(id))
    }
}
