//! Generates sets of train routes ("services") covering a rail network,
//! using a randomised variant of Hierholzer's algorithm, and keeps the
//! service that best balances critical connections, track count and time.

#![warn(rust_2018_idioms)]

pub mod assembler;
pub mod builder;
pub mod config;
pub mod error;
pub mod network;
pub mod optimize;
pub mod parse;
pub mod refine;
pub mod report;
pub mod score;
pub mod service;
pub mod track;
pub mod usage;


pub use config::PlannerConfig;
pub use error::PlannerError;
pub use network::Network;
pub use optimize::{Optimizer, Outcome};
