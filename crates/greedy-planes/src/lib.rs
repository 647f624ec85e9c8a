#![deny(clippy::correctness)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::pedantic,
    clippy::nursery,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::cast_lossless
)]
#![doc = include_str!("../README.md")]

pub mod clustering;
pub mod config;
pub mod cost;
pub mod partition;
pub mod search;

#[cfg(feature = "disk-io")]
mod io;

pub use clustering::{Clustering, GreedyClustering, GreedyMovingKl};
pub use config::SearchConfig;
pub use cost::CostTable;
pub use partition::{Destination, PartitionState};
pub use search::{Move, MoveEvaluator, PassReport};

#[cfg(feature = "disk-io")]
pub use io::DiskIO;

/// The current version of the crate.
pub const VERSION: &str = "0.1.0";
