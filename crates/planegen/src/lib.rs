#![deny(clippy::correctness)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::style,
    clippy::pedantic,
    clippy::nursery,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
#![doc = include_str!("../README.md")]

pub mod collection;
pub mod diagnostics;
pub mod fit;
pub mod instance;
pub mod io;
pub mod plane;

pub use collection::PlaneCollection;
pub use instance::Instance;
pub use plane::Plane;

/// A point in 3D space.
pub type Point = nalgebra::Vector3<f64>;

/// The version of the crate.
pub const VERSION: &str = "0.1.0";
