//! Type aliases shared across GeoTrace crates

pub mod aliases;

pub use aliases::*;
