//! Halftoning engine for curvetone.
//!
//! Slices a curve order into clusters, measures each cluster's mean
//! intensity, and decides which members of the cluster receive ink.

pub mod aggregate;
pub mod assemble;
pub mod cluster;
pub mod distribute;
pub mod pipeline;
pub mod prefilter;

pub use cluster::Partition;
pub use pipeline::{HalftoneStats, Halftoner, halftone};
