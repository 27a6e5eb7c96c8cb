//! Configuration, types, and shared structures for curvetone.
//!
//! This crate contains the grid types, the error enum, and the configuration
//! logic used across the curvetone workspace.

pub mod config;
pub mod error;
pub mod gamma;
pub mod grid;

pub use config::{CurveKind, DistributionKind, HalftoneConfig, HalftoneParams};
pub use error::HalftoneError;
pub use gamma::GammaLut;
pub use grid::{Bitmap, Coord, IntensityGrid};

/// Result alias for the halftoning core.
pub type Result<T> = std::result::Result<T, HalftoneError>;
