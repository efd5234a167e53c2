//! Plot types
//!
//! This module contains all the types that make up a plot specification:
//! the main Plot struct, layers, geoms, stats, positions, scales, facets and
//! projections.
//!
//! # Architecture
//!
//! The module is organized into submodules:
//!
//! - `main` - Main Plot struct and Labels/Theme types
//! - `types` - Value types: Mappings, AestheticValue, ParameterValue, etc.
//! - `layer` - Layer struct with the Geom, Stat and Position subsystems
//! - `scale` - Scale and Guide types
//! - `facet` - Facet types for small multiples
//! - `projection` - Projection and coordinate system types

pub mod aesthetic;
pub mod facet;
pub mod layer;
pub mod main;
pub mod projection;
pub mod scale;
pub mod types;

// Re-export all types for convenience
pub use facet::*;
pub use layer::*;
pub use main::*;
pub use projection::*;
pub use scale::*;
pub use types::*;
