//! Projection types
//!
//! A projection pairs a coordinate system with its properties.

pub mod coord;
mod types;

pub use coord::{Coord, CoordKind, CoordTrait};
pub use types::Projection;
