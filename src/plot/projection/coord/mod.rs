//! Coordinate system trait system
//!
//! Each coordinate system is a zero-sized struct implementing [`CoordTrait`];
//! the [`Coord`] wrapper holds one behind an `Arc`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::sync::Arc;

mod cartesian;
mod flip;

pub use cartesian::Cartesian;
pub use flip::Flip;

use crate::plot::ParameterValue;

/// Enum of all coordinate systems for pattern matching and serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordKind {
    Cartesian,
    Flip,
}

/// Core trait for coordinate system behavior
pub trait CoordTrait: std::fmt::Debug + std::fmt::Display + Send + Sync {
    /// Returns which coordinate system this is
    fn coord_kind(&self) -> CoordKind;

    /// Name used in error messages and output
    fn name(&self) -> &'static str;

    /// Properties accepted by this coordinate system
    fn allowed_properties(&self) -> &'static [&'static str];

    /// Whether the x and y aesthetics trade places when drawn
    fn swaps_axes(&self) -> bool {
        false
    }

    /// Check the given properties, returning the accepted set
    fn resolve_properties(
        &self,
        properties: &HashMap<String, ParameterValue>,
    ) -> Result<HashMap<String, ParameterValue>, String> {
        let mut names: Vec<&String> = properties.keys().collect();
        names.sort();
        for name in names {
            if !self.allowed_properties().contains(&name.as_str()) {
                return Err(format!(
                    "Property '{}' is not valid for {} projection",
                    name,
                    self.name()
                ));
            }
        }
        Ok(properties.clone())
    }
}

/// Wrapper around a coordinate system implementation
#[derive(Clone)]
pub struct Coord(Arc<dyn CoordTrait>);

impl Coord {
    pub fn cartesian() -> Self {
        Self(Arc::new(Cartesian))
    }

    pub fn flip() -> Self {
        Self(Arc::new(Flip))
    }

    pub fn from_kind(kind: CoordKind) -> Self {
        match kind {
            CoordKind::Cartesian => Self::cartesian(),
            CoordKind::Flip => Self::flip(),
        }
    }

    pub fn coord_kind(&self) -> CoordKind {
        self.0.coord_kind()
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    pub fn allowed_properties(&self) -> &'static [&'static str] {
        self.0.allowed_properties()
    }

    pub fn swaps_axes(&self) -> bool {
        self.0.swaps_axes()
    }

    pub fn resolve_properties(
        &self,
        properties: &HashMap<String, ParameterValue>,
    ) -> Result<HashMap<String, ParameterValue>, String> {
        self.0.resolve_properties(properties)
    }
}

impl std::fmt::Debug for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Coord({})", self.0)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq for Coord {
    fn eq(&self, other: &Self) -> bool {
        self.coord_kind() == other.coord_kind()
    }
}

impl Serialize for Coord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.coord_kind().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Coord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        CoordKind::deserialize(deserializer).map(Coord::from_kind)
    }
}
