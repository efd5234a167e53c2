//! Projection type

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::coord::Coord;
use crate::plot::ParameterValue;
use crate::{GgpropError, Result};

/// Coordinate system of a plot together with its properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Coordinate system type
    pub coord: Coord,
    /// Projection-specific options
    pub properties: HashMap<String, ParameterValue>,
}

impl Projection {
    pub fn new(coord: Coord) -> Self {
        Self {
            coord,
            properties: HashMap::new(),
        }
    }

    pub fn cartesian() -> Self {
        Self::new(Coord::cartesian())
    }

    pub fn flip() -> Self {
        Self::new(Coord::flip())
    }

    /// Set a property, rejecting names the coordinate system does not know
    pub fn with_property(mut self, name: &str, value: impl Into<ParameterValue>) -> Result<Self> {
        let mut properties = self.properties.clone();
        properties.insert(name.to_string(), value.into());
        self.properties = self
            .coord
            .resolve_properties(&properties)
            .map_err(GgpropError::ValidationError)?;
        Ok(self)
    }

    /// Whether x and y trade places when drawn
    pub fn is_flipped(&self) -> bool {
        self.coord.swaps_axes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_properties() {
        let projection = Projection::flip().with_property("clip", false).unwrap();
        assert!(projection.is_flipped());
        assert_eq!(projection.properties.len(), 1);

        let err = Projection::cartesian()
            .with_property("theta", "y")
            .unwrap_err();
        assert!(err.to_string().contains("theta"));
    }
}
