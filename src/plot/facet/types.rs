//! Facet types

use serde::{Deserialize, Serialize};

/// Faceting specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Facet {
    /// One panel per level of the variables, wrapped into rows
    Wrap {
        variables: Vec<String>,
        scales: FacetScales,
    },
    /// Rows and columns of panels
    Grid {
        rows: Vec<String>,
        cols: Vec<String>,
        scales: FacetScales,
    },
}

/// Scale sharing options for facets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetScales {
    #[default]
    Fixed,
    Free,
    FreeX,
    FreeY,
}

impl FacetScales {
    pub fn free_x(&self) -> bool {
        matches!(self, FacetScales::Free | FacetScales::FreeX)
    }

    pub fn free_y(&self) -> bool {
        matches!(self, FacetScales::Free | FacetScales::FreeY)
    }
}

impl Facet {
    pub fn wrap(variables: &[&str]) -> Self {
        Facet::Wrap {
            variables: variables.iter().map(|v| v.to_string()).collect(),
            scales: FacetScales::Fixed,
        }
    }

    pub fn grid(rows: &[&str], cols: &[&str]) -> Self {
        Facet::Grid {
            rows: rows.iter().map(|v| v.to_string()).collect(),
            cols: cols.iter().map(|v| v.to_string()).collect(),
            scales: FacetScales::Fixed,
        }
    }

    pub fn with_scales(mut self, new_scales: FacetScales) -> Self {
        match &mut self {
            Facet::Wrap { scales, .. } | Facet::Grid { scales, .. } => *scales = new_scales,
        }
        self
    }

    pub fn scales(&self) -> FacetScales {
        match self {
            Facet::Wrap { scales, .. } | Facet::Grid { scales, .. } => *scales,
        }
    }

    /// Get all variables used for faceting
    ///
    /// For Wrap facets, returns the variables list.
    /// For Grid facets, returns combined rows and cols variables.
    pub fn get_variables(&self) -> Vec<String> {
        match self {
            Facet::Wrap { variables, .. } => variables.clone(),
            Facet::Grid { rows, cols, .. } => {
                let mut vars = rows.clone();
                vars.extend(cols.iter().cloned());
                vars
            }
        }
    }
}
