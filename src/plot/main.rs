//! Main Plot type
//!
//! A [`Plot`] is a composable specification: data, plot-level mappings,
//! layers, scales, guides, an optional facet and projection, labels and a
//! theme. Builders consume and return the plot so calls chain.

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::aesthetic;
use super::facet::Facet;
use super::layer::Layer;
use super::projection::Projection;
use super::scale::{Guide, Scale};
use super::types::Mappings;

/// A complete plot specification
#[derive(Debug, Clone, Default)]
pub struct Plot {
    /// Plot data, used by layers without their own data
    pub data: Option<DataFrame>,
    /// Mappings inherited by every layer
    pub mappings: Mappings,
    /// Layers, drawn in order
    pub layers: Vec<Layer>,
    /// At most one scale per aesthetic
    pub scales: Vec<Scale>,
    /// At most one guide per aesthetic
    pub guides: Vec<Guide>,
    pub facet: Option<Facet>,
    pub projection: Option<Projection>,
    pub labels: Option<Labels>,
    pub theme: Option<Theme>,
}

/// Title and axis/legend labels
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Labels {
    /// Keyed by aesthetic name, or "title"
    pub labels: HashMap<String, String>,
}

impl Labels {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }
}

/// Elements of the plot that a theme can blank out
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeElement {
    /// Tick labels of the axis showing this scale aesthetic
    AxisText(String),
    /// Tick marks of the axis showing this scale aesthetic
    AxisTicks(String),
    /// Title of the axis showing this scale aesthetic
    AxisTitle(String),
    PanelBackground,
    PanelGridMajor,
}

/// Theme: the set of blanked elements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub blank: BTreeSet<ThemeElement>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blank(mut self, element: ThemeElement) -> Self {
        self.blank.insert(element);
        self
    }

    pub fn is_blank(&self, element: &ThemeElement) -> bool {
        self.blank.contains(element)
    }

    /// Add the elements of `other` to this theme
    pub fn merge(mut self, other: Theme) -> Self {
        self.blank.extend(other.blank);
        self
    }
}

impl Plot {
    /// Create a plot over a data frame
    pub fn new(data: DataFrame) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    /// Create a plot without data; every layer must then carry its own
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_mappings(mut self, mappings: Mappings) -> Self {
        self.mappings = mappings;
        self
    }

    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Add a scale, replacing any scale for the same aesthetic
    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scales.retain(|s| s.aesthetic != scale.aesthetic);
        self.scales.push(scale);
        self
    }

    /// Add a guide, replacing any guide for the same aesthetic
    pub fn with_guide(mut self, guide: Guide) -> Self {
        self.guides.retain(|g| g.aesthetic != guide.aesthetic);
        self.guides.push(guide);
        self
    }

    pub fn with_facet(mut self, facet: Facet) -> Self {
        self.facet = Some(facet);
        self
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = Some(projection);
        self
    }

    /// Set the title (key "title") or the label of an aesthetic
    pub fn with_label(mut self, key: &str, value: &str) -> Self {
        let key = if key == "title" {
            key
        } else {
            aesthetic::normalize(key)
        };
        self.labels
            .get_or_insert_with(Labels::default)
            .labels
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Merge a theme into the plot's theme
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(match self.theme.take() {
            Some(current) => current.merge(theme),
            None => theme,
        });
        self
    }

    pub fn find_scale(&self, aesthetic: &str) -> Option<&Scale> {
        self.scales.iter().find(|s| s.aesthetic == aesthetic)
    }

    pub fn find_guide(&self, aesthetic: &str) -> Option<&Guide> {
        self.guides.iter().find(|g| g.aesthetic == aesthetic)
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.as_ref().and_then(|l| l.get(key))
    }

    /// Whether the theme blanks an element
    pub fn is_blank(&self, element: &ThemeElement) -> bool {
        self.theme.as_ref().is_some_and(|t| t.is_blank(element))
    }

    /// Whether the projection swaps x and y
    pub fn is_flipped(&self) -> bool {
        self.projection.as_ref().is_some_and(|p| p.is_flipped())
    }
}
