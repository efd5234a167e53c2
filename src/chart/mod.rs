//! Percentage bar charts
//!
//! [`ggally_colbar`] draws column percentages: one full-height bar per level
//! of `x`, split by the levels of `y`. [`ggally_rowbar`] is its transpose.
//! Both label every segment with its proportion.

use std::collections::HashMap;

use crate::plot::{LabelFormat, Mappings, ParameterValue};
use crate::{GgpropError, Result};

mod colbar;
mod rowbar;

pub use colbar::ggally_colbar;
pub use rowbar::ggally_rowbar;

/// Styling options shared by the percentage bar charts
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartOptions {
    /// Format of the proportion labels
    pub label_format: LabelFormat,
    /// Label size in millimetres
    pub label_size: f64,
    /// Label colour, any CSS colour
    pub label_colour: String,
    /// Stack the first fill level at the bottom instead of the top
    pub reverse_fill_levels: bool,
    /// Hide the tick labels, ticks and title of the percentage axis
    pub remove_percentage_axis: bool,
    /// Hide the panel background, major grid lines and axis ticks
    pub remove_background: bool,
    /// Extra parameters for the bar layer (e.g. `width`, `opacity`)
    pub bar: HashMap<String, ParameterValue>,
}

impl Default for BarChartOptions {
    fn default() -> Self {
        Self {
            label_format: LabelFormat::percent(0.1),
            label_size: 3.0,
            label_colour: "black".to_string(),
            reverse_fill_levels: false,
            remove_percentage_axis: false,
            remove_background: false,
            bar: HashMap::new(),
        }
    }
}

impl BarChartOptions {
    /// Defaults for column percentages
    pub fn colbar() -> Self {
        Self::default()
    }

    /// Defaults for row percentages; fill levels read top to bottom once flipped
    pub fn rowbar() -> Self {
        Self {
            reverse_fill_levels: true,
            ..Self::default()
        }
    }

    pub fn with_label_format(mut self, format: LabelFormat) -> Self {
        self.label_format = format;
        self
    }

    pub fn with_label_size(mut self, size: f64) -> Self {
        self.label_size = size;
        self
    }

    pub fn with_label_colour(mut self, colour: &str) -> Self {
        self.label_colour = colour.to_string();
        self
    }

    pub fn with_reverse_fill_levels(mut self, reverse: bool) -> Self {
        self.reverse_fill_levels = reverse;
        self
    }

    pub fn with_remove_percentage_axis(mut self, remove: bool) -> Self {
        self.remove_percentage_axis = remove;
        self
    }

    pub fn with_remove_background(mut self, remove: bool) -> Self {
        self.remove_background = remove;
        self
    }

    /// Pass a parameter through to the bar layer
    pub fn with_bar_parameter(mut self, name: &str, value: impl Into<ParameterValue>) -> Self {
        self.bar.insert(name.to_string(), value.into());
        self
    }
}

/// Move a `color` mapping to `fill` unless `fill` is already mapped
pub fn mapping_color_to_fill(mut mapping: Mappings) -> Mappings {
    if !mapping.contains_key("fill") {
        if let Some(color) = mapping.remove("color") {
            mapping.insert("fill", color);
        }
    }
    mapping
}

/// Fail unless both `x` and `y` are mapped
fn require_xy(mapping: &Mappings, chart: &str) -> Result<()> {
    let missing: Vec<&str> = ["x", "y"]
        .into_iter()
        .filter(|aes| !mapping.contains_key(aes))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(GgpropError::ValidationError(format!(
            "{}() requires the 'x' and 'y' aesthetics; missing: {}",
            chart,
            missing.join(", ")
        )))
    }
}
