//! Label formats for axes and text labels

use polars::prelude::{Column, DataType};

use crate::{GgpropError, Result};

/// How a numeric value is turned into a label
#[derive(Debug, Clone, PartialEq)]
pub enum LabelFormat {
    /// Multiply by 100 and append `%`, rounded to `accuracy` percentage points
    Percent { accuracy: f64 },
    /// printf-style format applied to the raw value (e.g. `"%.2f"`)
    Sprintf(String),
}

impl LabelFormat {
    pub fn percent(accuracy: f64) -> Self {
        LabelFormat::Percent { accuracy }
    }

    pub fn sprintf(format: &str) -> Self {
        LabelFormat::Sprintf(format.to_string())
    }

    /// Format a single value
    pub fn format(&self, value: f64) -> Result<String> {
        match self {
            LabelFormat::Percent { accuracy } => {
                let accuracy = checked_accuracy(*accuracy)?;
                let rounded = (value * 100.0 / accuracy).round() * accuracy;
                // Avoid printing "-0.0%"
                let rounded = if rounded == 0.0 { 0.0 } else { rounded };
                let digits = percent_digits(accuracy);
                sprintf::vsprintf(&format!("%.{}f%%", digits), &[&rounded]).map_err(|e| {
                    GgpropError::InternalError(format!("Failed to format {}: {:?}", value, e))
                })
            }
            LabelFormat::Sprintf(fmt) => sprintf::vsprintf(fmt, &[&value]).map_err(|e| {
                GgpropError::ValidationError(format!(
                    "Invalid label format '{}': {:?}",
                    fmt, e
                ))
            }),
        }
    }

    /// Format a numeric column into a text column called `name`
    ///
    /// Nulls stay null.
    pub fn format_column(&self, column: &Column, name: &str) -> Result<Column> {
        let values = column.cast(&DataType::Float64)?;
        let labels = values
            .f64()?
            .iter()
            .map(|v| v.map(|v| self.format(v)).transpose())
            .collect::<Result<Vec<Option<String>>>>()?;
        Ok(Column::new(name.into(), labels))
    }

    /// Equivalent d3 format string, for writers that format axes themselves
    pub fn to_d3_format(&self) -> Option<String> {
        match self {
            LabelFormat::Percent { accuracy } if *accuracy > 0.0 => {
                Some(format!(".{}%", percent_digits(*accuracy)))
            }
            _ => None,
        }
    }
}

impl Default for LabelFormat {
    fn default() -> Self {
        LabelFormat::percent(0.1)
    }
}

fn checked_accuracy(accuracy: f64) -> Result<f64> {
    if accuracy.is_finite() && accuracy > 0.0 {
        Ok(accuracy)
    } else {
        Err(GgpropError::ValidationError(format!(
            "Percent accuracy must be a positive number, got {}",
            accuracy
        )))
    }
}

/// Decimal places needed to show a given accuracy (0.1 -> 1, 1 -> 0)
fn percent_digits(accuracy: f64) -> usize {
    if accuracy >= 1.0 {
        0
    } else {
        (-accuracy.log10() - 1e-9).ceil().max(0.0) as usize
    }
}
