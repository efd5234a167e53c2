//! Scale types
//!
//! A scale type decides which column data types a scale can hold and how a
//! writer should treat the field.

use polars::prelude::{Column, DataType};
use serde::{Deserialize, Serialize};

use crate::plot::types::{is_discrete_dtype, is_numeric_dtype, is_temporal_dtype};

/// Enum of all scale types for pattern matching and serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleTypeKind {
    /// Continuous numeric data
    Continuous,
    /// Categorical/discrete data
    Discrete,
}

impl ScaleTypeKind {
    /// Canonical name for display
    pub fn name(&self) -> &'static str {
        match self {
            ScaleTypeKind::Continuous => "continuous",
            ScaleTypeKind::Discrete => "discrete",
        }
    }

    pub fn is_discrete(&self) -> bool {
        matches!(self, ScaleTypeKind::Discrete)
    }

    /// Returns whether this scale type accepts the given data type
    pub fn allows_data_type(&self, dtype: &DataType) -> bool {
        match self {
            ScaleTypeKind::Continuous => is_numeric_dtype(dtype) || is_temporal_dtype(dtype),
            // Discrete scales treat any value as a level
            ScaleTypeKind::Discrete => true,
        }
    }

    /// Validate that all columns have compatible data types for this scale.
    /// Returns Ok(()) if valid, Err with details if any column is incompatible.
    pub fn validate_columns(&self, columns: &[&Column]) -> Result<(), String> {
        for col in columns {
            let dtype = col.dtype();
            if !self.allows_data_type(dtype) {
                return Err(format!(
                    "Column '{}' has type {:?} which is not compatible with {} scale",
                    col.name(),
                    dtype,
                    self.name()
                ));
            }
        }
        Ok(())
    }

    /// Scale type a column would get without an explicit scale
    pub fn infer(dtype: &DataType) -> Self {
        if is_discrete_dtype(dtype) {
            ScaleTypeKind::Discrete
        } else {
            ScaleTypeKind::Continuous
        }
    }
}

impl std::fmt::Display for ScaleTypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
