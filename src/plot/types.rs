//! Value types shared across the plot specification
//!
//! Mappings, aesthetic values, parameter values and column schema information.

use polars::prelude::{DataFrame, DataType};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;

use super::aesthetic;
use super::scale::LabelFormat;

// =============================================================================
// Parameter values
// =============================================================================

/// A literal value used for layer parameters, settings and projection properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
}

impl ParameterValue {
    /// Convert to a JSON value for writers
    pub fn to_json(&self) -> Value {
        match self {
            ParameterValue::String(s) => json!(s),
            ParameterValue::Number(n) => json!(n),
            ParameterValue::Boolean(b) => json!(b),
            ParameterValue::Null => Value::Null,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParameterValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParameterValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParameterValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Short type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ParameterValue::String(_) => "string",
            ParameterValue::Number(_) => "number",
            ParameterValue::Boolean(_) => "boolean",
            ParameterValue::Null => "null",
        }
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::String(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::String(value)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        ParameterValue::Number(value)
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        ParameterValue::Boolean(value)
    }
}

// =============================================================================
// Aesthetic values and mappings
// =============================================================================

/// Value bound to an aesthetic: a data column or a literal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AestheticValue {
    /// Column reference
    Column {
        name: String,
        /// Column name in the user's data, kept for axis and legend titles
        /// once the column has been renamed to its aesthetic
        original_name: Option<String>,
    },
    /// Constant value
    Literal(ParameterValue),
}

impl AestheticValue {
    /// Reference a column by name
    pub fn column(name: impl Into<String>) -> Self {
        AestheticValue::Column {
            name: name.into(),
            original_name: None,
        }
    }

    pub fn column_name(&self) -> Option<&str> {
        match self {
            AestheticValue::Column { name, .. } => Some(name.as_str()),
            AestheticValue::Literal(_) => None,
        }
    }

    /// Name to show in titles: the original column name if known
    pub fn title(&self) -> Option<&str> {
        match self {
            AestheticValue::Column {
                name,
                original_name,
            } => Some(original_name.as_deref().unwrap_or(name)),
            AestheticValue::Literal(_) => None,
        }
    }
}

/// Aesthetic mappings: aesthetic name -> value
///
/// Aesthetic names are normalised on insertion, so `colour` and `color`
/// address the same channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mappings {
    pub aesthetics: HashMap<String, AestheticValue>,
}

impl Mappings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map an aesthetic to a column (builder style)
    pub fn with(mut self, aesthetic: &str, column: &str) -> Self {
        self.insert(aesthetic, AestheticValue::column(column));
        self
    }

    /// Map an aesthetic to a constant (builder style)
    pub fn with_literal(mut self, aesthetic: &str, value: impl Into<ParameterValue>) -> Self {
        self.insert(aesthetic, AestheticValue::Literal(value.into()));
        self
    }

    pub fn insert(&mut self, aesthetic: &str, value: AestheticValue) -> Option<AestheticValue> {
        self.aesthetics
            .insert(aesthetic::normalize(aesthetic).to_string(), value)
    }

    pub fn get(&self, aesthetic: &str) -> Option<&AestheticValue> {
        self.aesthetics.get(aesthetic::normalize(aesthetic))
    }

    pub fn remove(&mut self, aesthetic: &str) -> Option<AestheticValue> {
        self.aesthetics.remove(aesthetic::normalize(aesthetic))
    }

    pub fn contains_key(&self, aesthetic: &str) -> bool {
        self.aesthetics.contains_key(aesthetic::normalize(aesthetic))
    }

    pub fn is_empty(&self) -> bool {
        self.aesthetics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.aesthetics.len()
    }

    /// Aesthetic names in sorted order, for deterministic processing
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.aesthetics.keys().cloned().collect();
        names.sort();
        names
    }

    /// Combine with a base mapping; entries in `self` take precedence
    pub fn merged_over(&self, base: &Mappings) -> Mappings {
        let mut merged = base.clone();
        for (aesthetic, value) in &self.aesthetics {
            merged.aesthetics.insert(aesthetic.clone(), value.clone());
        }
        merged
    }
}

/// Post-stat mapping: an aesthetic fed from a stat-computed column
#[derive(Debug, Clone, PartialEq)]
pub struct AfterStat {
    /// Stat column name (e.g. "prop")
    pub column: String,
    /// Optional formatting to a text column
    pub format: Option<LabelFormat>,
}

impl AfterStat {
    pub fn new(column: &str) -> Self {
        Self {
            column: column.to_string(),
            format: None,
        }
    }

    pub fn formatted(column: &str, format: LabelFormat) -> Self {
        Self {
            column: column.to_string(),
            format: Some(format),
        }
    }
}

/// Default value for an aesthetic in a geom's aesthetic table
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultAestheticValue {
    String(&'static str),
    Number(f64),
    Boolean(bool),
    /// Must be provided, by a mapping, a remapping or a setting
    Required,
    /// Supported but no default
    Null,
}

impl DefaultAestheticValue {
    pub fn to_parameter(&self) -> Option<ParameterValue> {
        match self {
            DefaultAestheticValue::String(s) => Some(ParameterValue::String(s.to_string())),
            DefaultAestheticValue::Number(n) => Some(ParameterValue::Number(*n)),
            DefaultAestheticValue::Boolean(b) => Some(ParameterValue::Boolean(*b)),
            DefaultAestheticValue::Required | DefaultAestheticValue::Null => None,
        }
    }
}

// =============================================================================
// Schema
// =============================================================================

/// Column type information
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: DataType,
    /// Categorical or text data
    pub is_discrete: bool,
    /// Categorical, enum or boolean data (text does not count)
    pub is_categorical: bool,
}

/// Schema of a data frame - list of columns with type info
pub type Schema = Vec<ColumnInfo>;

/// Collect column type information for a data frame
pub fn schema_of(df: &DataFrame) -> Schema {
    df.get_columns()
        .iter()
        .map(|column| {
            let dtype = column.dtype().clone();
            ColumnInfo {
                name: column.name().to_string(),
                is_discrete: is_discrete_dtype(&dtype),
                is_categorical: is_categorical_dtype(&dtype),
                dtype,
            }
        })
        .collect()
}

/// Look up a column in a schema
pub fn find_column<'a>(schema: &'a Schema, name: &str) -> Option<&'a ColumnInfo> {
    schema.iter().find(|c| c.name == name)
}

pub fn is_categorical_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Categorical(..) | DataType::Enum(..) | DataType::Boolean
    )
}

pub fn is_discrete_dtype(dtype: &DataType) -> bool {
    is_categorical_dtype(dtype) || matches!(dtype, DataType::String)
}

pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

pub fn is_temporal_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Date | DataType::Datetime(..) | DataType::Duration(..) | DataType::Time
    )
}
