//! Stat trait system
//!
//! A stat turns a layer frame (one column per aesthetic) into the frame the
//! geom draws. Stats run once per rendering pass, after mappings are resolved
//! and before positions are applied.

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use super::geom::DefaultParam;
use super::position::Position;
use crate::plot::{Mappings, ParameterValue, Schema};
use crate::Result;

mod identity;
mod prop;

pub use identity::Identity;
pub use prop::{stat_prop, Prop, COUNT_COLUMN, PROP_COLUMN};

/// Enum of all stat types for pattern matching and serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatType {
    Identity,
    Prop,
}

/// Result of a statistical transformation
#[derive(Debug, Clone)]
pub enum StatResult {
    /// No transformation needed - use the layer frame as-is
    Identity,
    /// Transformation applied, with stat-computed columns
    Transformed {
        /// The computed frame
        data: DataFrame,
        /// Names of stat-computed columns (e.g., ["count", "prop"]),
        /// available to default remappings and `AfterStat` remappings
        stat_columns: Vec<String>,
        /// Names of aesthetics consumed by this stat transform
        /// These aesthetics were used as input to the stat and are removed
        /// from the layer mappings after the transform completes
        consumed_aesthetics: Vec<String>,
    },
}

/// Core trait for stat behavior
pub trait StatTrait: std::fmt::Debug + std::fmt::Display + Send + Sync {
    /// Returns which stat this is (for pattern matching)
    fn stat_type(&self) -> StatType;

    /// Aesthetics the stat reads in addition to the geom's
    fn aesthetics(&self) -> &'static [&'static str] {
        &[]
    }

    /// Parameters accepted by this stat, with their defaults
    fn default_params(&self) -> &'static [DefaultParam] {
        &[]
    }

    /// Default (stat column, aesthetic) remappings applied after the stat
    /// unless the aesthetic is mapped otherwise
    fn default_remappings(&self) -> &'static [(&'static str, &'static str)] {
        &[]
    }

    /// Position a layer gets when this stat is attached
    fn default_position(&self) -> Position {
        Position::Identity
    }

    /// Validate mappings and settings before any data is touched
    fn setup(
        &self,
        _mappings: &Mappings,
        _parameters: &HashMap<String, ParameterValue>,
    ) -> Result<()> {
        Ok(())
    }

    /// Compute the stat on a layer frame
    ///
    /// `group_by` lists the panel (facet) columns present in `data`.
    fn compute(
        &self,
        _data: &DataFrame,
        _schema: &Schema,
        _mappings: &Mappings,
        _group_by: &[String],
        _parameters: &HashMap<String, ParameterValue>,
    ) -> Result<StatResult> {
        Ok(StatResult::Identity)
    }
}

/// Wrapper around a stat implementation
#[derive(Clone)]
pub struct Stat(Arc<dyn StatTrait>);

impl Stat {
    pub fn identity() -> Self {
        Self(Arc::new(Identity))
    }

    pub fn prop() -> Self {
        Self(Arc::new(Prop))
    }

    pub fn stat_type(&self) -> StatType {
        self.0.stat_type()
    }

    pub fn aesthetics(&self) -> &'static [&'static str] {
        self.0.aesthetics()
    }

    pub fn default_params(&self) -> &'static [DefaultParam] {
        self.0.default_params()
    }

    pub fn default_remappings(&self) -> &'static [(&'static str, &'static str)] {
        self.0.default_remappings()
    }

    pub fn default_position(&self) -> Position {
        self.0.default_position()
    }

    pub fn setup(
        &self,
        mappings: &Mappings,
        parameters: &HashMap<String, ParameterValue>,
    ) -> Result<()> {
        self.0.setup(mappings, parameters)
    }

    pub fn compute(
        &self,
        data: &DataFrame,
        schema: &Schema,
        mappings: &Mappings,
        group_by: &[String],
        parameters: &HashMap<String, ParameterValue>,
    ) -> Result<StatResult> {
        self.0
            .compute(data, schema, mappings, group_by, parameters)
    }
}

impl Default for Stat {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::fmt::Debug for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Stat({})", self.0)
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq for Stat {
    fn eq(&self, other: &Self) -> bool {
        self.stat_type() == other.stat_type()
    }
}
