//! Layer type
//!
//! A layer binds a geom, a stat and a position to aesthetic mappings and
//! parameters. Layers are composed into a [`Plot`](crate::plot::Plot) and
//! computed during [`Plot::build`](crate::plot::Plot::build).

use polars::prelude::DataFrame;
use std::collections::HashMap;

pub mod geom;
pub mod position;
pub mod stat;

pub use geom::{
    DefaultAesthetics, DefaultParam, DefaultParamValue, Geom, GeomTrait, GeomType,
};
pub use position::Position;
pub use stat::{Stat, StatResult, StatTrait, StatType};

use crate::plot::aesthetic;
use crate::plot::types::{AestheticValue, AfterStat, Mappings, ParameterValue};
use crate::{GgpropError, Result};

/// Aesthetics every layer understands regardless of geom and stat
const UNIVERSAL_AESTHETICS: &[&str] = &["group"];

/// Aesthetics whose string settings must be valid CSS colours
const COLOUR_AESTHETICS: &[&str] = &["color", "fill"];

/// A single visualization layer
#[derive(Debug, Clone)]
pub struct Layer {
    /// Geometric object type
    pub geom: Geom,
    /// Statistical transformation
    pub stat: Stat,
    /// Position adjustment
    pub position: Position,
    /// Aesthetic mappings of this layer
    pub mappings: Mappings,
    /// Aesthetics fed from stat columns after the stat has run
    pub remappings: HashMap<String, AfterStat>,
    /// Geom and stat parameters, and literal aesthetic settings
    pub parameters: HashMap<String, ParameterValue>,
    /// Layer-specific data; the plot data is used when `None`
    pub data: Option<DataFrame>,
    /// Whether to combine with the plot's mappings
    pub inherit_aes: bool,
    /// Key of this layer's computed frame, set by the rendering pass
    pub data_key: Option<String>,
}

impl Layer {
    /// Create a layer with the identity stat and identity position
    pub fn new(geom: Geom) -> Self {
        Self {
            geom,
            stat: Stat::identity(),
            position: Position::Identity,
            mappings: Mappings::new(),
            remappings: HashMap::new(),
            parameters: HashMap::new(),
            data: None,
            inherit_aes: true,
            data_key: None,
        }
    }

    /// Attach a stat; the position switches to the stat's default
    pub fn with_stat(mut self, stat: Stat) -> Self {
        self.position = stat.default_position();
        self.stat = stat;
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_mappings(mut self, mappings: Mappings) -> Self {
        self.mappings = mappings;
        self
    }

    pub fn with_remapping(mut self, aesthetic: &str, after_stat: AfterStat) -> Self {
        self.remappings
            .insert(aesthetic::normalize(aesthetic).to_string(), after_stat);
        self
    }

    pub fn with_data(mut self, data: DataFrame) -> Self {
        self.data = Some(data);
        self
    }

    pub fn without_inherited_aes(mut self) -> Self {
        self.inherit_aes = false;
        self
    }

    /// Set a parameter or a literal aesthetic
    pub fn with_parameter(mut self, name: &str, value: impl Into<ParameterValue>) -> Result<Self> {
        let name = aesthetic::normalize(name).to_string();
        let value = value.into();
        self.validate_setting(&name, &value)?;
        self.parameters.insert(name, value);
        Ok(self)
    }

    /// Mappings after combining with the plot's mappings
    pub fn resolved_mappings(&self, global: &Mappings) -> Mappings {
        if self.inherit_aes {
            self.mappings.merged_over(global)
        } else {
            self.mappings.clone()
        }
    }

    /// Whether the geom or the stat of this layer knows an aesthetic
    pub fn knows_aesthetic(&self, aesthetic: &str) -> bool {
        self.geom.aesthetics().contains(aesthetic)
            || self.stat.aesthetics().contains(&aesthetic)
            || UNIVERSAL_AESTHETICS.contains(&aesthetic)
    }

    /// Check the layer's own mappings against its geom and stat
    ///
    /// Inherited plot mappings are not checked; they only group.
    pub fn validate_mappings(&self) -> Result<()> {
        for aesthetic in self.mappings.names() {
            if !self.knows_aesthetic(&aesthetic) {
                return Err(GgpropError::ValidationError(format!(
                    "Aesthetic '{}' is not supported by geom '{}' with stat '{}'",
                    aesthetic, self.geom, self.stat
                )));
            }
        }
        self.stat.setup(&self.mappings, &self.parameters)
    }

    /// Check that every aesthetic the geom requires is mapped or set
    pub fn validate_required_aesthetics(&self) -> Result<()> {
        let missing: Vec<&str> = self
            .geom
            .aesthetics()
            .required()
            .into_iter()
            .filter(|aes| !self.mappings.contains_key(aes) && !self.parameters.contains_key(*aes))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(GgpropError::ValidationError(format!(
                "geom_{}() requires the following missing aesthetics: {}",
                self.geom,
                missing.join(", ")
            )))
        }
    }

    /// Check all parameters set on the layer
    pub fn validate_settings(&self) -> Result<()> {
        let mut names: Vec<&String> = self.parameters.keys().collect();
        names.sort();
        for name in names {
            self.validate_setting(name, &self.parameters[name])?;
        }
        Ok(())
    }

    fn validate_setting(&self, name: &str, value: &ParameterValue) -> Result<()> {
        let known_param = geom::find_param(self.geom.default_params(), name).is_some()
            || geom::find_param(self.stat.default_params(), name).is_some();
        let is_aesthetic = self.geom.aesthetics().contains(name);

        if !known_param && !is_aesthetic {
            let mut valid: Vec<&str> = self
                .geom
                .default_params()
                .iter()
                .chain(self.stat.default_params())
                .map(|p| p.name)
                .chain(self.geom.aesthetics().names())
                .collect();
            valid.sort();
            return Err(GgpropError::ValidationError(format!(
                "Parameter '{}' is not valid for geom '{}' with stat '{}'. Valid parameters: {}",
                name,
                self.geom,
                self.stat,
                valid.join(", ")
            )));
        }

        if COLOUR_AESTHETICS.contains(&name) {
            if let ParameterValue::String(colour) = value {
                csscolorparser::parse(colour).map_err(|e| {
                    GgpropError::ValidationError(format!(
                        "Invalid colour '{}' for '{}': {}",
                        colour, name, e
                    ))
                })?;
            }
        }
        Ok(())
    }

    /// Parameter value, falling back to geom and stat defaults
    pub fn parameter(&self, name: &str) -> Option<ParameterValue> {
        if let Some(value) = self.parameters.get(name) {
            return Some(value.clone());
        }
        geom::find_param(self.geom.default_params(), name)
            .or_else(|| geom::find_param(self.stat.default_params(), name))
            .map(|p| p.default.to_parameter())
    }

    /// Parameters with geom and stat defaults filled in
    pub fn resolved_parameters(&self) -> HashMap<String, ParameterValue> {
        let mut resolved: HashMap<String, ParameterValue> = self
            .geom
            .default_params()
            .iter()
            .chain(self.stat.default_params())
            .map(|p| (p.name.to_string(), p.default.to_parameter()))
            .collect();
        for (name, value) in &self.parameters {
            resolved.insert(name.clone(), value.clone());
        }
        resolved
    }

    /// Literal aesthetic value: a literal mapping, else a setting
    pub fn literal_aesthetic(&self, aesthetic: &str) -> Option<ParameterValue> {
        match self.mappings.get(aesthetic) {
            Some(AestheticValue::Literal(value)) => Some(value.clone()),
            _ => self
                .parameters
                .get(aesthetic)
                .filter(|_| self.geom.aesthetics().contains(aesthetic))
                .cloned(),
        }
    }
}
