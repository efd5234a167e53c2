//! Core types for the geom trait system
//!
//! These types are used by all geom implementations and are shared across the module.

use crate::plot::types::DefaultAestheticValue;

/// Default aesthetic values for a geom type
///
/// This struct describes which aesthetics a geom supports, requires, and their default values.
#[derive(Debug, Clone, Copy)]
pub struct DefaultAesthetics {
    /// Aesthetic defaults: maps aesthetic name to default value
    /// - Required: Must be provided via a mapping, remapping or setting
    /// - Null: Supported but no default
    /// - Other variants: Actual default values
    pub defaults: &'static [(&'static str, DefaultAestheticValue)],
}

impl DefaultAesthetics {
    /// Get all aesthetic names
    pub fn names(&self) -> Vec<&'static str> {
        self.defaults.iter().map(|(name, _)| *name).collect()
    }

    /// Get required aesthetic names (those marked as Required)
    pub fn required(&self) -> Vec<&'static str> {
        self.defaults
            .iter()
            .filter_map(|(name, value)| {
                if matches!(value, DefaultAestheticValue::Required) {
                    Some(*name)
                } else {
                    None
                }
            })
            .collect()
    }

    /// Check if an aesthetic is supported
    pub fn contains(&self, name: &str) -> bool {
        self.defaults.iter().any(|(n, _)| *n == name)
    }

    /// Check if an aesthetic is required
    pub fn is_required(&self, name: &str) -> bool {
        self.defaults
            .iter()
            .any(|(n, value)| *n == name && matches!(value, DefaultAestheticValue::Required))
    }

    /// Default value of an aesthetic, if it has one
    pub fn default_value(&self, name: &str) -> Option<DefaultAestheticValue> {
        self.defaults
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, value)| *value)
    }
}

/// Default value for a layer parameter
#[derive(Debug, Clone)]
pub enum DefaultParamValue {
    String(&'static str),
    Number(f64),
    Boolean(bool),
    Null,
}

impl DefaultParamValue {
    pub fn to_parameter(&self) -> crate::plot::ParameterValue {
        use crate::plot::ParameterValue;
        match self {
            DefaultParamValue::String(s) => ParameterValue::String(s.to_string()),
            DefaultParamValue::Number(n) => ParameterValue::Number(*n),
            DefaultParamValue::Boolean(b) => ParameterValue::Boolean(*b),
            DefaultParamValue::Null => ParameterValue::Null,
        }
    }
}

/// Layer parameter definition: name and default value
#[derive(Debug, Clone)]
pub struct DefaultParam {
    pub name: &'static str,
    pub default: DefaultParamValue,
}

/// Look up a parameter definition by name
pub fn find_param<'a>(params: &'a [DefaultParam], name: &str) -> Option<&'a DefaultParam> {
    params.iter().find(|p| p.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const AESTHETICS: DefaultAesthetics = DefaultAesthetics {
        defaults: &[
            ("x", DefaultAestheticValue::Required),
            ("fill", DefaultAestheticValue::Null),
            ("opacity", DefaultAestheticValue::Number(1.0)),
        ],
    };

    #[test]
    fn test_required_and_supported() {
        assert_eq!(AESTHETICS.names(), vec!["x", "fill", "opacity"]);
        assert_eq!(AESTHETICS.required(), vec!["x"]);
        assert!(AESTHETICS.is_required("x"));
        assert!(!AESTHETICS.is_required("fill"));
        assert!(AESTHETICS.contains("opacity"));
        assert!(!AESTHETICS.contains("label"));
        assert_eq!(
            AESTHETICS.default_value("opacity"),
            Some(DefaultAestheticValue::Number(1.0))
        );
    }

    #[test]
    fn test_find_param() {
        let params = [DefaultParam {
            name: "width",
            default: DefaultParamValue::Number(0.9),
        }];
        let width = find_param(&params, "width").unwrap();
        assert_eq!(
            width.default.to_parameter(),
            crate::plot::ParameterValue::Number(0.9)
        );
        assert!(find_param(&params, "height").is_none());
    }
}
