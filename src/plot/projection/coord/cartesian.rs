//! Cartesian coordinate system implementation

use super::{CoordKind, CoordTrait};

/// Cartesian coordinate system - x runs horizontally, y vertically
#[derive(Debug, Clone, Copy)]
pub struct Cartesian;

impl CoordTrait for Cartesian {
    fn coord_kind(&self) -> CoordKind {
        CoordKind::Cartesian
    }

    fn name(&self) -> &'static str {
        "cartesian"
    }

    fn allowed_properties(&self) -> &'static [&'static str] {
        &["clip"]
    }
}

impl std::fmt::Display for Cartesian {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::ParameterValue;
    use std::collections::HashMap;

    #[test]
    fn test_cartesian_properties() {
        let cartesian = Cartesian;
        assert_eq!(cartesian.coord_kind(), CoordKind::Cartesian);
        assert_eq!(cartesian.name(), "cartesian");
        assert!(!cartesian.swaps_axes());
    }

    #[test]
    fn test_cartesian_accepts_clip() {
        let mut props = HashMap::new();
        props.insert("clip".to_string(), ParameterValue::Boolean(false));

        let resolved = Cartesian.resolve_properties(&props).unwrap();
        assert_eq!(resolved.get("clip"), Some(&ParameterValue::Boolean(false)));
    }

    #[test]
    fn test_cartesian_rejects_ylim() {
        let mut props = HashMap::new();
        props.insert("ylim".to_string(), ParameterValue::Number(1.0));

        let err = Cartesian.resolve_properties(&props).unwrap_err();
        assert!(err.contains("ylim"));
        assert!(err.contains("not valid"));
    }
}
