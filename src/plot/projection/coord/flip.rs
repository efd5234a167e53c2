//! Flip coordinate system implementation

use super::{CoordKind, CoordTrait};

/// Flip coordinate system - swaps x and y axes
#[derive(Debug, Clone, Copy)]
pub struct Flip;

impl CoordTrait for Flip {
    fn coord_kind(&self) -> CoordKind {
        CoordKind::Flip
    }

    fn name(&self) -> &'static str {
        "flip"
    }

    fn allowed_properties(&self) -> &'static [&'static str] {
        &["clip"]
    }

    fn swaps_axes(&self) -> bool {
        true
    }
}

impl std::fmt::Display for Flip {
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
    fn test_flip_properties() {
        let flip = Flip;
        assert_eq!(flip.coord_kind(), CoordKind::Flip);
        assert_eq!(flip.name(), "flip");
        assert!(flip.swaps_axes());
    }

    #[test]
    fn test_flip_rejects_xlim() {
        let mut props = HashMap::new();
        props.insert("xlim".to_string(), ParameterValue::Number(100.0));

        let err = Flip.resolve_properties(&props).unwrap_err();
        assert_eq!(err, "Property 'xlim' is not valid for flip projection");
    }

    #[test]
    fn test_flip_accepts_empty_properties() {
        assert!(Flip.resolve_properties(&HashMap::new()).unwrap().is_empty());
    }
}
