//! Geom trait system
//!
//! Each geom is a zero-sized struct implementing [`GeomTrait`]; the [`Geom`]
//! wrapper holds one behind an `Arc` so layers can be cloned cheaply.
//!
//! # Example
//!
//! ```rust,ignore
//! use ggprop::plot::{Geom, GeomType};
//!
//! let bar = Geom::bar();
//! assert_eq!(bar.geom_type(), GeomType::Bar);
//! assert!(bar.aesthetics().is_required("x"));
//! ```

use serde::{Deserialize, Serialize};
use std::sync::Arc;

mod bar;
mod text;
pub mod types;

pub use bar::Bar;
pub use text::Text;
pub use types::{find_param, DefaultAesthetics, DefaultParam, DefaultParamValue};

/// Enum of all geom types for pattern matching and serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeomType {
    Bar,
    Text,
}

/// Core trait for geom behavior
pub trait GeomTrait: std::fmt::Debug + std::fmt::Display + Send + Sync {
    /// Returns which geom this is (for pattern matching)
    fn geom_type(&self) -> GeomType;

    /// Aesthetics this geom draws, with their defaults
    fn aesthetics(&self) -> DefaultAesthetics;

    /// Parameters accepted by this geom, with their defaults
    fn default_params(&self) -> &'static [DefaultParam] {
        &[]
    }
}

/// Wrapper around a geom implementation
#[derive(Clone)]
pub struct Geom(Arc<dyn GeomTrait>);

impl Geom {
    pub fn bar() -> Self {
        Self(Arc::new(Bar))
    }

    pub fn text() -> Self {
        Self(Arc::new(Text))
    }

    pub fn from_type(geom_type: GeomType) -> Self {
        match geom_type {
            GeomType::Bar => Self::bar(),
            GeomType::Text => Self::text(),
        }
    }

    pub fn geom_type(&self) -> GeomType {
        self.0.geom_type()
    }

    pub fn aesthetics(&self) -> DefaultAesthetics {
        self.0.aesthetics()
    }

    pub fn default_params(&self) -> &'static [DefaultParam] {
        self.0.default_params()
    }
}

impl std::fmt::Debug for Geom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Geom({})", self.0)
    }
}

impl std::fmt::Display for Geom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq for Geom {
    fn eq(&self, other: &Self) -> bool {
        self.geom_type() == other.geom_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_aesthetics() {
        let bar = Geom::bar();
        assert_eq!(bar.geom_type(), GeomType::Bar);
        assert_eq!(bar.aesthetics().required(), vec!["x", "y"]);
        assert!(bar.aesthetics().contains("fill"));
        assert!(!bar.aesthetics().contains("label"));
        assert!(find_param(bar.default_params(), "width").is_some());
        assert_eq!(bar.to_string(), "bar");
    }

    #[test]
    fn test_text_aesthetics() {
        let text = Geom::text();
        assert_eq!(text.aesthetics().required(), vec!["x", "y", "label"]);
        // Text is coloured through `color`; `fill` only groups
        assert!(!text.aesthetics().contains("fill"));
        assert!(text.aesthetics().contains("size"));
        assert_eq!(format!("{:?}", text), "Geom(text)");
    }

    #[test]
    fn test_from_type_roundtrip() {
        assert_eq!(Geom::from_type(GeomType::Text), Geom::text());
        assert_ne!(Geom::from_type(GeomType::Bar), Geom::text());
    }
}
