//! Bar geom implementation

use super::{DefaultAesthetics, GeomTrait, GeomType};
use crate::plot::types::DefaultAestheticValue;
use crate::plot::{DefaultParam, DefaultParamValue};

/// Bar geom - rectangles spanning `ymin` to `ymax` at each `x`
#[derive(Debug, Clone, Copy)]
pub struct Bar;

impl GeomTrait for Bar {
    fn geom_type(&self) -> GeomType {
        GeomType::Bar
    }

    fn aesthetics(&self) -> DefaultAesthetics {
        DefaultAesthetics {
            defaults: &[
                ("x", DefaultAestheticValue::Required),
                ("y", DefaultAestheticValue::Required),
                ("fill", DefaultAestheticValue::Null),
                ("color", DefaultAestheticValue::Null),
                ("opacity", DefaultAestheticValue::Number(1.0)),
                ("linewidth", DefaultAestheticValue::Null),
            ],
        }
    }

    fn default_params(&self) -> &'static [DefaultParam] {
        &[DefaultParam {
            name: "width",
            default: DefaultParamValue::Number(0.9),
        }]
    }
}

impl std::fmt::Display for Bar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "bar")
    }
}
