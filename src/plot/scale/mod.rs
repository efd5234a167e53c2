//! Scale and guide types for ggprop plot specifications
//!
//! This module defines scale and guide configuration for aesthetic mappings,
//! and the label formats used for axes and text labels.

mod format;
pub mod scale_type;
mod types;

pub use format::LabelFormat;
pub use scale_type::ScaleTypeKind;
pub use types::{Guide, GuideType, Scale};
