//! Output writers
//!
//! A [`Writer`] turns a built plot and its per-layer data into an output
//! format. Writers receive the plot produced by
//! [`Plot::build`](crate::plot::Plot::build), whose layer mappings point at
//! the computed columns, together with the data keyed by layer key.
//!
//! # Example
//!
//! ```rust,ignore
//! use ggprop::writer::{VegaLiteWriter, Writer};
//!
//! let spec = plot.build()?;
//! let json = spec.render(&VegaLiteWriter::new())?;
//! ```

use std::collections::HashMap;

use crate::{DataFrame, Plot, Result};

#[cfg(feature = "vegalite")]
mod vegalite;

#[cfg(feature = "vegalite")]
pub use vegalite::VegaLiteWriter;

/// Output backend for built plots
pub trait Writer {
    /// Type of the rendered output
    type Output;

    /// Render a built plot
    fn write(&self, plot: &Plot, data: &HashMap<String, DataFrame>) -> Result<Self::Output>;

    /// Check that the plot can be rendered by this writer
    fn validate(&self, plot: &Plot) -> Result<()>;
}
