/*!
# ggprop - proportions for the grammar of graphics

ggprop adds a weighted proportion statistic (`stat_prop`) to a small
grammar-of-graphics plot model, along with two chart builders for column and
row percentage bar charts (`ggally_colbar`, `ggally_rowbar`).

## Example

```rust,ignore
use ggprop::{ggally_colbar, BarChartOptions, Mappings};
use ggprop::writer::VegaLiteWriter;

let data = ggprop::data::titanic()?;
let mapping = Mappings::new()
    .with("x", "Class")
    .with("y", "Survived")
    .with("weight", "Freq");

let plot = ggally_colbar(data, mapping, BarChartOptions::colbar())?;
let spec = plot.build()?;
let json = spec.render(&VegaLiteWriter::new())?;
```

## Architecture

- `plot` - the plot specification: layers, geoms, stats, positions, scales,
  guides, projections, facets, labels and theme
- `execute` - the rendering pass that turns a `Plot` into per-layer data
- `chart` - ready-made percentage bar charts
- `writer` - output backends (Vega-Lite JSON)
*/

pub mod chart;
pub mod data;
pub mod execute;
pub mod naming;
pub mod plot;
pub mod writer;

pub use chart::{ggally_colbar, ggally_rowbar, BarChartOptions};
pub use execute::{Metadata, Spec};
pub use plot::layer::stat::stat_prop;
pub use plot::*;

// Re-export the table type used throughout the crate
pub use polars::prelude::DataFrame;

/// Version of the ggprop crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Main library error type
#[derive(thiserror::Error, Debug)]
pub enum GgpropError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Writer error: {0}")]
    WriterError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<polars::prelude::PolarsError> for GgpropError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        GgpropError::DataError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GgpropError>;
