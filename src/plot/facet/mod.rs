//! Facet types
//!
//! Faceting splits a plot into small multiples, one panel per combination
//! of the facet variables.

mod types;

pub use types::{Facet, FacetScales};
