//! Position adjustments
//!
//! Stacking turns each row's `y` into a segment `[ymin, ymax]` within the
//! stack of its `x` value (per facet panel). `Fill` additionally rescales
//! every stack to span 0..1.

use polars::prelude::*;

use crate::{naming, GgpropError, Result};

/// Aesthetics that order the segments of a stack, in priority order
const STACK_ORDER: &[&str] = &["fill", "color", "group"];

/// Position adjustment of a layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// Draw at the computed values
    Identity,
    /// Stack segments on top of each other
    Stack { vjust: f64, reverse: bool },
    /// Stack segments and rescale each stack to 0..1
    Fill { vjust: f64, reverse: bool },
}

impl Position {
    pub fn stack() -> Self {
        Position::Stack {
            vjust: 1.0,
            reverse: false,
        }
    }

    pub fn fill() -> Self {
        Position::Fill {
            vjust: 1.0,
            reverse: false,
        }
    }

    /// Where `y` lands within its segment (0 = bottom, 1 = top)
    pub fn with_vjust(self, vjust: f64) -> Self {
        match self {
            Position::Identity => Position::Identity,
            Position::Stack { reverse, .. } => Position::Stack { vjust, reverse },
            Position::Fill { reverse, .. } => Position::Fill { vjust, reverse },
        }
    }

    /// Stack the first group at the bottom instead of the top
    pub fn with_reverse(self, reverse: bool) -> Self {
        match self {
            Position::Identity => Position::Identity,
            Position::Stack { vjust, .. } => Position::Stack { vjust, reverse },
            Position::Fill { vjust, .. } => Position::Fill { vjust, reverse },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Position::Identity => "identity",
            Position::Stack { .. } => "stack",
            Position::Fill { .. } => "fill",
        }
    }

    /// Whether this position produces `ymin`/`ymax` columns
    pub fn is_stacking(&self) -> bool {
        !matches!(self, Position::Identity)
    }

    /// Apply the adjustment to a layer frame
    ///
    /// `group_by` lists the panel columns; stacks never span panels.
    pub fn apply(&self, data: DataFrame, group_by: &[String]) -> Result<DataFrame> {
        let (vjust, reverse, normalise) = match *self {
            Position::Identity => return Ok(data),
            Position::Stack { vjust, reverse } => (vjust, reverse, false),
            Position::Fill { vjust, reverse } => (vjust, reverse, true),
        };

        for required in ["x", "y"] {
            if data.column(required).is_err() {
                return Err(GgpropError::ValidationError(format!(
                    "position_{}() requires the '{}' aesthetic",
                    self.name(),
                    required
                )));
            }
        }

        let names: Vec<String> = data
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();

        let mut partition: Vec<Expr> = group_by
            .iter()
            .filter(|g| names.contains(g))
            .map(|g| col(g.as_str()))
            .collect();
        partition.push(col("x"));

        let order: Vec<&str> = STACK_ORDER
            .iter()
            .copied()
            .filter(|aes| names.iter().any(|n| n == aes))
            .collect();

        let mut sort_by = partition.clone();
        sort_by.extend(order.iter().map(|aes| col(*aes)));
        let mut descending = vec![false; partition.len()];
        descending.extend(order.iter().map(|_| !reverse));

        let mut lf = data
            .lazy()
            .with_column(col("y").cast(DataType::Float64).fill_null(lit(0.0)))
            .sort_by_exprs(
                sort_by,
                SortMultipleOptions::default()
                    .with_order_descending_multi(descending)
                    .with_maintain_order(true),
            )
            .with_columns([
                col("y").cum_sum(false).over(partition.clone()).alias("ymax"),
                col("y")
                    .sum()
                    .over(partition)
                    .abs()
                    .alias(naming::STACK_TOTAL_COLUMN),
            ])
            .with_column((col("ymax") - col("y")).alias("ymin"));

        if normalise {
            // A stack whose segments cancel out spans nothing
            let normalised = |name: &str| {
                when(col(naming::STACK_TOTAL_COLUMN).eq(lit(0.0)))
                    .then(lit(0.0))
                    .otherwise(col(name) / col(naming::STACK_TOTAL_COLUMN))
                    .alias(name)
            };
            lf = lf.with_columns([normalised("ymin"), normalised("ymax")]);
        }

        let out = lf
            .with_column((col("ymin") + (col("ymax") - col("ymin")) * lit(vjust)).alias("y"))
            .collect()?;
        Ok(out.drop(naming::STACK_TOTAL_COLUMN)?)
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::Identity
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
