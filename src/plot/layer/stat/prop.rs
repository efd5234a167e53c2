//! Proportion stat implementation
//!
//! Sums weights for every combination of the layer's aesthetics and divides
//! each sum by the total of its `by` level, so proportions add up to one
//! within each level of `by` (per facet panel).

use polars::prelude::*;
use std::collections::HashMap;

use super::{StatResult, StatTrait, StatType};
use crate::plot::layer::geom::{DefaultParam, DefaultParamValue};
use crate::plot::layer::position::Position;
use crate::plot::layer::Layer;
use crate::plot::types::{find_column, is_numeric_dtype};
use crate::plot::{Geom, Mappings, ParameterValue, Schema};
use crate::{naming, GgpropError, Result};

/// Stat column holding the summed weights
pub const COUNT_COLUMN: &str = "count";

/// Stat column holding the proportion within the `by` level
pub const PROP_COLUMN: &str = "prop";

/// Proportion stat - weighted proportions within levels of `by`
#[derive(Debug, Clone, Copy)]
pub struct Prop;

impl StatTrait for Prop {
    fn stat_type(&self) -> StatType {
        StatType::Prop
    }

    fn aesthetics(&self) -> &'static [&'static str] {
        &["x", "by", "weight"]
    }

    fn default_params(&self) -> &'static [DefaultParam] {
        &[DefaultParam {
            name: "na_rm",
            default: DefaultParamValue::Boolean(false),
        }]
    }

    fn default_remappings(&self) -> &'static [(&'static str, &'static str)] {
        &[(PROP_COLUMN, "y")]
    }

    fn default_position(&self) -> Position {
        Position::fill()
    }

    fn setup(
        &self,
        mappings: &Mappings,
        parameters: &HashMap<String, ParameterValue>,
    ) -> Result<()> {
        if mappings.contains_key("y") || parameters.contains_key("y") {
            return Err(GgpropError::ValidationError(
                "stat_prop() must not be used with a 'y' aesthetic".to_string(),
            ));
        }
        Ok(())
    }

    fn compute(
        &self,
        data: &DataFrame,
        schema: &Schema,
        mappings: &Mappings,
        group_by: &[String],
        parameters: &HashMap<String, ParameterValue>,
    ) -> Result<StatResult> {
        self.setup(mappings, parameters)?;
        for required in ["x", "by"] {
            if !mappings.contains_key(required) {
                return Err(GgpropError::ValidationError(format!(
                    "stat_prop() requires the '{}' aesthetic",
                    required
                )));
            }
        }

        let by = find_column(schema, "by").ok_or_else(|| {
            GgpropError::ValidationError(
                "The 'by' aesthetic of stat_prop() must be mapped to a column".to_string(),
            )
        })?;
        if !by.is_categorical {
            return Err(GgpropError::ValidationError(format!(
                "The 'by' aesthetic of stat_prop() must be categorical, not {:?}. \
                 Convert text columns with ggprop::data::as_categorical()",
                by.dtype
            )));
        }

        let weight = match find_column(schema, "weight") {
            Some(info) if !is_numeric_dtype(&info.dtype) => {
                return Err(GgpropError::ValidationError(format!(
                    "The 'weight' aesthetic of stat_prop() must be numeric, not {:?}",
                    info.dtype
                )));
            }
            Some(_) => col("weight").cast(DataType::Float64),
            None => lit(1.0),
        };

        // Every aesthetic column except the weight is a grouping key,
        // together with the panel columns
        let keys: Vec<String> = schema
            .iter()
            .map(|c| c.name.clone())
            .filter(|name| name != "weight")
            .collect();

        let mut denominator: Vec<Expr> = vec![col("by")];
        denominator.extend(
            group_by
                .iter()
                .filter(|g| keys.contains(g))
                .map(|g| col(g.as_str())),
        );

        let na_rm = parameters
            .get("na_rm")
            .and_then(ParameterValue::as_bool)
            .unwrap_or(false);

        let mut lf = data.clone().lazy();
        if na_rm {
            if let Some(complete) = keys
                .iter()
                .map(|k| col(k.as_str()).is_not_null())
                .reduce(|acc, e| acc.and(e))
            {
                lf = lf.filter(complete);
            }
        }

        let key_exprs: Vec<Expr> = keys.iter().map(|k| col(k.as_str())).collect();
        let result = lf
            .with_column(weight.alias(naming::WEIGHT_COLUMN))
            .group_by_stable(key_exprs)
            .agg([col(naming::WEIGHT_COLUMN).sum().alias(COUNT_COLUMN)])
            .with_column(col(COUNT_COLUMN).fill_null(lit(0.0)))
            .with_column(
                (col(COUNT_COLUMN) / col(COUNT_COLUMN).abs().sum().over(denominator))
                    .fill_nan(lit(0.0))
                    .fill_null(lit(0.0))
                    .alias(PROP_COLUMN),
            )
            .collect()?;

        if na_rm && result.height() == 0 && data.height() > 0 {
            tracing::warn!("stat_prop() removed every row because of missing values");
        }
        tracing::debug!(
            rows = data.height(),
            groups = result.height(),
            "stat_prop computed proportions"
        );

        Ok(StatResult::Transformed {
            data: result,
            stat_columns: vec![COUNT_COLUMN.to_string(), PROP_COLUMN.to_string()],
            consumed_aesthetics: vec!["weight".to_string()],
        })
    }
}

impl std::fmt::Display for Prop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "prop")
    }
}

/// Build a layer that draws weighted proportions
///
/// The layer uses the bar geom and the fill position; `parameters` are passed
/// through to the layer and must be known to the geom or the stat (settings
/// such as `opacity` included). A `y` mapping or setting is rejected here,
/// and again at render time in case one is inherited from the plot.
pub fn stat_prop(
    mapping: Mappings,
    data: Option<DataFrame>,
    parameters: HashMap<String, ParameterValue>,
) -> Result<Layer> {
    Prop.setup(&mapping, &parameters)?;

    let mut layer = Layer::new(Geom::bar())
        .with_stat(super::Stat::prop())
        .with_mappings(mapping);
    if let Some(df) = data {
        layer = layer.with_data(df);
    }

    let mut names: Vec<&String> = parameters.keys().collect();
    names.sort();
    for name in names {
        layer = layer.with_parameter(name, parameters[name].clone())?;
    }

    layer.validate_mappings()?;
    Ok(layer)
}
