//! Inline data for the Vega-Lite writer
//!
//! All layer frames are merged into one dataset; every row carries the key
//! of the layer it belongs to in the source column so that each layer can
//! filter its own rows back out.

use polars::prelude::*;
use serde_json::{Map, Number, Value};

use crate::{naming, GgpropError, Result};

/// Convert a single value to JSON
///
/// Categorical and enum columns are expected to have been cast to text.
fn any_value_to_json(value: AnyValue) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Bool(b),
        AnyValue::Int8(v) => Value::Number(v.into()),
        AnyValue::Int16(v) => Value::Number(v.into()),
        AnyValue::Int32(v) => Value::Number(v.into()),
        AnyValue::Int64(v) => Value::Number(v.into()),
        AnyValue::UInt8(v) => Value::Number(v.into()),
        AnyValue::UInt16(v) => Value::Number(v.into()),
        AnyValue::UInt32(v) => Value::Number(v.into()),
        AnyValue::UInt64(v) => Value::Number(v.into()),
        AnyValue::Float32(v) => Number::from_f64(v as f64)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        AnyValue::Float64(v) => Number::from_f64(v)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        AnyValue::String(s) => Value::String(s.to_string()),
        AnyValue::StringOwned(s) => Value::String(s.to_string()),
        other => {
            tracing::debug!("Converting unsupported Polars type to string: {:?}", other);
            Value::String(format!("{}", other))
        }
    }
}

/// Rows of a frame as JSON objects, tagged with `source`
pub(super) fn frame_to_values(df: &DataFrame, source: &str) -> Result<Vec<Value>> {
    let columns: Vec<Column> = df
        .get_columns()
        .iter()
        .map(|column| match column.dtype() {
            DataType::Categorical(..) | DataType::Enum(..) => column.cast(&DataType::String),
            _ => Ok(column.clone()),
        })
        .collect::<PolarsResult<_>>()?;

    let mut values = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let mut object = Map::new();
        for column in &columns {
            let value = column.get(row).map_err(|e| {
                GgpropError::WriterError(format!(
                    "Failed to read row {} of column '{}': {}",
                    row,
                    column.name(),
                    e
                ))
            })?;
            object.insert(column.name().to_string(), any_value_to_json(value));
        }
        object.insert(
            naming::SOURCE_COLUMN.to_string(),
            Value::String(source.to_string()),
        );
        values.push(Value::Object(object));
    }
    Ok(values)
}

/// Merge the frames of all layers into one list of rows
pub(super) fn unify_datasets(frames: &[(&str, &DataFrame)]) -> Result<Vec<Value>> {
    let mut unified = Vec::new();
    for (key, df) in frames {
        unified.extend(frame_to_values(df, key)?);
    }
    Ok(unified)
}

/// Filter transform selecting the rows of one layer
pub(super) fn source_filter(key: &str) -> Value {
    serde_json::json!({
        "filter": {
            "field": naming::SOURCE_COLUMN,
            "equal": key
        }
    })
}
