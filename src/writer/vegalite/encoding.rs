//! Encoding channel construction for the Vega-Lite writer
//!
//! Builds Vega-Lite encoding channels from layer mappings and settings,
//! including field type inference, axis formats, titles, legends and the
//! theme's axis elements.

use polars::prelude::*;
use serde_json::{json, Map, Value};

use crate::plot::layer::GeomType;
use crate::plot::{
    aesthetic, AestheticValue, GuideType, Layer, ParameterValue, Plot, ScaleTypeKind,
    ThemeElement,
};
use crate::{GgpropError, Result};

/// Millimetres to points, as ggplot2 sizes text
const MM_TO_POINTS: f64 = 72.27 / 25.4;

/// Points to pixels (CSS standard: 96 DPI, 72 points/inch)
const POINTS_TO_PIXELS: f64 = 96.0 / 72.0;

/// Infer the Vega-Lite field type of a column
pub(super) fn infer_field_type(df: &DataFrame, field: &str) -> &'static str {
    match df.column(field).map(|c| c.dtype().clone()) {
        Ok(DataType::Enum(..)) => "ordinal",
        Ok(dtype) if ScaleTypeKind::infer(&dtype).is_discrete() => "nominal",
        Ok(dtype) if dtype.is_temporal() => "temporal",
        Ok(_) => "quantitative",
        Err(_) => "nominal",
    }
}

/// Vega-Lite channel for an aesthetic of a geom
pub(super) fn map_aesthetic_name(geom: GeomType, aesthetic: &str) -> &str {
    match (geom, aesthetic) {
        // Bars are outlined by `color` and filled by `fill`
        (GeomType::Bar, "color") => "stroke",
        (GeomType::Bar, "linewidth") => "strokeWidth",
        (GeomType::Text, "label") => "text",
        (_, other) => other,
    }
}

/// Convert a literal setting to a Vega-Lite value
pub(super) fn literal_value(geom: GeomType, aesthetic: &str, value: &ParameterValue) -> Value {
    match (geom, aesthetic, value) {
        // Text size is given in millimetres
        (GeomType::Text, "size", ParameterValue::Number(mm)) => {
            json!(mm * MM_TO_POINTS * POINTS_TO_PIXELS)
        }
        // Vega-Lite rotates clockwise
        (GeomType::Text, "angle", ParameterValue::Number(deg)) => json!(-deg),
        (GeomType::Bar, "linewidth", ParameterValue::Number(pt)) => json!(pt * POINTS_TO_PIXELS),
        _ => value.to_json(),
    }
}

/// Title of an aesthetic's axis or legend
///
/// An explicit label wins (an empty label hides the title), then the scale
/// name, then the mapped column's original name.
fn channel_title(plot: &Plot, scale_aesthetic: &str, value: &AestheticValue) -> Option<Value> {
    if let Some(label) = plot.label(scale_aesthetic) {
        return Some(if label.is_empty() {
            Value::Null
        } else {
            json!(label)
        });
    }
    if let Some(name) = plot.find_scale(scale_aesthetic).and_then(|s| s.name.as_ref()) {
        return Some(json!(name));
    }
    value.title().map(|t| json!(t))
}

/// Axis properties of a positional channel, from its scale and the theme
fn axis_properties(plot: &Plot, scale_aesthetic: &str) -> Map<String, Value> {
    let mut axis = Map::new();
    if let Some(format) = plot
        .find_scale(scale_aesthetic)
        .and_then(|s| s.labels.as_ref())
        .and_then(|l| l.to_d3_format())
    {
        axis.insert("format".to_string(), json!(format));
    }
    let aes = scale_aesthetic.to_string();
    if plot.is_blank(&ThemeElement::AxisText(aes.clone())) {
        axis.insert("labels".to_string(), json!(false));
    }
    if plot.is_blank(&ThemeElement::AxisTicks(aes.clone())) {
        axis.insert("ticks".to_string(), json!(false));
    }
    if plot.is_blank(&ThemeElement::AxisTitle(aes)) {
        axis.insert("title".to_string(), Value::Null);
    }
    axis
}

/// Build the encoding channel for a mapped column
///
/// `aesthetic` is the layer aesthetic (e.g. `ymin`); scales, labels and
/// guides are looked up by its primary aesthetic (`y`).
pub(super) fn build_encoding_channel(
    aesthetic: &str,
    value: &AestheticValue,
    df: &DataFrame,
    plot: &Plot,
) -> Result<Value> {
    let AestheticValue::Column { name, .. } = value else {
        return Err(GgpropError::InternalError(format!(
            "Aesthetic '{}' is not mapped to a column",
            aesthetic
        )));
    };

    let primary = aesthetic::primary_aesthetic(aesthetic);
    let field_type = match plot.find_scale(primary).and_then(|s| s.scale_type) {
        Some(ScaleTypeKind::Continuous) => "quantitative",
        Some(ScaleTypeKind::Discrete) => "nominal",
        None => infer_field_type(df, name),
    };

    let mut channel = json!({
        "field": name,
        "type": field_type,
    });

    if aesthetic::is_positional(aesthetic) {
        if field_type == "quantitative" {
            // Positions are stacked before rendering
            channel["stack"] = Value::Null;
        }
        let axis = axis_properties(plot, primary);
        if !axis.is_empty() {
            channel["axis"] = Value::Object(axis);
        }
    } else {
        match plot.find_guide(primary) {
            Some(guide) if guide.guide_type == GuideType::None => {
                channel["legend"] = Value::Null;
            }
            Some(guide) if guide.reverse => {
                channel["sort"] = json!("descending");
            }
            _ => {}
        }
    }

    if let Some(title) = channel_title(plot, primary, value) {
        if !channel.get("axis").is_some_and(|a| a.get("title").is_some()) {
            channel["title"] = title;
        }
    }

    Ok(channel)
}

/// Build the encoding of a layer
///
/// Stacked layers draw bars from `ymin` to `ymax`; other geoms are placed
/// at `y`. Only aesthetics the geom draws are encoded; the rest were used
/// for grouping by the stat. Settings become value channels unless the
/// aesthetic is mapped.
pub(super) fn build_layer_encoding(
    layer: &Layer,
    df: &DataFrame,
    plot: &Plot,
) -> Result<Map<String, Value>> {
    let geom = layer.geom.geom_type();
    let supported = layer.geom.aesthetics();
    let stacked_bar = geom == GeomType::Bar
        && layer.mappings.contains_key("ymin")
        && layer.mappings.contains_key("ymax");

    let mut encoding = Map::new();
    for aes in layer.mappings.names() {
        let Some(value) = layer.mappings.get(&aes) else {
            continue;
        };
        let channel = match aes.as_str() {
            "ymax" if stacked_bar => "y",
            "ymin" if stacked_bar => "y2",
            "y" if stacked_bar => continue,
            "ymin" | "ymax" => continue,
            other if supported.contains(other) => map_aesthetic_name(geom, other),
            _ => continue,
        };
        let mut built = match value {
            AestheticValue::Literal(literal) => {
                json!({"value": literal_value(geom, &aes, literal)})
            }
            AestheticValue::Column { .. } => build_encoding_channel(&aes, value, df, plot)?,
        };
        if channel == "y" && stacked_bar {
            // The bar spans the stack; title it after the stacked value
            if let Some(title) = layer
                .mappings
                .get("y")
                .and_then(|y| channel_title(plot, "y", y))
            {
                built["title"] = title;
            }
        }
        if channel == "y2" {
            // y2 shares the y scale and axis
            built = json!({"field": built["field"]});
        }
        encoding.insert(channel.to_string(), built);
    }

    let mut settings: Vec<&String> = layer.parameters.keys().collect();
    settings.sort();
    for name in settings {
        if !supported.contains(name) {
            continue;
        }
        let channel = map_aesthetic_name(geom, name);
        if !encoding.contains_key(channel) {
            let value = literal_value(geom, name, &layer.parameters[name]);
            encoding.insert(channel.to_string(), json!({"value": value}));
        }
    }

    Ok(encoding)
}
