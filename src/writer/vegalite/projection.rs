//! Projection transformations for the Vega-Lite writer
//!
//! Modifies the layers of a Vega-Lite spec according to the plot's
//! projection: flipped coordinates swap the horizontal and vertical channel
//! families, and the `clip` property is applied to every mark.

use serde_json::{json, Map, Value};

use crate::plot::{CoordKind, ParameterValue, Plot};

/// Channels exchanged by a flip, in pairs
const FLIPPED_CHANNELS: &[(&str, &str)] = &[("x", "y"), ("x2", "y2"), ("xOffset", "yOffset")];

/// Apply the plot's projection to the layers of `vl_spec`
pub(super) fn apply_project_transforms(plot: &Plot, vl_spec: &mut Value) {
    let Some(projection) = &plot.projection else {
        return;
    };
    let clip = match projection.properties.get("clip") {
        Some(ParameterValue::Boolean(clip)) => Some(*clip),
        _ => None,
    };

    let Some(layers) = vl_spec.get_mut("layer").and_then(Value::as_array_mut) else {
        return;
    };
    for layer in layers {
        if projection.coord.coord_kind() == CoordKind::Flip {
            if let Some(encoding) = layer.get_mut("encoding").and_then(Value::as_object_mut) {
                flip_encoding(encoding);
            }
            if let Some(mark) = layer.get_mut("mark").and_then(Value::as_object_mut) {
                // Bar thickness follows the band axis
                swap_keys(mark, "width", "height");
            }
        }
        if let Some(clip) = clip {
            apply_clip(layer, clip);
        }
    }
}

fn flip_encoding(encoding: &mut Map<String, Value>) {
    for (a, b) in FLIPPED_CHANNELS {
        swap_keys(encoding, a, b);
    }
}

fn swap_keys(object: &mut Map<String, Value>, a: &str, b: &str) {
    let first = object.remove(a);
    let second = object.remove(b);
    if let Some(value) = first {
        object.insert(b.to_string(), value);
    }
    if let Some(value) = second {
        object.insert(a.to_string(), value);
    }
}

fn apply_clip(layer: &mut Value, clip: bool) {
    if let Some(mark) = layer.get_mut("mark") {
        if let Some(mark_type) = mark.as_str().map(str::to_string) {
            *mark = json!({"type": mark_type, "clip": clip});
        } else if let Some(obj) = mark.as_object_mut() {
            obj.insert("clip".to_string(), json!(clip));
        }
    }
}
