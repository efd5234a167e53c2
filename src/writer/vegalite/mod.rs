//! Vega-Lite JSON writer implementation
//!
//! Converts built plots and their layer data into Vega-Lite JSON for
//! web-based rendering.
//!
//! # Mapping Strategy
//!
//! - Geom -> Vega-Lite mark type
//! - Aesthetics -> Vega-Lite encoding channels
//! - Layers -> Vega-Lite layer composition
//! - Layer data -> one inline dataset, filtered per layer
//!
//! # Example
//!
//! ```rust,ignore
//! use ggprop::writer::{Writer, VegaLiteWriter};
//!
//! let spec = plot.build()?;
//! let vega_json = spec.render(&VegaLiteWriter::new())?;
//! // Can be rendered in browser with vega-embed
//! ```

mod data;
mod encoding;
mod projection;

use serde_json::{json, Map, Value};
use std::collections::HashMap;

use crate::plot::{Facet, GeomType, Layer, ParameterValue, ThemeElement};
use crate::writer::Writer;
use crate::{naming, DataFrame, GgpropError, Plot, Result};

use data::{source_filter, unify_datasets};
use encoding::{build_layer_encoding, infer_field_type};
use projection::apply_project_transforms;

/// Vega-Lite JSON writer
///
/// Generates Vega-Lite v6 specifications from built plots.
pub struct VegaLiteWriter {
    /// Vega-Lite schema version
    schema: String,
}

impl VegaLiteWriter {
    /// Create a new Vega-Lite writer with default settings
    pub fn new() -> Self {
        Self {
            schema: "https://vega.github.io/schema/vega-lite/v6.json".to_string(),
        }
    }

    /// Build the Vega-Lite spec as a JSON value
    pub fn to_value(&self, plot: &Plot, data: &HashMap<String, DataFrame>) -> Result<Value> {
        self.validate(plot)?;

        // Determine which dataset each layer uses
        let keys: Vec<String> = plot
            .layers
            .iter()
            .enumerate()
            .map(|(idx, layer)| {
                layer
                    .data_key
                    .clone()
                    .unwrap_or_else(|| naming::layer_key(idx))
            })
            .collect();
        let frames: Vec<(&str, &DataFrame)> = keys
            .iter()
            .enumerate()
            .map(|(idx, key)| {
                data.get(key).map(|df| (key.as_str(), df)).ok_or_else(|| {
                    GgpropError::WriterError(format!(
                        "Missing data source '{}' for layer {}",
                        key,
                        idx + 1
                    ))
                })
            })
            .collect::<Result<_>>()?;

        let mut vl_spec = json!({
            "$schema": self.schema,
        });

        // Responsive plot sizing
        vl_spec["width"] = json!("container");
        vl_spec["height"] = json!("container");

        if let Some(title) = plot.label("title") {
            vl_spec["title"] = json!(title);
        }

        vl_spec["data"] = json!({"values": unify_datasets(&frames)?});

        let mut layers = Vec::with_capacity(plot.layers.len());
        for (layer, (key, df)) in plot.layers.iter().zip(&frames) {
            let mut transforms = vec![source_filter(key)];
            transforms.extend(nudge_transforms(layer, df));

            layers.push(json!({
                "mark": geom_to_mark(layer),
                "transform": transforms,
                "encoding": Value::Object(build_layer_encoding(layer, df, plot)?),
            }));
        }
        vl_spec["layer"] = json!(layers);

        // Coordinate transforms modify the finished layer encodings
        apply_project_transforms(plot, &mut vl_spec);

        if let Some(config) = theme_config(plot) {
            vl_spec["config"] = config;
        }

        if let Some(facet) = &plot.facet {
            apply_facet(facet, frames[0].1, &mut vl_spec)?;
        }

        Ok(vl_spec)
    }
}

impl Default for VegaLiteWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for VegaLiteWriter {
    type Output = String;

    fn write(&self, plot: &Plot, data: &HashMap<String, DataFrame>) -> Result<String> {
        let vl_spec = self.to_value(plot, data)?;
        serde_json::to_string_pretty(&vl_spec).map_err(|e| {
            GgpropError::WriterError(format!("Failed to serialize Vega-Lite JSON: {}", e))
        })
    }

    fn validate(&self, plot: &Plot) -> Result<()> {
        if plot.layers.is_empty() {
            return Err(GgpropError::ValidationError(
                "VegaLiteWriter requires at least one layer".to_string(),
            ));
        }

        for layer in &plot.layers {
            layer.validate_required_aesthetics().map_err(|e| {
                GgpropError::ValidationError(format!("Layer validation failed: {}", e))
            })?;
            layer.validate_settings().map_err(|e| {
                GgpropError::ValidationError(format!("Layer validation failed: {}", e))
            })?;
        }

        if let Some(facet) = &plot.facet {
            let too_many = match facet {
                Facet::Wrap { variables, .. } => variables.len() > 1,
                Facet::Grid { rows, cols, .. } => rows.len() > 1 || cols.len() > 1,
            };
            if too_many {
                return Err(GgpropError::WriterError(
                    "VegaLiteWriter supports one facet variable per direction".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Vega-Lite mark for a layer
fn geom_to_mark(layer: &Layer) -> Value {
    match layer.geom.geom_type() {
        GeomType::Bar => {
            let width = layer
                .parameter("width")
                .and_then(|w| w.as_number())
                .unwrap_or(0.9);
            json!({"type": "bar", "width": {"band": width}})
        }
        GeomType::Text => json!({"type": "text"}),
    }
}

/// Calculate transforms shifting text by `nudge_x`/`nudge_y`
///
/// Nudges are in data units, so only quantitative positions move.
fn nudge_transforms(layer: &Layer, df: &DataFrame) -> Vec<Value> {
    let mut transforms = Vec::new();
    for (param, aesthetic) in [("nudge_x", "x"), ("nudge_y", "y")] {
        let Some(amount) = layer
            .parameters
            .get(param)
            .and_then(ParameterValue::as_number)
            .filter(|n| *n != 0.0)
        else {
            continue;
        };
        if infer_field_type(df, aesthetic) != "quantitative" {
            tracing::warn!(
                "{} ignored: '{}' is not a continuous position",
                param,
                aesthetic
            );
            continue;
        }
        transforms.push(json!({
            "calculate": format!("datum['{}'] + {}", aesthetic, amount),
            "as": aesthetic,
        }));
    }
    transforms
}

/// Plot-wide config for blanked panel elements
fn theme_config(plot: &Plot) -> Option<Value> {
    let mut config = Map::new();
    if plot.is_blank(&ThemeElement::PanelBackground) {
        config.insert("view".to_string(), json!({"stroke": null, "fill": null}));
    }
    if plot.is_blank(&ThemeElement::PanelGridMajor) {
        config.insert("axis".to_string(), json!({"grid": false}));
    }
    if config.is_empty() {
        None
    } else {
        Some(Value::Object(config))
    }
}

/// Move the layers into a facet spec
fn apply_facet(facet: &Facet, df: &DataFrame, vl_spec: &mut Value) -> Result<()> {
    let facet_field = |name: &str| json!({"field": name, "type": infer_field_type(df, name)});

    let facet_spec = match facet {
        Facet::Wrap { variables, .. } => match variables.first() {
            Some(var) => facet_field(var),
            None => return Ok(()),
        },
        Facet::Grid { rows, cols, .. } => {
            let mut grid = Map::new();
            if let Some(row) = rows.first() {
                grid.insert("row".to_string(), facet_field(row));
            }
            if let Some(column) = cols.first() {
                grid.insert("column".to_string(), facet_field(column));
            }
            if grid.is_empty() {
                return Ok(());
            }
            Value::Object(grid)
        }
    };

    let object = vl_spec.as_object_mut().ok_or_else(|| {
        GgpropError::InternalError("Vega-Lite spec is not an object".to_string())
    })?;
    let layers = object.remove("layer").unwrap_or_else(|| json!([]));
    // Facets are sized per panel
    object.remove("width");
    object.remove("height");
    object.insert("facet".to_string(), facet_spec);
    object.insert("spec".to_string(), json!({"layer": layers}));

    let scales = facet.scales();
    let mut resolve = Map::new();
    if scales.free_x() {
        resolve.insert("x".to_string(), json!("independent"));
    }
    if scales.free_y() {
        resolve.insert("y".to_string(), json!("independent"));
    }
    if !resolve.is_empty() {
        object.insert("resolve".to_string(), json!({"scale": resolve}));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ggally_colbar, ggally_rowbar, BarChartOptions};
    use crate::plot::{FacetScales, Mappings};
    use polars::prelude::*;

    fn survey() -> DataFrame {
        df! {
            "class" => ["a", "a", "b", "b"],
            "answer" => ["yes", "no", "yes", "no"],
            "sex" => ["f", "m", "f", "m"],
            "n" => [1.0, 3.0, 2.0, 2.0],
        }
        .unwrap()
    }

    fn mapping() -> Mappings {
        Mappings::new()
            .with("x", "class")
            .with("y", "answer")
            .with("weight", "n")
    }

    fn render(plot: Plot) -> Value {
        let spec = plot.build().unwrap();
        VegaLiteWriter::new()
            .to_value(spec.plot(), spec.data())
            .unwrap()
    }

    #[test]
    fn test_colbar_spec() {
        let vl = render(ggally_colbar(survey(), mapping(), BarChartOptions::colbar()).unwrap());

        assert_eq!(vl["$schema"], "https://vega.github.io/schema/vega-lite/v6.json");
        assert_eq!(vl["data"]["values"].as_array().unwrap().len(), 8);

        let bar = &vl["layer"][0];
        assert_eq!(bar["mark"]["type"], "bar");
        assert_eq!(bar["mark"]["width"]["band"], 0.9);
        assert_eq!(bar["transform"][0]["filter"]["equal"], "__ggprop_layer_0__");
        assert_eq!(bar["encoding"]["x"]["field"], "x");
        assert_eq!(bar["encoding"]["x"]["title"], "class");
        assert_eq!(bar["encoding"]["y"]["field"], "ymax");
        assert_eq!(bar["encoding"]["y"]["title"], "prop");
        assert_eq!(bar["encoding"]["y"]["axis"]["format"], ".0%");
        assert_eq!(bar["encoding"]["y2"]["field"], "ymin");
        assert_eq!(bar["encoding"]["fill"]["field"], "fill");
        assert_eq!(bar["encoding"]["fill"]["title"], "answer");
        assert!(bar["encoding"].get("by").is_none());

        let text = &vl["layer"][1];
        assert_eq!(text["mark"]["type"], "text");
        assert_eq!(text["encoding"]["text"]["field"], "label");
        assert_eq!(text["encoding"]["y"]["field"], "y");
        assert_eq!(text["encoding"]["color"]["value"], "black");
        assert!(text["encoding"]["size"]["value"].as_f64().unwrap() > 3.0);
        // Text is coloured by `color`; the inherited fill only groups
        assert!(text["encoding"].get("fill").is_none());
        assert!(vl.get("config").is_none());
    }

    #[test]
    fn test_colbar_theme_options() {
        let options = BarChartOptions::colbar()
            .with_remove_percentage_axis(true)
            .with_remove_background(true);
        let vl = render(ggally_colbar(survey(), mapping(), options).unwrap());

        let y = &vl["layer"][0]["encoding"]["y"];
        assert_eq!(y["axis"]["labels"], false);
        assert_eq!(y["axis"]["ticks"], false);
        assert_eq!(y["title"], Value::Null);
        assert_eq!(vl["layer"][0]["encoding"]["x"]["axis"]["ticks"], false);
        assert_eq!(vl["config"]["axis"]["grid"], false);
        assert_eq!(vl["config"]["view"]["stroke"], Value::Null);
    }

    #[test]
    fn test_rowbar_spec_is_flipped() {
        let vl = render(
            ggally_rowbar(
                survey(),
                Mappings::new().with("x", "answer").with("y", "class"),
                BarChartOptions::rowbar(),
            )
            .unwrap(),
        );
        let bar = &vl["layer"][0];
        assert_eq!(bar["encoding"]["y"]["field"], "x");
        assert_eq!(bar["encoding"]["y"]["title"], "class");
        assert_eq!(bar["encoding"]["x"]["field"], "ymax");
        assert_eq!(bar["encoding"]["x"]["axis"]["format"], ".0%");
        assert_eq!(bar["encoding"]["x2"]["field"], "ymin");
        assert_eq!(bar["encoding"]["fill"]["sort"], "descending");
        assert_eq!(bar["mark"]["height"]["band"], 0.9);
    }

    #[test]
    fn test_title_and_facets() {
        let plot = ggally_colbar(survey(), mapping(), BarChartOptions::colbar())
            .unwrap()
            .with_label("title", "Answers by class")
            .with_facet(Facet::wrap(&["sex"]).with_scales(FacetScales::FreeX));
        let vl = render(plot);

        assert_eq!(vl["title"], "Answers by class");
        assert_eq!(vl["facet"]["field"], "sex");
        assert_eq!(vl["facet"]["type"], "nominal");
        assert_eq!(vl["spec"]["layer"].as_array().unwrap().len(), 2);
        assert!(vl.get("layer").is_none());
        assert!(vl.get("width").is_none());
        assert_eq!(vl["resolve"]["scale"]["x"], "independent");
    }

    #[test]
    fn test_grid_facet() {
        let plot = ggally_colbar(survey(), mapping(), BarChartOptions::colbar())
            .unwrap()
            .with_facet(Facet::grid(&["sex"], &[]));
        let vl = render(plot);
        assert_eq!(vl["facet"]["row"]["field"], "sex");
        assert!(vl["facet"].get("column").is_none());
    }

    #[test]
    fn test_multi_variable_wrap_is_rejected() {
        let plot = ggally_colbar(survey(), mapping(), BarChartOptions::colbar())
            .unwrap()
            .with_facet(Facet::wrap(&["sex", "answer"]));
        let spec = plot.build().unwrap();
        let err = spec.render(&VegaLiteWriter::new()).unwrap_err();
        assert!(matches!(err, GgpropError::WriterError(_)));
    }

    #[test]
    fn test_missing_layer_data() {
        let plot = ggally_colbar(survey(), mapping(), BarChartOptions::colbar()).unwrap();
        let spec = plot.build().unwrap();
        let err = VegaLiteWriter::new()
            .write(spec.plot(), &HashMap::new())
            .unwrap_err();
        assert!(err.to_string().contains("Missing data source"));
    }

    #[test]
    fn test_write_produces_json_text() {
        let plot = ggally_colbar(survey(), mapping(), BarChartOptions::colbar()).unwrap();
        let json = plot.build().unwrap().render(&VegaLiteWriter::new()).unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["layer"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_nudge_only_moves_continuous_positions() {
        let df = df!("x" => ["a"], "y" => [0.5]).unwrap();
        let layer = Layer::new(crate::plot::Geom::text())
            .with_parameter("nudge_y", 0.1)
            .unwrap()
            .with_parameter("nudge_x", 0.2)
            .unwrap();
        let transforms = nudge_transforms(&layer, &df);
        assert_eq!(transforms.len(), 1);
        assert_eq!(transforms[0]["as"], "y");
    }
}
