//! Rendering pass
//!
//! [`Plot::build`] computes every layer: it selects the mapped columns, runs
//! the stat, applies remappings and the position adjustment, and validates
//! the result. The output [`Spec`] pairs the plot (with each layer's mappings
//! pointing at the computed columns) with the per-layer data frames, ready
//! to be handed to a [`Writer`].

use polars::prelude::*;
use std::collections::HashMap;

use crate::naming;
use crate::plot::layer::{Layer, StatResult};
use crate::plot::types::{schema_of, AestheticValue, Mappings};
use crate::plot::{aesthetic, Plot};
use crate::writer::Writer;
use crate::{GgpropError, Result};

/// Summary of a rendering pass
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    /// Rows of each layer's computed data, in layer order
    pub rows: Vec<usize>,
    pub layer_count: usize,
}

/// A built plot: the specification plus its computed layer data
#[derive(Debug, Clone)]
pub struct Spec {
    plot: Plot,
    data: HashMap<String, DataFrame>,
    metadata: Metadata,
}

impl Spec {
    pub fn plot(&self) -> &Plot {
        &self.plot
    }

    /// Computed data of a layer
    pub fn layer_data(&self, idx: usize) -> Option<&DataFrame> {
        self.data.get(&naming::layer_key(idx))
    }

    /// All computed data keyed by layer key
    pub fn data(&self) -> &HashMap<String, DataFrame> {
        &self.data
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Render with a writer
    pub fn render<W: Writer>(&self, writer: &W) -> Result<W::Output> {
        writer.write(&self.plot, &self.data)
    }
}

impl Plot {
    /// Compute every layer of the plot
    pub fn build(&self) -> Result<Spec> {
        if self.layers.is_empty() {
            return Err(GgpropError::ValidationError(
                "Plot has no layers".to_string(),
            ));
        }
        if let Some(projection) = &self.projection {
            projection
                .coord
                .resolve_properties(&projection.properties)
                .map_err(GgpropError::ValidationError)?;
        }

        let facet_vars = self
            .facet
            .as_ref()
            .map(|f| f.get_variables())
            .unwrap_or_default();

        let mut built = self.clone();
        built.data = None;
        let mut data = HashMap::new();
        let mut rows = Vec::with_capacity(self.layers.len());

        for (idx, layer) in self.layers.iter().enumerate() {
            let (df, mappings) = self.build_layer(idx, layer, &facet_vars)?;
            let key = naming::layer_key(idx);
            rows.push(df.height());

            let out = &mut built.layers[idx];
            out.mappings = mappings;
            out.data = None;
            out.data_key = Some(key.clone());
            data.insert(key, df);
        }

        let metadata = Metadata {
            layer_count: rows.len(),
            rows,
        };
        tracing::debug!(layers = metadata.layer_count, "plot built");

        Ok(Spec {
            plot: built,
            data,
            metadata,
        })
    }

    fn build_layer(
        &self,
        idx: usize,
        layer: &Layer,
        facet_vars: &[String],
    ) -> Result<(DataFrame, Mappings)> {
        let source = layer
            .data
            .as_ref()
            .or(self.data.as_ref())
            .ok_or_else(|| {
                GgpropError::ValidationError(format!(
                    "Layer {} has no data and the plot has none to inherit",
                    idx + 1
                ))
            })?;

        let mappings = layer.resolved_mappings(&self.mappings);
        layer.validate_mappings()?;
        layer.validate_settings()?;
        layer.stat.setup(&mappings, &layer.parameters)?;

        let frame = layer_frame(source, &mappings, facet_vars, idx)?;
        let schema = schema_of(&frame);
        let parameters = layer.resolved_parameters();

        let (mut df, consumed) =
            match layer
                .stat
                .compute(&frame, &schema, &mappings, facet_vars, &parameters)?
            {
                StatResult::Identity => (frame, Vec::new()),
                StatResult::Transformed {
                    data,
                    consumed_aesthetics,
                    ..
                } => (data, consumed_aesthetics),
            };

        // Stat columns feeding aesthetics, by aesthetic
        let mut remapped: Vec<(String, String)> = Vec::new();
        for (stat_column, aes) in layer.stat.default_remappings() {
            if !mappings.contains_key(aes) && df.column(stat_column).is_ok() {
                let column = df.column(stat_column)?.clone().with_name((*aes).into());
                df.with_column(column)?;
                remapped.push((aes.to_string(), stat_column.to_string()));
            }
        }

        let mut remap_names: Vec<&String> = layer.remappings.keys().collect();
        remap_names.sort();
        for aes in remap_names {
            let after_stat = &layer.remappings[aes];
            let source_column = df.column(&after_stat.column).map_err(|_| {
                GgpropError::ValidationError(format!(
                    "Layer {}: stat '{}' does not compute '{}' for the '{}' aesthetic",
                    idx + 1,
                    layer.stat,
                    after_stat.column,
                    aes
                ))
            })?;
            let column = match &after_stat.format {
                Some(format) => format.format_column(source_column, aes)?,
                None => source_column.clone().with_name(aes.as_str().into()),
            };
            df.with_column(column)?;
            remapped.retain(|(a, _)| a != aes);
            remapped.push((aes.clone(), after_stat.column.clone()));
        }

        for aes in &consumed {
            if df.column(aes).is_ok() {
                df = df.drop(aes)?;
            }
        }

        let missing: Vec<&str> = layer
            .geom
            .aesthetics()
            .required()
            .into_iter()
            .filter(|aes| df.column(aes).is_err() && layer.literal_aesthetic(aes).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(GgpropError::ValidationError(format!(
                "Layer {}: geom_{}() requires the following missing aesthetics: {}",
                idx + 1,
                layer.geom,
                missing.join(", ")
            )));
        }

        let df = layer.position.apply(df, facet_vars)?;
        self.validate_scales(&df, idx)?;

        // Point the layer's mappings at the computed columns
        let mut computed = Mappings::new();
        for (aes, value) in &mappings.aesthetics {
            if consumed.contains(aes) {
                continue;
            }
            match value {
                AestheticValue::Column { name, .. } => {
                    if df.column(aes).is_ok() {
                        computed.insert(
                            aes,
                            AestheticValue::Column {
                                name: aes.clone(),
                                original_name: Some(name.clone()),
                            },
                        );
                    }
                }
                AestheticValue::Literal(_) => {
                    computed.insert(aes, value.clone());
                }
            }
        }
        for (aes, stat_column) in remapped {
            computed.insert(
                &aes,
                AestheticValue::Column {
                    name: aes.clone(),
                    original_name: Some(stat_column),
                },
            );
        }
        if layer.position.is_stacking() {
            for aes in ["ymin", "ymax"] {
                computed.insert(aes, AestheticValue::column(aes));
            }
        }

        tracing::debug!(
            layer = idx + 1,
            geom = %layer.geom,
            stat = %layer.stat,
            position = %layer.position,
            rows = df.height(),
            "layer computed"
        );
        Ok((df, computed))
    }

    /// Check that explicit scale types can hold the computed columns
    fn validate_scales(&self, df: &DataFrame, idx: usize) -> Result<()> {
        for scale in &self.scales {
            let Some(scale_type) = scale.scale_type else {
                continue;
            };
            let columns: Vec<&Column> = df
                .get_columns()
                .iter()
                .filter(|c| aesthetic::primary_aesthetic(c.name().as_str()) == scale.aesthetic)
                .collect();
            scale_type.validate_columns(&columns).map_err(|e| {
                GgpropError::ValidationError(format!(
                    "Layer {}: scale for '{}': {}",
                    idx + 1,
                    scale.aesthetic,
                    e
                ))
            })?;
        }
        Ok(())
    }
}

/// Select the mapped columns of `source`, renamed after their aesthetics,
/// together with the facet variables
fn layer_frame(
    source: &DataFrame,
    mappings: &Mappings,
    facet_vars: &[String],
    idx: usize,
) -> Result<DataFrame> {
    let missing_column = |name: &str| {
        GgpropError::DataError(format!(
            "Layer {}: column '{}' not found in data",
            idx + 1,
            name
        ))
    };

    let mut exprs = Vec::new();
    let mut names = Vec::new();
    for aes in mappings.names() {
        if let Some(AestheticValue::Column { name, .. }) = mappings.get(&aes) {
            if source.column(name).is_err() {
                return Err(missing_column(name));
            }
            exprs.push(col(name.as_str()).alias(aes.as_str()));
            names.push(aes);
        }
    }
    for var in facet_vars {
        if source.column(var).is_err() {
            return Err(missing_column(var));
        }
        if names.contains(var) {
            return Err(GgpropError::ValidationError(format!(
                "Facet variable '{}' clashes with an aesthetic of the same name",
                var
            )));
        }
        exprs.push(col(var.as_str()));
        names.push(var.clone());
    }

    Ok(source.clone().lazy().select(exprs).collect()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::as_categorical;
    use crate::plot::{AfterStat, Facet, Geom, LabelFormat, Scale, Stat};

    fn survey() -> DataFrame {
        let df = df! {
            "class" => ["a", "a", "b", "b", "b"],
            "answer" => ["yes", "no", "yes", "yes", "no"],
            "n" => [1.0, 3.0, 2.0, 2.0, 4.0],
            "sex" => ["f", "m", "f", "m", "f"],
        }
        .unwrap();
        as_categorical(&df, &["class", "answer", "sex"]).unwrap()
    }

    fn strings(df: &DataFrame, name: &str) -> Vec<String> {
        df.column(name)
            .unwrap()
            .cast(&DataType::String)
            .unwrap()
            .str()
            .unwrap()
            .iter()
            .map(|v| v.unwrap().to_string())
            .collect()
    }

    fn floats(df: &DataFrame, name: &str) -> Vec<f64> {
        df.column(name)
            .unwrap()
            .f64()
            .unwrap()
            .iter()
            .map(|v| v.unwrap())
            .collect()
    }

    fn prop_layer() -> Layer {
        Layer::new(Geom::bar()).with_stat(Stat::prop())
    }

    fn prop_plot() -> Plot {
        Plot::new(survey())
            .with_mappings(
                Mappings::new()
                    .with("x", "class")
                    .with("by", "class")
                    .with("fill", "answer")
                    .with("weight", "n"),
            )
            .with_layer(prop_layer())
    }

    #[test]
    fn test_build_prop_layer() {
        let spec = prop_plot().build().unwrap();
        let df = spec.layer_data(0).unwrap();

        assert_eq!(spec.metadata().layer_count, 1);
        assert_eq!(spec.metadata().rows, vec![4]);
        assert!(df.column("weight").is_err());

        let classes = strings(df, "x");
        let answers = strings(df, "fill");
        let props = floats(df, "prop");
        let ymin = floats(df, "ymin");
        let ymax = floats(df, "ymax");
        let expected = [("a", "yes", 0.25), ("a", "no", 0.75), ("b", "yes", 0.5), ("b", "no", 0.5)];
        for (class, answer, prop) in expected {
            let i = (0..df.height())
                .find(|&i| classes[i] == class && answers[i] == answer)
                .unwrap();
            assert!((props[i] - prop).abs() < 1e-12, "{} {}", class, answer);
            assert!((ymax[i] - ymin[i] - prop).abs() < 1e-12);
        }

        // Each stack spans the whole 0..1 range
        for class in ["a", "b"] {
            let rows: Vec<usize> = (0..df.height()).filter(|&i| classes[i] == class).collect();
            let bottom = rows.iter().map(|&i| ymin[i]).fold(f64::INFINITY, f64::min);
            let top = rows.iter().map(|&i| ymax[i]).fold(f64::NEG_INFINITY, f64::max);
            assert_eq!((bottom, top), (0.0, 1.0));
        }
    }

    #[test]
    fn test_built_mappings_point_at_computed_columns() {
        let spec = prop_plot().build().unwrap();
        let layer = &spec.plot().layers[0];
        assert_eq!(layer.data_key.as_deref(), Some("__ggprop_layer_0__"));
        assert_eq!(
            layer.mappings.get("x"),
            Some(&AestheticValue::Column {
                name: "x".to_string(),
                original_name: Some("class".to_string()),
            })
        );
        assert_eq!(
            layer.mappings.get("y").and_then(|v| v.title()),
            Some("prop")
        );
        assert!(layer.mappings.contains_key("ymin"));
        assert!(!layer.mappings.contains_key("weight"));
        assert!(spec.plot().data.is_none());
    }

    #[test]
    fn test_formatted_remapping() {
        let plot = prop_plot().with_layer(
            Layer::new(Geom::text())
                .with_stat(Stat::prop())
                .with_remapping("label", AfterStat::formatted("prop", LabelFormat::percent(1.0))),
        );
        let spec = plot.build().unwrap();
        let df = spec.layer_data(1).unwrap();
        let labels = strings(df, "label");
        assert!(labels.contains(&"25%".to_string()));
        assert!(labels.contains(&"50%".to_string()));
        assert_eq!(
            spec.plot().layers[1].mappings.get("label").and_then(|v| v.title()),
            Some("prop")
        );
    }

    #[test]
    fn test_unknown_remapping_column() {
        let plot = prop_plot().with_layer(
            Layer::new(Geom::text())
                .with_stat(Stat::prop())
                .with_remapping("label", AfterStat::new("density")),
        );
        let err = plot.build().unwrap_err();
        assert!(err.to_string().contains("density"));
    }

    #[test]
    fn test_inherited_y_is_rejected() {
        let plot = Plot::new(survey())
            .with_mappings(
                Mappings::new()
                    .with("x", "class")
                    .with("by", "class")
                    .with("y", "n"),
            )
            .with_layer(prop_layer());
        let err = plot.build().unwrap_err();
        assert!(matches!(err, GgpropError::ValidationError(_)));
    }

    #[test]
    fn test_missing_column_is_a_data_error() {
        let plot = Plot::new(survey())
            .with_mappings(Mappings::new().with("x", "klass").with("by", "class"))
            .with_layer(prop_layer());
        let err = plot.build().unwrap_err();
        assert!(matches!(err, GgpropError::DataError(_)));
        assert!(err.to_string().contains("klass"));
    }

    #[test]
    fn test_layer_without_data() {
        let plot = Plot::empty().with_layer(prop_layer());
        assert!(plot.build().is_err());

        let plot = Plot::empty().with_layer(
            prop_layer()
                .with_data(survey())
                .with_mappings(Mappings::new().with("x", "class").with("by", "class")),
        );
        let spec = plot.build().unwrap();
        assert_eq!(spec.metadata().rows, vec![2]);
    }

    #[test]
    fn test_no_layers() {
        assert!(Plot::new(survey()).build().is_err());
    }

    #[test]
    fn test_missing_required_aesthetic() {
        let plot = Plot::new(survey())
            .with_mappings(Mappings::new().with("x", "class"))
            .with_layer(Layer::new(Geom::bar()));
        let err = plot.build().unwrap_err();
        assert!(err.to_string().contains("missing aesthetics: y"));
    }

    #[test]
    fn test_scale_type_mismatch() {
        let plot = prop_plot().with_scale(Scale::continuous("x"));
        let err = plot.build().unwrap_err();
        assert!(err.to_string().contains("scale for 'x'"));

        assert!(prop_plot().with_scale(Scale::continuous("y")).build().is_ok());
    }

    #[test]
    fn test_facet_panels_are_normalised_separately() {
        let plot = prop_plot().with_facet(Facet::wrap(&["sex"]));
        let spec = plot.build().unwrap();
        let df = spec.layer_data(0).unwrap();
        assert!(df.column("sex").is_ok());

        let sexes = strings(df, "sex");
        let classes = strings(df, "x");
        let props = floats(df, "prop");
        for sex in ["f", "m"] {
            for class in ["a", "b"] {
                let total: f64 = (0..df.height())
                    .filter(|&i| sexes[i] == sex && classes[i] == class)
                    .map(|i| props[i])
                    .sum();
                assert!((total - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_missing_facet_column() {
        let plot = prop_plot().with_facet(Facet::wrap(&["region"]));
        let err = plot.build().unwrap_err();
        assert!(err.to_string().contains("region"));
    }
}
