//! Column percentage bar chart

use polars::prelude::{DataFrame, DataType};

use super::{mapping_color_to_fill, require_xy, BarChartOptions};
use crate::data::as_categorical;
use crate::plot::layer::stat::PROP_COLUMN;
use crate::plot::{
    AestheticValue, AfterStat, Geom, LabelFormat, Layer, Mappings, Plot, Position, Scale, Stat,
    Theme, ThemeElement,
};
use crate::Result;

/// Column percentage bar chart
///
/// Draws one bar per level of `x`, split into the levels of `y` and scaled to
/// 100%, with each segment labelled by its share of the column. A `color`
/// mapping is used as `fill` when `fill` is absent. Text columns mapped to
/// `x` or `y` are made categorical; other columns are passed through as they
/// are, so a numeric `x` is rejected when the plot is built.
///
/// ```rust,ignore
/// let plot = ggally_colbar(
///     titanic()?,
///     Mappings::new().with("x", "Class").with("y", "Survived").with("weight", "Freq"),
///     BarChartOptions::colbar(),
/// )?;
/// ```
pub fn ggally_colbar(
    data: DataFrame,
    mapping: Mappings,
    options: BarChartOptions,
) -> Result<Plot> {
    let mut mapping = mapping_color_to_fill(mapping);
    require_xy(&mapping, "ggally_colbar")?;
    let data = text_to_categorical(data, &mapping)?;

    // x defines the columns and the denominators, y the segments
    if let (Some(x), Some(y)) = (mapping.get("x").cloned(), mapping.remove("y")) {
        mapping.insert("fill", y);
        mapping.insert("by", x);
    }

    let reverse = options.reverse_fill_levels;

    let mut bar = Layer::new(Geom::bar())
        .with_stat(Stat::prop())
        .with_position(Position::Fill {
            vjust: 1.0,
            reverse,
        });
    let mut names: Vec<&String> = options.bar.keys().collect();
    names.sort();
    for name in names {
        bar = bar.with_parameter(name, options.bar[name].clone())?;
    }

    let text = Layer::new(Geom::text())
        .with_stat(Stat::prop())
        .with_remapping(
            "label",
            AfterStat::formatted(PROP_COLUMN, options.label_format.clone()),
        )
        .with_position(Position::Fill {
            vjust: 0.5,
            reverse,
        })
        .with_parameter("size", options.label_size)?
        .with_parameter("color", options.label_colour.as_str())?;

    let mut plot = Plot::new(data)
        .with_mappings(mapping)
        .with_layer(bar)
        .with_layer(text)
        .with_scale(Scale::continuous("y").with_labels(LabelFormat::percent(1.0)));

    if options.remove_percentage_axis {
        plot = plot
            .with_theme(
                Theme::new()
                    .blank(ThemeElement::AxisText("y".to_string()))
                    .blank(ThemeElement::AxisTicks("y".to_string())),
            )
            .with_label("y", "");
    }
    if options.remove_background {
        plot = plot.with_theme(
            Theme::new()
                .blank(ThemeElement::PanelBackground)
                .blank(ThemeElement::PanelGridMajor)
                .blank(ThemeElement::AxisTicks("x".to_string()))
                .blank(ThemeElement::AxisTicks("y".to_string())),
        );
    }

    tracing::debug!(
        reverse,
        remove_percentage_axis = options.remove_percentage_axis,
        remove_background = options.remove_background,
        "built column percentage chart"
    );
    Ok(plot)
}

/// Make text columns mapped to `x` or `y` categorical
fn text_to_categorical(data: DataFrame, mapping: &Mappings) -> Result<DataFrame> {
    let text_columns: Vec<&str> = ["x", "y"]
        .iter()
        .filter_map(|aes| match mapping.get(aes) {
            Some(AestheticValue::Column { name, .. }) => Some(name.as_str()),
            _ => None,
        })
        .filter(|name| {
            data.column(name)
                .map(|c| c.dtype() == &DataType::String)
                .unwrap_or(false)
        })
        .collect();
    if text_columns.is_empty() {
        Ok(data)
    } else {
        as_categorical(&data, &text_columns)
    }
}
