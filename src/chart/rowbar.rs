//! Row percentage bar chart

use polars::prelude::DataFrame;

use super::{ggally_colbar, mapping_color_to_fill, require_xy, BarChartOptions};
use crate::plot::{Guide, Mappings, Plot, Projection};
use crate::Result;

/// Row percentage bar chart
///
/// The transpose of [`ggally_colbar`]: one horizontal bar per level of `y`,
/// split into the levels of `x`. Built as a column chart of the swapped
/// mapping drawn in flipped coordinates, with the fill legend reversed to
/// match the flipped stacking order. Use [`BarChartOptions::rowbar`] for the
/// matching defaults.
pub fn ggally_rowbar(
    data: DataFrame,
    mapping: Mappings,
    options: BarChartOptions,
) -> Result<Plot> {
    let mut mapping = mapping_color_to_fill(mapping);
    require_xy(&mapping, "ggally_rowbar")?;

    if let (Some(x), Some(y)) = (mapping.remove("x"), mapping.remove("y")) {
        mapping.insert("x", y);
        mapping.insert("y", x);
    }

    let plot = ggally_colbar(data, mapping, options)?;
    Ok(plot
        .with_projection(Projection::flip())
        .with_guide(Guide::legend("fill").reversed()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::as_categorical;
    use crate::plot::ThemeElement;
    use crate::GgpropError;
    use polars::prelude::*;
    use proptest::prelude::*;

    fn survey() -> DataFrame {
        df! {
            "class" => ["a", "a", "b", "b", "c"],
            "answer" => ["yes", "no", "yes", "no", "no"],
            "n" => [1.0, 3.0, 2.0, 2.0, 5.0],
        }
        .unwrap()
    }

    #[test]
    fn test_rowbar_structure() {
        let plot = ggally_rowbar(
            survey(),
            Mappings::new().with("x", "answer").with("y", "class"),
            BarChartOptions::rowbar(),
        )
        .unwrap();

        // Rows of the chart are the levels of y
        assert_eq!(plot.mappings.get("by").and_then(|v| v.column_name()), Some("class"));
        assert_eq!(plot.mappings.get("fill").and_then(|v| v.column_name()), Some("answer"));
        assert!(plot.is_flipped());
        let guide = plot.find_guide("fill").unwrap();
        assert!(guide.reverse);
        assert_eq!(plot.layers[0].position, crate::plot::Position::fill().with_reverse(true));
    }

    #[test]
    fn test_rowbar_matches_transposed_colbar() {
        let mapping = Mappings::new()
            .with("x", "answer")
            .with("y", "class")
            .with("weight", "n");
        let transposed = Mappings::new()
            .with("x", "class")
            .with("y", "answer")
            .with("weight", "n");

        let rows = ggally_rowbar(survey(), mapping, BarChartOptions::rowbar())
            .unwrap()
            .build()
            .unwrap();
        let cols = ggally_colbar(survey(), transposed, BarChartOptions::rowbar())
            .unwrap()
            .build()
            .unwrap();

        for idx in 0..2 {
            assert!(rows
                .layer_data(idx)
                .unwrap()
                .equals_missing(cols.layer_data(idx).unwrap()));
        }
        assert!(!cols.plot().is_flipped());
    }

    #[test]
    fn test_rowbar_requires_x_and_y() {
        let err = ggally_rowbar(
            survey(),
            Mappings::new().with("y", "class"),
            BarChartOptions::rowbar(),
        )
        .unwrap_err();
        assert!(matches!(err, GgpropError::ValidationError(_)));
        assert!(err.to_string().contains("ggally_rowbar"));
    }

    #[test]
    fn test_rowbar_keeps_theme_on_percentage_scale() {
        let plot = ggally_rowbar(
            survey(),
            Mappings::new().with("x", "answer").with("y", "class"),
            BarChartOptions::rowbar().with_remove_percentage_axis(true),
        )
        .unwrap();
        // The percentage scale stays on y; the flip moves its axis
        assert!(plot.find_scale("y").is_some());
        assert!(plot.is_blank(&ThemeElement::AxisText("y".to_string())));
    }

    fn frame(rows: &[(u8, u8, u8)]) -> DataFrame {
        let a: Vec<String> = rows.iter().map(|r| format!("a{}", r.0)).collect();
        let b: Vec<String> = rows.iter().map(|r| format!("b{}", r.1)).collect();
        let w: Vec<f64> = rows.iter().map(|r| r.2 as f64).collect();
        let df = df!("a" => a, "b" => b, "w" => w).unwrap();
        as_categorical(&df, &["a", "b"]).unwrap()
    }

    proptest! {
        #[test]
        fn prop_rowbar_is_transposed_colbar(
            rows in prop::collection::vec((0u8..3, 0u8..3, 0u8..5), 1..30),
            reverse in any::<bool>(),
        ) {
            let df = frame(&rows);
            let options = BarChartOptions::rowbar().with_reverse_fill_levels(reverse);

            let by_rows = ggally_rowbar(
                df.clone(),
                Mappings::new().with("x", "a").with("y", "b").with("weight", "w"),
                options.clone(),
            )
            .unwrap()
            .build()
            .unwrap();
            let by_cols = ggally_colbar(
                df,
                Mappings::new().with("x", "b").with("y", "a").with("weight", "w"),
                options,
            )
            .unwrap()
            .build()
            .unwrap();

            for idx in 0..2 {
                prop_assert!(by_rows
                    .layer_data(idx)
                    .unwrap()
                    .equals_missing(by_cols.layer_data(idx).unwrap()));
            }

            // Same proportions, drawn with the axes exchanged
            prop_assert!(by_rows.plot().is_flipped());
            prop_assert!(!by_cols.plot().is_flipped());
            prop_assert!(by_rows.plot().find_guide("fill").is_some_and(|g| g.reverse));
            prop_assert!(by_cols.plot().find_guide("fill").is_none());

            #[cfg(feature = "vegalite")]
            {
                use crate::writer::VegaLiteWriter;
                use serde_json::json;

                let writer = VegaLiteWriter::new();
                let rows_vl = writer.to_value(by_rows.plot(), by_rows.data()).unwrap();
                let cols_vl = writer.to_value(by_cols.plot(), by_cols.data()).unwrap();
                prop_assert_eq!(&rows_vl["data"], &cols_vl["data"]);

                for idx in 0..2 {
                    let rows_enc = &rows_vl["layer"][idx]["encoding"];
                    let cols_enc = &cols_vl["layer"][idx]["encoding"];
                    prop_assert_eq!(&rows_enc["y"], &cols_enc["x"]);
                    prop_assert_eq!(&rows_enc["x"], &cols_enc["y"]);
                    prop_assert_eq!(&rows_enc["x2"], &cols_enc["y2"]);
                }

                let rows_bar = &rows_vl["layer"][0];
                let cols_bar = &cols_vl["layer"][0];
                prop_assert_eq!(&rows_bar["mark"]["height"], &cols_bar["mark"]["width"]);
                prop_assert_eq!(&rows_bar["encoding"]["fill"]["sort"], &json!("descending"));
                prop_assert!(cols_bar["encoding"]["fill"].get("sort").is_none());
            }
        }
    }
}
