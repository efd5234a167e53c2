//! Data helpers
//!
//! [`as_categorical`] turns text columns into categorical ones, which is what
//! the `by` aesthetic of `stat_prop()` expects. With the `builtin-data`
//! feature, [`titanic`] provides the classic Titanic survival table.

use polars::prelude::*;

use crate::{GgpropError, Result};

/// Cast the named columns to categorical
///
/// Categorical, enum and boolean columns are left unchanged. Text and
/// integer columns are converted; anything else is a data error.
pub fn as_categorical(df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
    let mut out = df.clone();
    for name in columns {
        let column = df.column(name).map_err(|_| {
            GgpropError::DataError(format!("Column '{}' not found", name))
        })?;
        let converted = match column.dtype() {
            DataType::Categorical(..) | DataType::Enum(..) | DataType::Boolean => continue,
            DataType::String => column.cast(&categorical_dtype())?,
            dtype if dtype.is_integer() => column
                .cast(&DataType::String)?
                .cast(&categorical_dtype())?,
            dtype => {
                return Err(GgpropError::DataError(format!(
                    "Column '{}' of type {:?} cannot be made categorical",
                    name, dtype
                )))
            }
        };
        out.with_column(converted)?;
    }
    Ok(out)
}

fn categorical_dtype() -> DataType {
    DataType::from_categories(Categories::global())
}

/// The Titanic passenger survival table
///
/// One row per combination of `Class`, `Sex`, `Age` and `Survived` with the
/// number of people in `Freq`; 32 rows covering 2201 people. The four
/// descriptive columns are categorical.
#[cfg(feature = "builtin-data")]
pub fn titanic() -> Result<DataFrame> {
    const CLASSES: [&str; 4] = ["1st", "2nd", "3rd", "Crew"];
    const SEXES: [&str; 2] = ["Male", "Female"];
    const AGES: [&str; 2] = ["Child", "Adult"];
    const SURVIVED: [&str; 2] = ["No", "Yes"];
    // Class varies fastest, then Sex, Age and Survived
    const FREQ: [i64; 32] = [
        0, 0, 35, 0, 0, 0, 17, 0, // No, Child
        118, 154, 387, 670, 4, 13, 89, 3, // No, Adult
        5, 11, 13, 0, 1, 13, 14, 0, // Yes, Child
        57, 14, 75, 192, 140, 80, 76, 20, // Yes, Adult
    ];

    let mut class = Vec::with_capacity(32);
    let mut sex = Vec::with_capacity(32);
    let mut age = Vec::with_capacity(32);
    let mut survived = Vec::with_capacity(32);
    for s in SURVIVED {
        for a in AGES {
            for x in SEXES {
                for c in CLASSES {
                    class.push(c);
                    sex.push(x);
                    age.push(a);
                    survived.push(s);
                }
            }
        }
    }

    let df = df! {
        "Class" => class,
        "Sex" => sex,
        "Age" => age,
        "Survived" => survived,
        "Freq" => FREQ.to_vec(),
    }?;
    as_categorical(&df, &["Class", "Sex", "Age", "Survived"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::is_categorical_dtype;

    #[test]
    fn test_as_categorical_converts_text_and_integers() {
        let df = df! {
            "name" => ["a", "b", "a"],
            "code" => [1i64, 2, 1],
            "flag" => [true, false, true],
        }
        .unwrap();
        let out = as_categorical(&df, &["name", "code", "flag"]).unwrap();
        for name in ["name", "code", "flag"] {
            assert!(is_categorical_dtype(out.column(name).unwrap().dtype()));
        }
        assert_eq!(out.height(), 3);
    }

    #[test]
    fn test_as_categorical_rejects_floats_and_missing_columns() {
        let df = df!("value" => [0.5, 1.5]).unwrap();
        assert!(as_categorical(&df, &["value"]).is_err());
        let err = as_categorical(&df, &["nope"]).unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[cfg(feature = "builtin-data")]
    #[test]
    fn test_titanic_table() {
        let df = titanic().unwrap();
        assert_eq!(df.height(), 32);
        let total: i64 = df.column("Freq").unwrap().i64().unwrap().sum().unwrap();
        assert_eq!(total, 2201);
        assert!(is_categorical_dtype(df.column("Class").unwrap().dtype()));
        assert!(is_categorical_dtype(df.column("Survived").unwrap().dtype()));
    }

    #[cfg(feature = "builtin-data")]
    #[test]
    fn test_titanic_crew_survivors() {
        let df = titanic().unwrap();
        let crew_survivors: i64 = df
            .lazy()
            .filter(
                col("Class")
                    .cast(DataType::String)
                    .eq(lit("Crew"))
                    .and(col("Survived").cast(DataType::String).eq(lit("Yes"))),
            )
            .collect()
            .unwrap()
            .column("Freq")
            .unwrap()
            .i64()
            .unwrap()
            .sum()
            .unwrap();
        assert_eq!(crew_survivors, 212);
    }
}
