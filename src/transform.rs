//! In-memory DataFrame transformations.
//!
//! The only transformations applied between fetch and write: translating
//! WMO weather codes to Portuguese descriptions and parsing string date
//! columns to datetimes.

use polars::prelude::*;

use crate::constants::wmo_description;
use crate::error::Result;

/// Default name of the generated description column
pub const DEFAULT_WMO_LABEL_COLUMN: &str = "desc_wmo_pt";

/// Append a column with the Portuguese description of each WMO code.
///
/// Pure with respect to the existing columns: the code column and every
/// other column pass through unchanged. Codes outside the translation
/// table yield null descriptions rather than an error; the table is a
/// deliberately partial mapping covering only codes observed in the
/// collected data.
pub fn translate_wmo_codes(
    mut df: DataFrame,
    code_column: &str,
    label_column: &str,
) -> Result<DataFrame> {
    let codes = df
        .column(code_column)?
        .as_materialized_series()
        .cast(&DataType::Int64)?;

    let labels: StringChunked = codes
        .i64()?
        .into_iter()
        .map(|code| code.and_then(wmo_description))
        .collect();

    df.with_column(labels.with_name(label_column.into()).into_series())?;
    Ok(df)
}

/// Parse `%Y-%m-%d` string columns into datetime columns.
///
/// Non-strict: null entries (for example the closing date of a
/// service request that is still open) stay null instead of failing the
/// whole column conversion.
pub fn parse_datetime_columns(df: DataFrame, columns: &[&str]) -> Result<DataFrame> {
    let exprs: Vec<Expr> = columns
        .iter()
        .map(|name| {
            col(*name).str().to_datetime(
                Some(TimeUnit::Milliseconds),
                None,
                StrptimeOptions {
                    format: Some("%Y-%m-%d".into()),
                    strict: false,
                    ..Default::default()
                },
                lit("raise"),
            )
        })
        .collect();

    Ok(df.lazy().with_columns(exprs).collect()?)
}
