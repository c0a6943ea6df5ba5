//! Delimited file output in the Power BI-friendly convention.
//!
//! Semicolon field separator and decimal comma, matching the pt-BR
//! locale the downstream dashboard imports with. Datetimes are rendered
//! as plain `%Y-%m-%d` dates.

use std::fs::File;
use std::path::Path;

use polars::prelude::*;
use tracing::debug;

use crate::error::Result;

/// Write a frame as a semicolon-separated, decimal-comma CSV.
///
/// A header row is always present, even for an empty frame; there is no
/// row-index column.
pub fn write_delimited(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b';')
        .with_decimal_comma(true)
        .with_datetime_format(Some("%Y-%m-%d".to_string()))
        .finish(df)?;

    debug!("Wrote {} rows to {}", df.height(), path.display());
    Ok(())
}

/// Read a file written with the same convention back into a frame
pub fn read_delimited(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(b';')
                .with_decimal_comma(true),
        )
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    Ok(df)
}
