//! Public holidays from the Nager.Date API.
//!
//! One request per year; the per-year responses are concatenated in
//! iteration order with no deduplication. Only the holiday date and the
//! localized name survive into the combined frame.

use polars::prelude::*;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::constants::{HOLIDAY_NAME_LABEL, holidays_url};
use crate::error::{DashboardError, Result};
use crate::transform::parse_datetime_columns;

#[derive(Debug, Deserialize)]
struct Holiday {
    date: String,
    #[serde(rename = "localName")]
    local_name: String,
}

/// Fetch the public holidays of `country` for every requested year.
///
/// Any year's HTTP error aborts the whole fetch; there is no per-year
/// isolation and no partial result.
pub async fn fetch_holidays(http: &Client, years: &[String], country: &str) -> Result<DataFrame> {
    let mut frames = Vec::with_capacity(years.len());

    for year in years {
        let url = holidays_url(year, country);
        let response = http.get(&url).send().await?.error_for_status()?;
        let holidays: Vec<Holiday> = response.json().await?;
        info!("Fetched {} holidays for {}", holidays.len(), year);
        frames.push(year_frame(&holidays)?);
    }

    combine_years(frames)
}

/// Build the two-column frame for one year's response
fn year_frame(holidays: &[Holiday]) -> Result<DataFrame> {
    let dates: Vec<&str> = holidays.iter().map(|holiday| holiday.date.as_str()).collect();
    let names: Vec<&str> = holidays
        .iter()
        .map(|holiday| holiday.local_name.as_str())
        .collect();

    Ok(df!(
        "date" => dates,
        "localName" => names,
    )?)
}

/// Concatenate the per-year frames, rename the localized name column to
/// its display label and parse the date column.
fn combine_years(frames: Vec<DataFrame>) -> Result<DataFrame> {
    if frames.is_empty() {
        return Err(DashboardError::configuration(
            "no holiday years were requested",
        ));
    }

    let lazy_frames: Vec<LazyFrame> = frames.into_iter().map(DataFrame::lazy).collect();
    let combined = concat(lazy_frames, UnionArgs::default())?
        .select([col("date"), col("localName").alias(HOLIDAY_NAME_LABEL)])
        .collect()?;

    parse_datetime_columns(combined, &["date"])
}
