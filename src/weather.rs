//! Daily weather observations from the Open-Meteo historical archive.
//!
//! Two sequential calls: a geocoding lookup resolving the configured
//! place name to coordinates, then an archive lookup returning one row
//! per calendar day in the requested range. The `daily` object of
//! parallel arrays is reshaped into a DataFrame with the `time` column
//! first, followed by the requested variables in request order.
//!
//! Variable columns keep their API names (`temperature_2m_mean`,
//! `weather_code`); no renaming happens here. Code translation is
//! applied by the orchestrator, not internally.

use polars::prelude::*;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::FetchConfig;
use crate::constants::{GEOCODING_URL, WEATHER_ARCHIVE_URL};
use crate::error::{DashboardError, Result};
use crate::transform::parse_datetime_columns;

/// Resolved location, used only between the two calls
#[derive(Debug, Clone, Copy)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeocodeCandidate {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    daily: serde_json::Map<String, Value>,
}

/// Client for the geocoding and archive endpoints
pub struct WeatherClient {
    http: Client,
}

impl WeatherClient {
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    /// Geocode the place name, then fetch the daily archive for the
    /// configured date range at the resolved coordinates.
    pub async fn fetch(&self, config: &FetchConfig) -> Result<DataFrame> {
        let coordinates = self.geocode(&config.place_name).await?;
        self.fetch_daily(coordinates, config).await
    }

    /// Resolve a place name to coordinates, requesting a single candidate
    pub async fn geocode(&self, place: &str) -> Result<Coordinates> {
        let response = self
            .http
            .get(GEOCODING_URL)
            .query(&[("name", place), ("count", "1")])
            .send()
            .await?
            .error_for_status()?;

        let body: GeocodeResponse = response.json().await?;
        let coordinates = first_candidate(body, place)?;
        debug!(
            "Geocoded '{}' to ({}, {})",
            place, coordinates.latitude, coordinates.longitude
        );
        Ok(coordinates)
    }

    /// Fetch the daily aggregates for the configured variables
    pub async fn fetch_daily(
        &self,
        coordinates: Coordinates,
        config: &FetchConfig,
    ) -> Result<DataFrame> {
        let params = [
            ("latitude", coordinates.latitude.to_string()),
            ("longitude", coordinates.longitude.to_string()),
            ("start_date", config.start_date.format("%Y-%m-%d").to_string()),
            ("end_date", config.end_date.format("%Y-%m-%d").to_string()),
            ("daily", config.daily_vars.join(",")),
            ("timezone", config.timezone.clone()),
        ];

        let response = self
            .http
            .get(WEATHER_ARCHIVE_URL)
            .query(&params)
            .send()
            .await?
            .error_for_status()?;

        let body: ArchiveResponse = response.json().await?;
        let df = daily_to_frame(&body.daily, &config.daily_vars)?;
        info!("Fetched {} days of weather data", df.height());
        Ok(df)
    }
}

/// Take the first geocoding candidate, or fail with a typed error when
/// the result list is empty.
fn first_candidate(response: GeocodeResponse, place: &str) -> Result<Coordinates> {
    response
        .results
        .first()
        .map(|candidate| Coordinates {
            latitude: candidate.latitude,
            longitude: candidate.longitude,
        })
        .ok_or_else(|| DashboardError::NoGeocodeResult {
            place: place.to_string(),
        })
}

/// Reshape the `daily` object of parallel arrays into a DataFrame and
/// parse the `time` column to a datetime.
fn daily_to_frame(daily: &serde_json::Map<String, Value>, vars: &[String]) -> Result<DataFrame> {
    let time = array_field(daily, "time")?;
    let times: Vec<Option<&str>> = time.iter().map(Value::as_str).collect();

    let mut columns = vec![Column::new("time".into(), times)];
    for var in vars {
        let values = array_field(daily, var)?;
        if values.len() != time.len() {
            return Err(DashboardError::malformed_response(
                "weather archive",
                format!(
                    "daily variable '{}' has {} values for {} days",
                    var,
                    values.len(),
                    time.len()
                ),
            ));
        }
        columns.push(numeric_column(var, values));
    }

    parse_datetime_columns(DataFrame::new(columns)?, &["time"])
}

fn array_field<'a>(
    daily: &'a serde_json::Map<String, Value>,
    name: &str,
) -> Result<&'a Vec<Value>> {
    daily
        .get(name)
        .and_then(Value::as_array)
        .ok_or_else(|| {
            DashboardError::malformed_response(
                "weather archive",
                format!("daily object is missing the '{name}' array"),
            )
        })
}

/// Integer-valued arrays (weather codes) become Int64 columns, anything
/// else Float64. Nulls pass through either way.
fn numeric_column(name: &str, values: &[Value]) -> Column {
    let integral = values.iter().all(|value| value.is_null() || value.is_i64());

    if integral {
        let ints: Vec<Option<i64>> = values.iter().map(Value::as_i64).collect();
        Column::new(name.into(), ints)
    } else {
        let floats: Vec<Option<f64>> = values.iter().map(Value::as_f64).collect();
        Column::new(name.into(), floats)
    }
}
