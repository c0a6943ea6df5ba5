//! Run configuration with the reference defaults.
//!
//! The reference behavior hard-codes every parameter; this struct names
//! them so tests and the CLI can substitute values without touching
//! global state. A `FetchConfig::default()` reproduces the reference run
//! exactly.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::constants::{
    DEFAULT_BILLING_PROJECT, DEFAULT_COUNTRY, DEFAULT_DAILY_VARS, DEFAULT_END_DATE,
    DEFAULT_HOLIDAY_YEARS, DEFAULT_OUTPUT_DIR, DEFAULT_PLACE_NAME, DEFAULT_START_DATE,
    DEFAULT_TIMEZONE,
};
use crate::error::{DashboardError, Result};

/// Parameters of one acquisition run
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Inclusive start of the service-request and weather window
    pub start_date: NaiveDate,
    /// Inclusive end of the service-request and weather window
    pub end_date: NaiveDate,
    /// GCP project the BigQuery compute is billed to
    pub billing_project: String,
    /// Place name resolved to coordinates before the weather fetch
    pub place_name: String,
    /// Time zone for the daily weather aggregates
    pub timezone: String,
    /// Two-letter country code for the holidays API
    pub country: String,
    /// Years fetched from the holidays API
    pub holiday_years: Vec<String>,
    /// Daily variables requested from the weather archive
    pub daily_vars: Vec<String>,
    /// Directory the three CSV files are written to
    pub output_dir: PathBuf,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            start_date: DEFAULT_START_DATE,
            end_date: DEFAULT_END_DATE,
            billing_project: DEFAULT_BILLING_PROJECT.to_string(),
            place_name: DEFAULT_PLACE_NAME.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            holiday_years: DEFAULT_HOLIDAY_YEARS
                .iter()
                .map(|year| year.to_string())
                .collect(),
            daily_vars: DEFAULT_DAILY_VARS
                .iter()
                .map(|var| var.to_string())
                .collect(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl FetchConfig {
    /// Validate the configuration before a run starts
    pub fn validate(&self) -> Result<()> {
        if self.start_date > self.end_date {
            return Err(DashboardError::configuration(format!(
                "start date {} is after end date {}",
                self.start_date, self.end_date
            )));
        }
        if self.holiday_years.is_empty() {
            return Err(DashboardError::configuration(
                "at least one holiday year must be requested",
            ));
        }
        if self.daily_vars.is_empty() {
            return Err(DashboardError::configuration(
                "at least one daily weather variable must be requested",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reproduces_reference_run() {
        let config = FetchConfig::default();

        assert_eq!(config.start_date.to_string(), "2023-01-01");
        assert_eq!(config.end_date.to_string(), "2024-12-31");
        assert_eq!(config.billing_project, "teste-tecnico-pcrj");
        assert_eq!(config.place_name, "Rio de Janeiro");
        assert_eq!(config.timezone, "America/Sao_Paulo");
        assert_eq!(config.country, "BR");
        assert_eq!(config.holiday_years, vec!["2023", "2024"]);
        assert_eq!(config.daily_vars, vec!["temperature_2m_mean", "weather_code"]);
        assert_eq!(config.output_dir, PathBuf::from("output"));
    }

    #[test]
    fn test_default_config_validates() {
        assert!(FetchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_reversed_date_range_is_rejected() {
        let config = FetchConfig {
            start_date: DEFAULT_END_DATE,
            end_date: DEFAULT_START_DATE,
            ..Default::default()
        };

        let err = config.validate().unwrap_err();
        assert!(matches!(err, DashboardError::Configuration { .. }));
    }

    #[test]
    fn test_empty_holiday_years_are_rejected() {
        let config = FetchConfig {
            holiday_years: vec![],
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }
}
