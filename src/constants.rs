//! Application constants for the dashboard fetcher.
//!
//! Fixed API endpoints, the reference run's default parameters, output
//! file names and the WMO weather code translation table.

use chrono::NaiveDate;

// =============================================================================
// API Endpoints
// =============================================================================

/// Open-Meteo geocoding API (place name -> coordinates)
pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// Open-Meteo historical weather archive API
pub const WEATHER_ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

/// Nager.Date public holidays API, templated with year and country
pub const HOLIDAYS_API_BASE: &str = "https://date.nager.at/api/v3/publicholidays";

/// Google BigQuery REST API base
pub const BIGQUERY_API_BASE: &str = "https://bigquery.googleapis.com/bigquery/v2";

/// Build the holidays URL for one year and a two-letter country code
pub fn holidays_url(year: &str, country: &str) -> String {
    format!("{HOLIDAYS_API_BASE}/{year}/{country}")
}

// =============================================================================
// Reference Run Defaults
// =============================================================================

/// Inclusive start of the default two-year collection window
pub const DEFAULT_START_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2023, 1, 1) {
    Some(date) => date,
    None => panic!("invalid default start date"),
};

/// Inclusive end of the default two-year collection window
pub const DEFAULT_END_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2024, 12, 31) {
    Some(date) => date,
    None => panic!("invalid default end date"),
};

/// GCP project that queries against `datario` are billed to
pub const DEFAULT_BILLING_PROJECT: &str = "teste-tecnico-pcrj";

/// Place name resolved through the geocoding API
pub const DEFAULT_PLACE_NAME: &str = "Rio de Janeiro";

/// Time zone the weather archive aggregates daily values in
pub const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";

/// Country code for the holidays API
pub const DEFAULT_COUNTRY: &str = "BR";

/// Years collected from the holidays API
pub const DEFAULT_HOLIDAY_YEARS: &[&str] = &["2023", "2024"];

/// Daily variables requested from the weather archive
pub const DEFAULT_DAILY_VARS: &[&str] = &["temperature_2m_mean", "weather_code"];

/// Directory the three CSV files are written to
pub const DEFAULT_OUTPUT_DIR: &str = "output";

// =============================================================================
// Output Files and Column Names
// =============================================================================

pub const SERVICE_REQUEST_FILE: &str = "df_chamado.csv";
pub const WEATHER_FILE: &str = "df_tempo.csv";
pub const HOLIDAY_FILE: &str = "df_feriado.csv";

/// Column holding the integer WMO code in the weather frame
pub const WEATHER_CODE_COLUMN: &str = "weather_code";

/// Column the orchestrator writes the translated description into
pub const WEATHER_DESCRIPTION_COLUMN: &str = "tempo_descricao";

/// Display label for the holiday name column
pub const HOLIDAY_NAME_LABEL: &str = "Nome do Feriado";

// =============================================================================
// WMO Weather Codes
// =============================================================================

/// Portuguese descriptions for WMO weather codes.
///
/// Deliberately partial: only the codes that actually occur in the
/// collected Rio de Janeiro archive data are covered. Do not extend this
/// to the full WMO code space; unknown codes translate to null.
pub const WMO_DESCRIPTIONS: &[(i64, &str)] = &[
    (0, "Ensolarado"),
    (1, "Principalmente ensolarado"),
    (2, "Parcialmente nublado"),
    (3, "Nublado"),
    (51, "Garoa leve"),
    (53, "Garoa moderada"),
    (55, "Garoa forte"),
    (61, "Chuva leve"),
    (63, "Chuva moderada"),
    (65, "Chuva forte"),
];

/// Look up the Portuguese description for a WMO code
pub fn wmo_description(code: i64) -> Option<&'static str> {
    WMO_DESCRIPTIONS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, description)| *description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wmo_descriptions_known_codes() {
        assert_eq!(wmo_description(0), Some("Ensolarado"));
        assert_eq!(wmo_description(1), Some("Principalmente ensolarado"));
        assert_eq!(wmo_description(2), Some("Parcialmente nublado"));
        assert_eq!(wmo_description(3), Some("Nublado"));
        assert_eq!(wmo_description(51), Some("Garoa leve"));
        assert_eq!(wmo_description(53), Some("Garoa moderada"));
        assert_eq!(wmo_description(55), Some("Garoa forte"));
        assert_eq!(wmo_description(61), Some("Chuva leve"));
        assert_eq!(wmo_description(63), Some("Chuva moderada"));
        assert_eq!(wmo_description(65), Some("Chuva forte"));
    }

    #[test]
    fn test_wmo_descriptions_unknown_codes() {
        // The table is intentionally partial - codes outside the observed
        // set translate to None, never an error
        assert_eq!(wmo_description(4), None);
        assert_eq!(wmo_description(45), None);
        assert_eq!(wmo_description(95), None);
        assert_eq!(wmo_description(-1), None);
    }

    #[test]
    fn test_default_date_range_is_ordered() {
        assert!(DEFAULT_START_DATE <= DEFAULT_END_DATE);
    }

    #[test]
    fn test_holidays_url() {
        assert_eq!(
            holidays_url("2023", "BR"),
            "https://date.nager.at/api/v3/publicholidays/2023/BR"
        );
    }
}
