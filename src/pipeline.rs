//! End-to-end acquisition pipeline.
//!
//! Runs the three fetches strictly in sequence, applies the WMO code
//! translation to the weather frame and writes the three CSV files in a
//! fixed order. There is no transactionality across the writes: files
//! already written before a failing step remain on disk.

use std::path::Path;
use std::time::Instant;

use colored::Colorize;
use polars::prelude::DataFrame;
use reqwest::Client;
use tracing::info;

use crate::backend::QueryBackend;
use crate::config::FetchConfig;
use crate::constants::{
    HOLIDAY_FILE, SERVICE_REQUEST_FILE, WEATHER_CODE_COLUMN, WEATHER_DESCRIPTION_COLUMN,
    WEATHER_FILE,
};
use crate::error::Result;
use crate::holidays::fetch_holidays;
use crate::output::write_delimited;
use crate::service_requests::fetch_service_requests;
use crate::transform::translate_wmo_codes;
use crate::weather::WeatherClient;

/// Row counts and timing of one completed run
#[derive(Debug)]
pub struct PipelineStats {
    pub service_request_rows: usize,
    pub weather_rows: usize,
    pub holiday_rows: usize,
    pub elapsed_ms: u128,
}

/// Fetch all three datasets and write them under `config.output_dir`
pub async fn run(config: &FetchConfig, backend: &dyn QueryBackend) -> Result<PipelineStats> {
    config.validate()?;
    let started = Instant::now();

    println!("{}", "Fetching dashboard datasets".bright_green().bold());
    println!(
        "  {} {} to {}",
        "Date range:".bright_cyan(),
        config.start_date,
        config.end_date
    );
    println!(
        "  {} {}",
        "Output:".bright_cyan(),
        config.output_dir.display()
    );

    // Idempotent: an existing directory is not an error
    std::fs::create_dir_all(&config.output_dir)?;

    println!("\n{}", "Fetching 1746 service requests...".bright_yellow());
    let service_requests = fetch_service_requests(
        backend,
        config.start_date,
        config.end_date,
        &config.billing_project,
    )
    .await?;

    println!("{}", "Fetching weather observations...".bright_yellow());
    let http = Client::new();
    let weather = WeatherClient::new(http.clone()).fetch(config).await?;
    let weather = translate_wmo_codes(weather, WEATHER_CODE_COLUMN, WEATHER_DESCRIPTION_COLUMN)?;

    println!("{}", "Fetching public holidays...".bright_yellow());
    let holidays = fetch_holidays(&http, &config.holiday_years, &config.country).await?;

    let stats = PipelineStats {
        service_request_rows: service_requests.height(),
        weather_rows: weather.height(),
        holiday_rows: holidays.height(),
        elapsed_ms: 0,
    };

    write_outputs(
        vec![
            (SERVICE_REQUEST_FILE, service_requests),
            (WEATHER_FILE, weather),
            (HOLIDAY_FILE, holidays),
        ],
        &config.output_dir,
    )?;

    let stats = PipelineStats {
        elapsed_ms: started.elapsed().as_millis(),
        ..stats
    };
    report(&stats);
    Ok(stats)
}

/// Write each frame to its file in a fixed, deterministic order
pub fn write_outputs(frames: Vec<(&str, DataFrame)>, output_dir: &Path) -> Result<()> {
    for (file_name, mut df) in frames {
        let path = output_dir.join(file_name);
        write_delimited(&mut df, &path)?;
        info!("Wrote {} rows to {}", df.height(), path.display());
    }
    Ok(())
}

fn report(stats: &PipelineStats) {
    println!("\n{}", "Acquisition Summary".bright_green().bold());
    println!(
        "  {} {}",
        "Service requests:".bright_cyan(),
        stats.service_request_rows.to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Weather days:".bright_cyan(),
        stats.weather_rows.to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Holidays:".bright_cyan(),
        stats.holiday_rows.to_string().bright_white().bold()
    );
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.elapsed_ms.to_string().bright_white()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_outputs_creates_all_files() {
        let dir = TempDir::new().unwrap();

        let frames = vec![
            (
                SERVICE_REQUEST_FILE,
                df!("id_chamado" => ["1", "2"]).unwrap(),
            ),
            (WEATHER_FILE, df!("weather_code" => [0i64]).unwrap()),
            (HOLIDAY_FILE, df!("date" => ["2023-01-01"]).unwrap()),
        ];

        write_outputs(frames, dir.path()).unwrap();

        assert!(dir.path().join("df_chamado.csv").exists());
        assert!(dir.path().join("df_tempo.csv").exists());
        assert!(dir.path().join("df_feriado.csv").exists());
    }

    #[test]
    fn test_write_outputs_with_empty_dataset() {
        let dir = TempDir::new().unwrap();

        // A date range matching zero service requests still produces a
        // valid header-only file
        let frames = vec![(
            SERVICE_REQUEST_FILE,
            df!("id_chamado" => Vec::<String>::new()).unwrap(),
        )];

        write_outputs(frames, dir.path()).unwrap();

        let contents = std::fs::read_to_string(dir.path().join("df_chamado.csv")).unwrap();
        assert_eq!(contents.trim_end(), "id_chamado");
    }
}
