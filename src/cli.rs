//! Command-line interface components.
//!
//! Every flag is optional; a bare invocation reproduces the reference
//! run with its fixed date range, billing project and output directory.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use crate::config::FetchConfig;

#[derive(Parser, Debug)]
#[command(name = "dashboard-fetcher")]
#[command(about = "Fetch the 1746, weather and holiday datasets behind the Rio dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Inclusive start of the collection window (default: 2023-01-01)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub start_date: Option<NaiveDate>,

    /// Inclusive end of the collection window (default: 2024-12-31)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub end_date: Option<NaiveDate>,

    /// GCP project the BigQuery compute is billed to
    #[arg(long)]
    pub billing_project: Option<String>,

    /// Directory the three CSV files are written to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Merge the CLI overrides over the reference defaults
    pub fn into_config(self) -> FetchConfig {
        let mut config = FetchConfig::default();

        if let Some(start_date) = self.start_date {
            config.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            config.end_date = end_date;
        }
        if let Some(billing_project) = self.billing_project {
            config.billing_project = billing_project;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_invocation_uses_reference_defaults() {
        let args = Args::parse_from(["dashboard-fetcher"]);
        let config = args.into_config();

        assert_eq!(config.start_date.to_string(), "2023-01-01");
        assert_eq!(config.end_date.to_string(), "2024-12-31");
        assert_eq!(config.billing_project, "teste-tecnico-pcrj");
        assert_eq!(config.output_dir, PathBuf::from("output"));
    }

    #[test]
    fn test_overrides_apply() {
        let args = Args::parse_from([
            "dashboard-fetcher",
            "--start-date",
            "2022-06-01",
            "--end-date",
            "2022-06-30",
            "--billing-project",
            "my-project",
            "--output-dir",
            "/tmp/dashboard",
        ]);
        let config = args.into_config();

        assert_eq!(config.start_date.to_string(), "2022-06-01");
        assert_eq!(config.end_date.to_string(), "2022-06-30");
        assert_eq!(config.billing_project, "my-project");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/dashboard"));
        // Parameters without flags keep their fixed defaults
        assert_eq!(config.place_name, "Rio de Janeiro");
        assert_eq!(config.holiday_years, vec!["2023", "2024"]);
    }
}
