//! Dashboard Fetcher Library
//!
//! Acquires the three public datasets behind the Rio de Janeiro 1746
//! analysis dashboard and writes them as Power BI-ready CSV files:
//!
//! - 1746 service-request microdata from the `datario` BigQuery project
//! - Daily weather observations from the Open-Meteo historical archive
//! - Brazilian public holidays from the Nager.Date API
//!
//! Each dataset is fetched into a Polars DataFrame, lightly transformed
//! (date parsing, WMO code translation, column renaming) and written with
//! a semicolon separator and decimal comma.

pub mod backend;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod holidays;
pub mod output;
pub mod pipeline;
pub mod service_requests;
pub mod transform;
pub mod weather;

pub use config::FetchConfig;
pub use error::{DashboardError, Result};
