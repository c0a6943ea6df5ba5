//! Error handling for dataset acquisition and output.
//!
//! The run has no recovery policy: the first error from any fetch or
//! write aborts the remaining pipeline. Files written before the failing
//! step are left on disk.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("geocoding returned no results for '{place}'")]
    NoGeocodeResult { place: String },

    #[error("query backend error: {message}")]
    QueryBackend { message: String },

    #[error("malformed response from {context}: {reason}")]
    MalformedResponse { context: String, reason: String },

    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl DashboardError {
    pub fn query_backend(message: impl Into<String>) -> Self {
        Self::QueryBackend {
            message: message.into(),
        }
    }

    pub fn malformed_response(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            context: context.into(),
            reason: reason.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
