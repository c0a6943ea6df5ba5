//! Query backend seam and the BigQuery REST implementation.
//!
//! The warehouse is an external collaborator: the trait exposes exactly
//! one operation (run a query billed to a project, get a DataFrame back)
//! so tests can substitute an in-memory backend. The concrete
//! implementation is a thin wrapper over the BigQuery `jobs.query` REST
//! call with a pre-minted OAuth access token; credential minting itself
//! is out of scope.

use async_trait::async_trait;
use polars::prelude::*;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::constants::BIGQUERY_API_BASE;
use crate::error::{DashboardError, Result};

/// Analytical query backend
#[async_trait]
pub trait QueryBackend: Send + Sync {
    /// Run one query billed to `billing_project` and return the full
    /// result set. Backend errors propagate unmodified; there is no
    /// retry and no partial result.
    async fn query(&self, sql: &str, billing_project: &str) -> Result<DataFrame>;
}

/// BigQuery REST backend (`jobs.query`, synchronous mode)
pub struct BigQueryBackend {
    http: Client,
    access_token: String,
}

impl BigQueryBackend {
    pub fn new(http: Client, access_token: String) -> Self {
        Self { http, access_token }
    }
}

#[async_trait]
impl QueryBackend for BigQueryBackend {
    async fn query(&self, sql: &str, billing_project: &str) -> Result<DataFrame> {
        let url = format!("{BIGQUERY_API_BASE}/projects/{billing_project}/queries");
        debug!("Running BigQuery job billed to project {}", billing_project);

        let body = serde_json::json!({
            "query": sql,
            "useLegacySql": false,
            "timeoutMs": 120_000,
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let parsed: QueryResponse = response.json().await?;
        response_to_frame(parsed)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResponse {
    job_complete: Option<bool>,
    schema: Option<TableSchema>,
    #[serde(default)]
    rows: Vec<TableRow>,
}

#[derive(Debug, Deserialize)]
struct TableSchema {
    fields: Vec<TableField>,
}

#[derive(Debug, Deserialize)]
struct TableField {
    name: String,
    #[serde(rename = "type")]
    field_type: String,
}

#[derive(Debug, Deserialize)]
struct TableRow {
    #[serde(default)]
    f: Vec<TableCell>,
}

#[derive(Debug, Deserialize)]
struct TableCell {
    #[serde(default)]
    v: Value,
}

/// Convert the `schema.fields` + `rows[].f[].v` response shape into a
/// DataFrame. INTEGER, FLOAT and BOOLEAN fields get native dtypes;
/// everything else (STRING, DATE, TIMESTAMP, ...) passes through as
/// strings for downstream parsing.
fn response_to_frame(response: QueryResponse) -> Result<DataFrame> {
    if response.job_complete == Some(false) {
        return Err(DashboardError::query_backend(
            "query job did not complete within the request timeout",
        ));
    }

    let schema = response.schema.ok_or_else(|| {
        DashboardError::malformed_response("BigQuery", "response carries no schema")
    })?;

    let mut columns = Vec::with_capacity(schema.fields.len());
    for (index, field) in schema.fields.iter().enumerate() {
        let cells: Vec<Option<&str>> = response
            .rows
            .iter()
            .map(|row| row.f.get(index).and_then(|cell| cell.v.as_str()))
            .collect();
        columns.push(field_column(field, &cells));
    }

    Ok(DataFrame::new(columns)?)
}

/// Build one typed column from the string cells of a field.
///
/// Cell values arrive as JSON strings regardless of type; unparseable
/// values become null rather than failing the conversion.
fn field_column(field: &TableField, cells: &[Option<&str>]) -> Column {
    let name: PlSmallStr = field.name.as_str().into();

    match field.field_type.as_str() {
        "INTEGER" | "INT64" => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|cell| cell.and_then(|v| v.parse::<i64>().ok()))
                .collect();
            Column::new(name, values)
        }
        "FLOAT" | "FLOAT64" => {
            let values: Vec<Option<f64>> = cells
                .iter()
                .map(|cell| cell.and_then(|v| v.parse::<f64>().ok()))
                .collect();
            Column::new(name, values)
        }
        "BOOLEAN" | "BOOL" => {
            let values: Vec<Option<bool>> = cells
                .iter()
                .map(|cell| {
                    cell.and_then(|v| match v {
                        "true" => Some(true),
                        "false" => Some(false),
                        _ => None,
                    })
                })
                .collect();
            Column::new(name, values)
        }
        _ => Column::new(name, cells),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_response(json: serde_json::Value) -> QueryResponse {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_response_to_frame_types() {
        let response = parse_response(serde_json::json!({
            "jobComplete": true,
            "schema": {"fields": [
                {"name": "id_chamado", "type": "STRING"},
                {"name": "data_abertura", "type": "DATE"},
                {"name": "longitude", "type": "FLOAT"},
                {"name": "tempo_prazo", "type": "INTEGER"},
                {"name": "dentro_prazo", "type": "BOOLEAN"},
            ]},
            "rows": [
                {"f": [
                    {"v": "18612756"},
                    {"v": "2023-01-15"},
                    {"v": "-43.2093"},
                    {"v": "15"},
                    {"v": "true"},
                ]},
                {"f": [
                    {"v": "18612757"},
                    {"v": "2023-01-16"},
                    {"v": null},
                    {"v": null},
                    {"v": "false"},
                ]},
            ],
        }));

        let df = response_to_frame(response).unwrap();

        assert_eq!(df.shape(), (2, 5));
        assert_eq!(df.column("id_chamado").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("data_abertura").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("longitude").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("tempo_prazo").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("dentro_prazo").unwrap().dtype(), &DataType::Boolean);

        // Nulls survive the conversion
        assert_eq!(df.column("longitude").unwrap().null_count(), 1);
        assert_eq!(df.column("tempo_prazo").unwrap().null_count(), 1);
    }

    #[test]
    fn test_response_to_frame_empty_result() {
        let response = parse_response(serde_json::json!({
            "jobComplete": true,
            "schema": {"fields": [
                {"name": "id_chamado", "type": "STRING"},
            ]},
        }));

        let df = response_to_frame(response).unwrap();
        assert_eq!(df.shape(), (0, 1));
    }

    #[test]
    fn test_incomplete_job_is_an_error() {
        let response = parse_response(serde_json::json!({
            "jobComplete": false,
        }));

        let err = response_to_frame(response).unwrap_err();
        assert!(matches!(err, DashboardError::QueryBackend { .. }));
    }

    #[test]
    fn test_missing_schema_is_an_error() {
        let response = parse_response(serde_json::json!({
            "jobComplete": true,
            "rows": [],
        }));

        let err = response_to_frame(response).unwrap_err();
        assert!(matches!(err, DashboardError::MalformedResponse { .. }));
    }
}
