//! 1746 service-request microdata from the `datario` BigQuery project.
//!
//! One parameterized query joins the service-request fact table to the
//! neighborhood dimension table, filtered on the opening date. The only
//! post-processing is parsing the opening and closing date columns;
//! everything else passes through with the backend's native types.

use chrono::NaiveDate;
use polars::prelude::DataFrame;
use tracing::info;

use crate::backend::QueryBackend;
use crate::error::Result;
use crate::transform::parse_datetime_columns;

/// Build the service-request query for an inclusive date range.
///
/// The structure (joined tables, selected columns, BETWEEN predicate)
/// must stay as-is for output compatibility with the dashboard.
pub fn service_request_query(start_date: NaiveDate, end_date: NaiveDate) -> String {
    format!(
        "
    SELECT
        ch.id_chamado,
        DATE(ch.data_inicio) AS data_abertura,
        DATE(ch.data_fim) AS data_fechamento,
        ch.id_bairro,
        ba.nome AS nome_bairro,
        ba.subprefeitura,
        ch.id_unidade_organizacional,
        ch.nome_unidade_organizacional,
        ch.unidade_organizacional_ouvidoria,
        ch.categoria,
        ch.tipo,
        ch.subtipo,
        ch.longitude,
        ch.latitude,
        ch.data_alvo_finalizacao,
        ch.data_alvo_diagnostico,
        ch.data_real_diagnostico,
        ch.tempo_prazo,
        ch.prazo_unidade,
        ch.dentro_prazo
    FROM `datario.adm_central_atendimento_1746.chamado` AS ch
    LEFT JOIN `datario.dados_mestres.bairro` AS ba
    USING(id_bairro)
    WHERE DATE(data_inicio) BETWEEN '{start}' AND '{end}'
    ",
        start = start_date.format("%Y-%m-%d"),
        end = end_date.format("%Y-%m-%d"),
    )
}

/// Fetch all service requests opened within `[start_date, end_date]`.
///
/// `data_abertura` and `data_fechamento` come back datetime-typed;
/// requests that are still open keep a null closing date.
pub async fn fetch_service_requests(
    backend: &dyn QueryBackend,
    start_date: NaiveDate,
    end_date: NaiveDate,
    billing_project: &str,
) -> Result<DataFrame> {
    let query = service_request_query(start_date, end_date);
    let df = backend.query(&query, billing_project).await?;
    info!("Fetched {} service requests", df.height());

    parse_datetime_columns(df, &["data_abertura", "data_fechamento"])
}
