use std::process;

use anyhow::Context;
use clap::Parser;
use reqwest::Client;

use dashboard_fetcher::backend::BigQueryBackend;
use dashboard_fetcher::cli::Args;
use dashboard_fetcher::pipeline;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(error) = run(args).await {
        eprintln!("Error: {error:#}");
        process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = args.into_config();

    let access_token = std::env::var("BIGQUERY_ACCESS_TOKEN").context(
        "BIGQUERY_ACCESS_TOKEN must hold a Google Cloud access token \
         (e.g. `gcloud auth print-access-token`)",
    )?;
    let backend = BigQueryBackend::new(Client::new(), access_token);

    pipeline::run(&config, &backend).await?;
    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dashboard_fetcher={log_level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();
}
