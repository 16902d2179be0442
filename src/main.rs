use anyhow::{Context, Result};
use clap::Parser;
use job_matcher::cli::{self, Cli};
use std::fs::OpenOptions;
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "job_matcher=info,jobfit=info,rocket::server=off";

fn init_tracing() -> Result<()> {
    // Optional JSON log file next to the human-readable output
    let json_layer = match std::env::var("JOBFIT_LOG_FILE") {
        Ok(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file: {}", path))?;

            Some(
                fmt::layer()
                    .json()
                    .with_writer(Arc::new(file))
                    .with_current_span(true)
                    .with_span_list(false)
                    .boxed(),
            )
        }
        Err(_) => None,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(json_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    cli::run(cli).await
}
