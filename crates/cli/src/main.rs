//! CalTally - monthly calendar time report exporter
//!
//! Command-line entry point: loads configuration, fetches one month of
//! calendar events, and writes the daily summary and uncategorized CSVs.

use std::path::PathBuf;

use anyhow::{Context, Result};
use caltally_core::{ExportService, MonthRange};
use caltally_infra::calendar::{create_provider, GoogleCredentials};
use caltally_infra::{config, report};
use chrono::{Datelike, Utc};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "caltally",
    about = "Export a monthly time-per-category summary from a calendar",
    version
)]
struct Args {
    /// Year to export (defaults to the current UTC year)
    #[arg(long)]
    year: Option<i32>,

    /// Month to export, 1-12 (defaults to the current UTC month)
    #[arg(long)]
    month: Option<u32>,

    /// Path to the configuration file (standard locations are probed when omitted)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory for the CSV output (overrides the configured directory)
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    run(Args::parse()).await
}

async fn run(args: Args) -> Result<()> {
    let app_config = config::load(args.config).context("failed to load configuration")?;

    let today = Utc::now().date_naive();
    let year = args.year.unwrap_or_else(|| today.year());
    let month = args.month.unwrap_or_else(|| today.month());
    let range = MonthRange::new(year, month)?;

    let credentials = GoogleCredentials::from_env();
    let provider = create_provider(&app_config.calendar, credentials)?;
    let service = ExportService::new(provider, app_config.categories.clone());

    let export = service.export_month(range).await?;

    let out_dir = args.out_dir.unwrap_or_else(|| app_config.output.dir.clone());
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;

    let matrix_path = out_dir.join(&app_config.output.matrix_file);
    let uncategorized_path = out_dir.join(&app_config.output.uncategorized_file);

    report::write_matrix_csv(&matrix_path, &export.matrix)?;
    report::write_uncategorized_csv(&uncategorized_path, &export.uncategorized)?;

    info!(
        matrix = %matrix_path.display(),
        uncategorized = %uncategorized_path.display(),
        "monthly report written"
    );

    Ok(())
}
