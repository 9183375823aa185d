mod data;
mod errors;
mod pipeline;
mod storage;

use anyhow::bail;
use chrono::Utc;
use data::CoinGeckoClient;
use dotenv::dotenv;
use pipeline::{run_extract, run_transform};
use std::env;
use storage::CsvSnapshotStore;

/// Directory of raw provider snapshots
const RAW_DIR: &str = "data/raw";
/// Directory of cleaned, enriched snapshots
const CLEAN_DIR: &str = "data/clean";

/// Runs the extract stage and prints where the snapshot landed.
///
/// # Errors
/// Returns an error if the upstream fetch or the snapshot write fails
async fn extract_stage(store: &CsvSnapshotStore) -> anyhow::Result<()> {
    let source = CoinGeckoClient::new();
    let report = run_extract(&source, store, Utc::now()).await?;

    println!("Extraction complete!");
    println!("   {}/{} ({} rows)", RAW_DIR, report.file, report.rows);

    Ok(())
}

/// Runs the transform stage and prints the resulting clean file.
///
/// # Errors
/// Returns an error if no raw snapshot exists or the clean write fails
fn transform_stage(store: &CsvSnapshotStore) -> anyhow::Result<()> {
    let report = run_transform(store, Utc::now())?;

    println!("Transform complete. Clean file written to: {}/{}", CLEAN_DIR, report.output);
    println!("Source: {}/{}", RAW_DIR, report.input);
    println!("Row count: {}", report.rows);

    Ok(())
}

/// Entry point for the snapshot ETL pipeline.
///
/// Dispatches on a single positional stage argument:
/// - `extract`: fetch the market listing and write a raw snapshot
/// - `transform`: clean and enrich the latest raw snapshot
/// - `all` (default): run both stages in sequence
///
/// # Returns
/// Returns `Ok(())` when the requested stage(s) complete, otherwise the
/// error naming the unmet precondition
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file
    dotenv().ok();

    let stage = env::args().nth(1).unwrap_or_else(|| "all".to_string());

    let store = CsvSnapshotStore::new(RAW_DIR, CLEAN_DIR)?;

    match stage.as_str() {
        "extract" => extract_stage(&store).await?,
        "transform" => transform_stage(&store)?,
        "all" => {
            extract_stage(&store).await?;
            transform_stage(&store)?;
        }
        other => bail!("unknown stage '{}' (expected \"extract\", \"transform\" or \"all\")", other),
    }

    Ok(())
}
