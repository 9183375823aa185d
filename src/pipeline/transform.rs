use crate::data::{enrich, normalize};
use crate::errors::PipelineResult;
use crate::storage::{clean_snapshot_name, latest_raw_snapshot, SnapshotStore};
use chrono::{DateTime, Utc};
use tracing::info;

/// Summary of one completed transform run.
#[derive(Debug, Clone)]
pub struct TransformReport {
    pub input: String,
    pub output: String,
    pub rows: usize,
}

/// Runs the transform stage: locate the latest raw snapshot, normalize its
/// schema, compute the derived columns, and persist a clean snapshot.
///
/// The input snapshot is never mutated and its row order is preserved.
/// Nothing is written unless every step succeeds; in particular, an empty
/// raw store fails the run before any output exists.
///
/// # Arguments
/// * `store`: snapshot store holding the raw input and receiving the output
/// * `now`: the single wall-clock capture for this run, used both for the
///   audit column and the output file name
pub fn run_transform<S: SnapshotStore>(store: &S, now: DateTime<Utc>) -> PipelineResult<TransformReport> {
    let input = latest_raw_snapshot(store)?;
    let raw = store.read_raw(&input)?;
    info!(file = %input, rows = raw.len(), "loaded raw snapshot");

    let clean = enrich(normalize(raw), now);

    let output = clean_snapshot_name(now);
    store.write_clean(&output, &clean)?;
    info!(file = %output, rows = clean.len(), "clean snapshot written");

    Ok(TransformReport {
        input,
        output,
        rows: clean.len(),
    })
}
