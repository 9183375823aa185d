use crate::data::MarketDataSource;
use crate::errors::PipelineResult;
use crate::storage::{raw_snapshot_name, SnapshotStore};
use chrono::{DateTime, Utc};
use tracing::info;

/// Summary of one completed extract run.
#[derive(Debug, Clone)]
pub struct ExtractReport {
    pub file: String,
    pub rows: usize,
}

/// Runs the extract stage: fetch the current market listing and persist it
/// as a timestamped raw snapshot.
///
/// The snapshot keeps the provider's ordering (market cap descending). Any
/// failure aborts the run before a file becomes visible.
///
/// # Arguments
/// * `source`: market listing source
/// * `store`: destination snapshot store
/// * `now`: wall-clock capture naming the snapshot
pub async fn run_extract<M, S>(source: &M, store: &S, now: DateTime<Utc>) -> PipelineResult<ExtractReport>
where
    M: MarketDataSource + Sync,
    S: SnapshotStore,
{
    let rows = source.fetch_top_markets().await?;
    info!(rows = rows.len(), "fetched market listing");

    let file = raw_snapshot_name(now);
    store.write_raw(&file, &rows)?;
    info!(file = %file, "raw snapshot written");

    Ok(ExtractReport {
        file,
        rows: rows.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RawAssetRecord;
    use crate::errors::PipelineError;
    use crate::storage::snapshot::testing::MemoryStore;
    use async_trait::async_trait;
    use chrono::TimeZone;

    struct StubSource {
        rows: Vec<RawAssetRecord>,
    }

    #[async_trait]
    impl MarketDataSource for StubSource {
        async fn fetch_top_markets(&self) -> PipelineResult<Vec<RawAssetRecord>> {
            Ok(self.rows.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl MarketDataSource for FailingSource {
        async fn fetch_top_markets(&self) -> PipelineResult<Vec<RawAssetRecord>> {
            Err(PipelineError::UpstreamFetch {
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            })
        }
    }

    #[tokio::test]
    async fn writes_a_snapshot_named_with_the_injected_timestamp() {
        let source = StubSource {
            rows: vec![RawAssetRecord {
                id: "bitcoin".to_string(),
                ..Default::default()
            }],
        };
        let store = MemoryStore::default();
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let report = run_extract(&source, &store, now).await.unwrap();

        assert_eq!(report.file, "crypto_prices_2024-06-01_00-00-00.csv");
        assert_eq!(report.rows, 1);
        assert_eq!(store.raw.borrow()[&report.file][0].id, "bitcoin");
    }

    #[tokio::test]
    async fn upstream_failure_writes_nothing() {
        let store = MemoryStore::default();
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let err = run_extract(&FailingSource, &store, now).await.unwrap_err();

        assert!(matches!(err, PipelineError::UpstreamFetch { .. }));
        assert!(store.raw.borrow().is_empty());
    }
}
