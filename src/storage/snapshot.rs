use crate::data::{CleanRecord, RawAssetRecord};
use crate::errors::{PipelineError, PipelineResult, StorageError};
use chrono::{DateTime, Utc};

/// Timestamp format embedded in snapshot file names. Zero-padded, so
/// lexicographic order over names equals chronological order.
const FILE_STAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Storage for snapshot tables, abstracted over the file system so the
/// pipeline stages can run against an in-memory double in tests.
///
/// Snapshots are immutable: a store only ever lists, reads whole files, and
/// writes whole new files.
pub trait SnapshotStore {
    /// List entry names in the raw store, in no particular order.
    fn list_raw(&self) -> Result<Vec<String>, StorageError>;

    /// Read every row of one raw snapshot.
    fn read_raw(&self, name: &str) -> Result<Vec<RawAssetRecord>, StorageError>;

    /// Write a complete raw snapshot under the given name.
    fn write_raw(&self, name: &str, rows: &[RawAssetRecord]) -> Result<(), StorageError>;

    /// Write a complete clean snapshot under the given name.
    fn write_clean(&self, name: &str, rows: &[CleanRecord]) -> Result<(), StorageError>;
}

/// File name for a raw snapshot taken at `now`.
pub fn raw_snapshot_name(now: DateTime<Utc>) -> String {
    format!("crypto_prices_{}.csv", now.format(FILE_STAMP_FORMAT))
}

/// File name for a clean snapshot produced at `now`.
pub fn clean_snapshot_name(now: DateTime<Utc>) -> String {
    format!("crypto_clean_{}.csv", now.format(FILE_STAMP_FORMAT))
}

/// Picks the most recent snapshot name out of a directory listing.
///
/// Only `.csv` entries qualify. The timestamp embedded in qualifying names
/// is zero-padded, so the lexicographically greatest name is the newest
/// snapshot regardless of the order the entries were enumerated in.
pub fn select_latest(names: &[String]) -> Option<&String> {
    names.iter().filter(|n| n.ends_with(".csv")).max()
}

/// Locates the raw snapshot the transform stage should consume.
///
/// # Errors
/// Fails with [`PipelineError::NoInputSnapshot`] when the raw store holds no
/// qualifying entries; there is nothing to transform and the run must stop.
pub fn latest_raw_snapshot<S: SnapshotStore>(store: &S) -> PipelineResult<String> {
    let names = store.list_raw()?;
    select_latest(&names)
        .cloned()
        .ok_or(PipelineError::NoInputSnapshot)
}


#[cfg(test)]
mod tests {
    use super::testing::MemoryStore;
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn snapshot_names_embed_the_timestamp() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 9, 5, 3).unwrap();
        assert_eq!(raw_snapshot_name(now), "crypto_prices_2024-06-01_09-05-03.csv");
        assert_eq!(clean_snapshot_name(now), "crypto_clean_2024-06-01_09-05-03.csv");
    }

    #[test]
    fn selects_the_lexicographically_greatest_csv() {
        let names = vec![
            "crypto_prices_2024-01-01_00-00-00.csv".to_string(),
            "crypto_prices_2024-06-01_00-00-00.csv".to_string(),
        ];

        assert_eq!(
            select_latest(&names).unwrap(),
            "crypto_prices_2024-06-01_00-00-00.csv"
        );
    }

    #[test]
    fn selection_ignores_enumeration_order() {
        let mut names = vec![
            "crypto_prices_2024-03-15_12-00-00.csv".to_string(),
            "crypto_prices_2024-06-01_00-00-00.csv".to_string(),
            "crypto_prices_2024-01-01_00-00-00.csv".to_string(),
        ];

        let forward = select_latest(&names).cloned();
        names.reverse();
        let reversed = select_latest(&names).cloned();

        assert_eq!(forward, reversed);
        assert_eq!(forward.unwrap(), "crypto_prices_2024-06-01_00-00-00.csv");
    }

    #[test]
    fn non_csv_entries_do_not_qualify() {
        let names = vec![
            "notes.txt".to_string(),
            "crypto_prices_2024-01-01_00-00-00.csv".to_string(),
            "zzz_backup.json".to_string(),
        ];

        assert_eq!(
            select_latest(&names).unwrap(),
            "crypto_prices_2024-01-01_00-00-00.csv"
        );
    }

    #[test]
    fn empty_store_yields_no_input_snapshot() {
        let store = MemoryStore::default();
        let err = latest_raw_snapshot(&store).unwrap_err();
        assert!(matches!(err, PipelineError::NoInputSnapshot));
    }
}
