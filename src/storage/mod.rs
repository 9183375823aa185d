pub mod csv_store;
pub mod snapshot;

pub use csv_store::CsvSnapshotStore;
pub use snapshot::{clean_snapshot_name, latest_raw_snapshot, raw_snapshot_name, SnapshotStore};
