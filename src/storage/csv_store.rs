use super::snapshot::SnapshotStore;
use crate::data::{CleanRecord, RawAssetRecord};
use crate::errors::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Snapshot store backed by CSV files in a raw and a clean directory.
///
/// Writes go to a temporary file in the destination directory first and are
/// renamed into place, so a snapshot name never refers to a half-written
/// file. Reads and listings never mutate anything.
pub struct CsvSnapshotStore {
    raw_dir: PathBuf,
    clean_dir: PathBuf,
}

impl CsvSnapshotStore {
    /// Opens a store over the two snapshot directories, creating them if
    /// missing.
    ///
    /// # Errors
    /// Returns an error if either directory cannot be created.
    pub fn new(raw_dir: impl Into<PathBuf>, clean_dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let raw_dir = raw_dir.into();
        let clean_dir = clean_dir.into();

        fs::create_dir_all(&raw_dir).map_err(|e| StorageError::Io {
            path: raw_dir.clone(),
            source: e,
        })?;
        fs::create_dir_all(&clean_dir).map_err(|e| StorageError::Io {
            path: clean_dir.clone(),
            source: e,
        })?;

        Ok(Self { raw_dir, clean_dir })
    }

    fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StorageError> {
        let file = File::open(path).map_err(|e| StorageError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut reader = csv::Reader::from_reader(file);
        let mut rows = Vec::new();

        for result in reader.deserialize() {
            let row: T = result.map_err(|e| StorageError::Csv {
                path: path.to_path_buf(),
                source: e,
            })?;
            rows.push(row);
        }

        Ok(rows)
    }

    fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), StorageError> {
        let tmp_path = path.with_extension("csv.tmp");

        let file = File::create(&tmp_path).map_err(|e| StorageError::Io {
            path: tmp_path.clone(),
            source: e,
        })?;

        let mut writer = csv::Writer::from_writer(file);
        for row in rows {
            writer.serialize(row).map_err(|e| StorageError::Csv {
                path: tmp_path.clone(),
                source: e,
            })?;
        }
        writer.flush().map_err(|e| StorageError::Io {
            path: tmp_path.clone(),
            source: e,
        })?;
        drop(writer);

        fs::rename(&tmp_path, path).map_err(|e| StorageError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

impl SnapshotStore for CsvSnapshotStore {
    fn list_raw(&self) -> Result<Vec<String>, StorageError> {
        let entries = fs::read_dir(&self.raw_dir).map_err(|e| StorageError::Io {
            path: self.raw_dir.clone(),
            source: e,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StorageError::Io {
                path: self.raw_dir.clone(),
                source: e,
            })?;
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }

        Ok(names)
    }

    fn read_raw(&self, name: &str) -> Result<Vec<RawAssetRecord>, StorageError> {
        Self::read_table(&self.raw_dir.join(name))
    }

    fn write_raw(&self, name: &str, rows: &[RawAssetRecord]) -> Result<(), StorageError> {
        Self::write_table(&self.raw_dir.join(name), rows)
    }

    fn write_clean(&self, name: &str, rows: &[CleanRecord]) -> Result<(), StorageError> {
        Self::write_table(&self.clean_dir.join(name), rows)
    }
}
