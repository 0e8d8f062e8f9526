//! Repository Implementation

use crate::StorageError;
use records::{AnalysisRow, CleanRecord, RawRecord};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

/// Read a JSON array of raw records
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Vec<RawRecord>, StorageError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records: Vec<RawRecord> = serde_json::from_reader(BufReader::new(file))?;
    info!("Loaded {} raw records from {}", records.len(), path.display());
    Ok(records)
}

/// Record store for one dataset
pub struct Repository {
    /// Raw snapshot, shared read-only with every pipeline run
    raw: Mutex<Arc<[RawRecord]>>,
    /// Clean table, replaced wholesale by each run
    clean: Mutex<Vec<CleanRecord>>,
}

impl Repository {
    /// Create an empty repository
    pub fn new() -> Self {
        info!("Creating in-memory repository");
        Self {
            raw: Mutex::new(Arc::from(Vec::new())),
            clean: Mutex::new(Vec::new()),
        }
    }

    /// Create a repository preloaded with a raw snapshot
    pub fn with_raw(records: Vec<RawRecord>) -> Self {
        info!("Creating in-memory repository with {} raw records", records.len());
        Self {
            raw: Mutex::new(Arc::from(records)),
            clean: Mutex::new(Vec::new()),
        }
    }

    /// Replace the raw snapshot; the clean table is cleared since it no longer matches
    pub fn load_raw(&self, records: Vec<RawRecord>) -> Result<(), StorageError> {
        let count = records.len();
        *lock(&self.raw)? = Arc::from(records);
        lock(&self.clean)?.clear();
        info!("Raw snapshot replaced with {} records", count);
        Ok(())
    }

    /// Shared handle to the raw snapshot
    pub fn raw_snapshot(&self) -> Result<Arc<[RawRecord]>, StorageError> {
        Ok(Arc::clone(&*lock(&self.raw)?))
    }

    /// Swap in a new clean table
    pub fn replace_clean(&self, records: Vec<CleanRecord>) -> Result<(), StorageError> {
        let count = records.len();
        *lock(&self.clean)? = records;
        debug!("Clean table replaced with {} records", count);
        Ok(())
    }

    /// Mutate the clean table in place
    pub fn update_clean<F>(&self, f: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut [CleanRecord]),
    {
        let mut clean = lock(&self.clean)?;
        f(clean.as_mut_slice());
        Ok(())
    }

    /// Copy of the clean table
    pub fn clean_records(&self) -> Result<Vec<CleanRecord>, StorageError> {
        Ok(lock(&self.clean)?.clone())
    }

    /// Analysis view projected from the current clean table
    pub fn analysis_view(&self) -> Result<Vec<AnalysisRow>, StorageError> {
        let clean = lock(&self.clean)?;
        Ok(clean.iter().map(AnalysisRow::from).collect())
    }

    /// Get total raw record count
    pub fn raw_count(&self) -> usize {
        self.raw.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Get total clean record count
    pub fn clean_count(&self) -> usize {
        self.clean.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// Clear all data (for testing)
    pub fn clear(&self) {
        if let Ok(mut raw) = self.raw.lock() {
            *raw = Arc::from(Vec::new());
        }
        if let Ok(mut clean) = self.clean.lock() {
            clean.clear();
        }
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StorageError> {
    mutex
        .lock()
        .map_err(|e| StorageError::Lock(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use records::{Categories, Field, NormalizedRecord};
    use std::io::Write;

    fn clean(title: &str, duration: Option<u32>, category: &str) -> CleanRecord {
        CleanRecord {
            record: NormalizedRecord {
                title: Some(title.to_string()),
                duration,
                ..Default::default()
            },
            categories: Categories {
                duration_category: category.to_string(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_raw_snapshot_is_shared_not_copied() {
        let repo = Repository::with_raw(vec![RawRecord::default().with(Field::Title, "Up")]);
        let a = repo.raw_snapshot().unwrap();
        let b = repo.raw_snapshot().unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(repo.raw_count(), 1);
    }

    #[test]
    fn test_view_reflects_clean_table_changes() {
        let repo = Repository::new();
        repo.replace_clean(vec![clean("Up", None, "Unknown")]).unwrap();
        assert_eq!(repo.analysis_view().unwrap()[0].duration_category, "Unknown");

        repo.update_clean(|rows| {
            rows[0].record.duration = Some(96);
            rows[0].categories.duration_category = "Standard Length".to_string();
        })
        .unwrap();
        let view = repo.analysis_view().unwrap();
        assert_eq!(view[0].duration, Some(96));
        assert_eq!(view[0].duration_category, "Standard Length");

        repo.replace_clean(Vec::new()).unwrap();
        assert!(repo.analysis_view().unwrap().is_empty());
    }

    #[test]
    fn test_load_raw_clears_clean_table() {
        let repo = Repository::new();
        repo.replace_clean(vec![clean("Up", Some(96), "Standard Length")]).unwrap();
        repo.load_raw(vec![RawRecord::default(), RawRecord::default()]).unwrap();

        assert_eq!(repo.raw_count(), 2);
        assert_eq!(repo.clean_count(), 0);
    }

    #[test]
    fn test_clear() {
        let repo = Repository::with_raw(vec![RawRecord::default()]);
        repo.replace_clean(vec![clean("Up", None, "Unknown")]).unwrap();
        repo.clear();

        assert_eq!(repo.raw_count(), 0);
        assert_eq!(repo.clean_count(), 0);
    }

    #[test]
    fn test_load_snapshot() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"title": "Avatar", "budget": 237000000}}, {{"title": "Up", "gross": ""}}]"#
        )
        .unwrap();

        let records = load_snapshot(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get(Field::Budget), Some("237000000"));
        assert_eq!(records[1].get(Field::Gross), Some(""));
    }

    #[test]
    fn test_load_snapshot_errors() {
        assert!(matches!(
            load_snapshot("/nonexistent/movies.json"),
            Err(StorageError::Io { .. })
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            load_snapshot(file.path()),
            Err(StorageError::Serialization(_))
        ));
    }
}
