//! JSON-based report persistence.
//!
//! Each scan is stored as its own JSON file named by `ScanId`, which keeps
//! writes atomic per scan and makes cleanup trivial.

use crate::config::Paths;
use crate::error::{StorageError, StorageResult};
use crate::session::ScanReport;
use crate::types::ScanId;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A persisted scan: the report plus its storage identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRecord {
    pub id: ScanId,
    #[serde(flatten)]
    pub report: ScanReport,
}

impl ScanRecord {
    /// Wrap a finished report under a fresh ID.
    pub fn new(report: ScanReport) -> Self {
        Self {
            id: ScanId::new(),
            report,
        }
    }
}

/// File-per-scan JSON storage for reports.
pub struct ReportStore {
    scans_dir: PathBuf,
}

impl ReportStore {
    /// Store rooted at the standard XDG data directory.
    pub fn new() -> StorageResult<Self> {
        Self::at(Paths::get().scans_dir())
    }

    /// Store rooted at an explicit directory; used by tests.
    pub fn at(scans_dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let scans_dir = scans_dir.into();
        fs::create_dir_all(&scans_dir).map_err(|e| StorageError::Directory(e.to_string()))?;
        Ok(Self { scans_dir })
    }

    /// Save a record; overwrites any existing file for the same ID.
    pub fn save(&self, record: &ScanRecord) -> StorageResult<()> {
        let content = serde_json::to_string_pretty(record)?;
        fs::write(self.record_file(&record.id), content)
            .map_err(|e| StorageError::SaveFailed(e.to_string()))
    }

    /// Load a record by full ID.
    pub fn load(&self, id: &ScanId) -> StorageResult<ScanRecord> {
        let file = self.record_file(id);
        if !file.exists() {
            return Err(StorageError::ScanNotFound(id.to_string()));
        }
        let content =
            fs::read_to_string(&file).map_err(|e| StorageError::LoadFailed(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| StorageError::LoadFailed(e.to_string()))
    }

    /// Find a record by a short ID prefix.
    pub fn find_by_prefix(&self, prefix: &str) -> StorageResult<ScanRecord> {
        let matches: Vec<ScanId> = self
            .list_ids()?
            .into_iter()
            .filter(|id| id.to_string().starts_with(prefix))
            .collect();

        match matches.as_slice() {
            [] => Err(StorageError::ScanNotFound(prefix.to_string())),
            [id] => self.load(id),
            _ => Err(StorageError::AmbiguousPrefix {
                prefix: prefix.to_string(),
                matches: matches.len(),
            }),
        }
    }

    /// IDs of every stored scan, unordered.
    pub fn list_ids(&self) -> StorageResult<Vec<ScanId>> {
        let mut ids = Vec::new();
        let entries =
            fs::read_dir(&self.scans_dir).map_err(|e| StorageError::Directory(e.to_string()))?;

        for entry in entries {
            let entry = entry.map_err(|e| StorageError::Directory(e.to_string()))?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem() {
                    if let Ok(id) = stem.to_string_lossy().parse::<ScanId>() {
                        ids.push(id);
                    }
                }
            }
        }

        Ok(ids)
    }

    /// All records, most recent first.
    pub fn list(&self) -> StorageResult<Vec<ScanRecord>> {
        let mut records: Vec<ScanRecord> = self
            .list_ids()?
            .iter()
            .filter_map(|id| self.load(id).ok())
            .collect();
        records.sort_by(|a, b| b.report.completed_at.cmp(&a.report.completed_at));
        Ok(records)
    }

    /// The `count` most recent records.
    pub fn list_recent(&self, count: usize) -> StorageResult<Vec<ScanRecord>> {
        let mut records = self.list()?;
        records.truncate(count);
        Ok(records)
    }

    /// Delete one record.
    pub fn delete(&self, id: &ScanId) -> StorageResult<()> {
        let file = self.record_file(id);
        if !file.exists() {
            return Err(StorageError::ScanNotFound(id.to_string()));
        }
        fs::remove_file(&file).map_err(|e| StorageError::SaveFailed(e.to_string()))
    }

    /// Delete records older than `max_age`, returning how many were removed.
    pub fn prune(&self, max_age: chrono::Duration) -> StorageResult<usize> {
        let cutoff = Utc::now() - max_age;
        let mut deleted = 0;
        for record in self.list()? {
            if record.report.completed_at < cutoff {
                self.delete(&record.id)?;
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    /// Remove every stored record.
    pub fn clear(&self) -> StorageResult<usize> {
        let ids = self.list_ids()?;
        let count = ids.len();
        for id in &ids {
            self.delete(id)?;
        }
        Ok(count)
    }

    pub fn root(&self) -> &Path {
        &self.scans_dir
    }

    fn record_file(&self, id: &ScanId) -> PathBuf {
        self.scans_dir.join(format!("{}.json", id))
    }
}
