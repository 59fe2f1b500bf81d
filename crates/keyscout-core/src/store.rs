//! Store — the currently loaded dataset and its partition registry.
//!
//! The store is the single source of truth for the query engine, the saved
//! list enrichment and the export assembler. A load either fully succeeds or
//! leaves the empty sentinel in place; callers never observe a half-loaded
//! table. Readers take an [`Arc`] snapshot, so a later load swaps the table
//! reference without disturbing in-flight queries.

use crate::error::{Error, LoadError, Result};
use crate::table::{build_dataset, TableReader};
use crate::types::{Dataset, SheetInfo};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Externally visible load state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// No load attempted yet.
    Unloaded,
    /// The last load succeeded (the table may still have zero rows).
    Loaded,
    /// The last load failed; the dataset is the empty sentinel.
    Failed,
}

pub struct DatasetStore<R> {
    reader: R,
    source: Option<PathBuf>,
    current: Option<String>,
    available: Vec<String>,
    dataset: Arc<Dataset>,
    state: LoadState,
}

impl<R: TableReader> DatasetStore<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            source: None,
            current: None,
            available: Vec::new(),
            dataset: Arc::new(Dataset::empty()),
            state: LoadState::Unloaded,
        }
    }

    /// Partition names inside `path`. Failures are logged and yield an
    /// empty list.
    pub fn detect_partitions(&self, path: &Path) -> Vec<String> {
        match self.reader.partitions(path) {
            Ok(names) => names,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "partition detection failed");
                Vec::new()
            }
        }
    }

    /// Load `path`, optionally restricted to `partition`.
    ///
    /// The partition is the explicit one when it exists, else the first
    /// available one, else none. On failure the dataset becomes the empty
    /// sentinel and the error is returned for the caller to report.
    pub fn load(
        &mut self,
        path: impl AsRef<Path>,
        partition: Option<&str>,
    ) -> std::result::Result<Arc<Dataset>, LoadError> {
        let path = path.as_ref();
        if self.source.as_deref() != Some(path) || self.available.is_empty() {
            self.available = self.detect_partitions(path);
            self.current = None;
        }
        self.source = Some(path.to_path_buf());
        self.current = match partition {
            Some(name) if self.available.iter().any(|a| a == name) => Some(name.to_string()),
            _ => self.available.first().cloned(),
        };

        match self.read_current(path) {
            Ok(dataset) => {
                tracing::info!(
                    path = %path.display(),
                    sheet = ?self.current,
                    rows = dataset.len(),
                    "dataset loaded"
                );
                self.dataset = Arc::new(dataset);
                self.state = LoadState::Loaded;
                Ok(Arc::clone(&self.dataset))
            }
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "dataset load failed; using empty dataset"
                );
                self.dataset = Arc::new(Dataset::empty());
                self.state = LoadState::Failed;
                Err(err)
            }
        }
    }

    fn read_current(&self, path: &Path) -> std::result::Result<Dataset, LoadError> {
        if !path.exists() {
            return Err(LoadError::MissingSource(path.to_path_buf()));
        }
        let table = self.reader.read(path, self.current.as_deref())?;
        build_dataset(&table)
    }

    /// Reload the current source and partition.
    pub fn reload(&mut self) -> std::result::Result<Arc<Dataset>, LoadError> {
        let source = self.source.clone().ok_or(LoadError::NoSource)?;
        let current = self.current.clone();
        self.load(source, current.as_deref())
    }

    /// Switch to another partition of the current source.
    pub fn switch_partition(&mut self, name: &str) -> Result<Arc<Dataset>> {
        if name.is_empty() || !self.available.iter().any(|a| a == name) {
            return Err(Error::validation(format!("invalid sheet name: {name:?}")));
        }
        let source = self.source.clone().ok_or(LoadError::NoSource)?;
        Ok(self.load(source, Some(name))?)
    }

    /// Make `path` the data source (a freshly uploaded file) and load its
    /// first partition.
    pub fn open_file(&mut self, path: impl AsRef<Path>) -> Result<SheetInfo> {
        let path = path.as_ref();
        let available = self.detect_partitions(path);
        if available.is_empty() {
            return Err(Error::validation(format!(
                "no sheets found in {}",
                path.display()
            )));
        }
        self.available = available;
        self.source = Some(path.to_path_buf());
        let first = self.available[0].clone();
        self.load(path, Some(&first))?;
        Ok(self.sheet_info())
    }

    pub fn current_partition(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn available_partitions(&self) -> &[String] {
        &self.available
    }

    pub fn sheet_info(&self) -> SheetInfo {
        SheetInfo {
            current_sheet: self.current.clone(),
            available_sheets: self.available.clone(),
        }
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// The current table.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// A shared handle to the current table that survives later loads.
    pub fn snapshot(&self) -> Arc<Dataset> {
        Arc::clone(&self.dataset)
    }
}
