//! Saved lists — named, deduplicated keyword sequences.
//!
//! The in-memory map is the source of truth for the process. Every mutation
//! is applied to a copy, flushed in full through the [`ListBackend`], and
//! only then committed, so the backing store never sees a state the map did
//! not pass through and a failed flush leaves the map untouched.

use crate::error::{Error, Result};
use crate::normalizer::normalize;
use crate::types::{Dataset, KeywordRecord, ListSummary};
use indexmap::{IndexMap, IndexSet};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// List name → keywords, in insertion order.
pub type ListMap = IndexMap<String, Vec<String>>;

/// The "read/write a named-list-of-strings map" capability.
pub trait ListBackend {
    fn load(&self) -> Result<ListMap>;
    fn store(&self, lists: &ListMap) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Backends
// ---------------------------------------------------------------------------

/// A single JSON object file mapping list name to an array of strings.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ListBackend for JsonFileBackend {
    /// A missing file is an empty store.
    fn load(&self) -> Result<ListMap> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(ListMap::new()),
            Err(err) => return Err(backend_err(&self.path, err)),
        };
        serde_json::from_str(&text).map_err(|e| backend_err(&self.path, e))
    }

    /// Written to a sibling temp file and renamed over the target.
    fn store(&self, lists: &ListMap) -> Result<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|e| backend_err(dir, e))?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| backend_err(dir, e))?;
        serde_json::to_writer_pretty(&mut tmp, lists).map_err(|e| backend_err(&self.path, e))?;
        tmp.write_all(b"\n").map_err(|e| backend_err(&self.path, e))?;
        tmp.persist(&self.path)
            .map_err(|e| backend_err(&self.path, e.error))?;
        Ok(())
    }
}

fn backend_err(path: &Path, err: impl std::fmt::Display) -> Error {
    Error::Backend(format!("{}: {err}", path.display()))
}

/// Keeps the flushed map in memory. Useful for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    flushed: Mutex<ListMap>,
}

impl MemoryBackend {
    pub fn new(initial: ListMap) -> Self {
        Self {
            flushed: Mutex::new(initial),
        }
    }

    /// The last flushed map.
    pub fn flushed(&self) -> ListMap {
        self.flushed.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

impl ListBackend for MemoryBackend {
    fn load(&self) -> Result<ListMap> {
        Ok(self.flushed())
    }

    fn store(&self, lists: &ListMap) -> Result<()> {
        let mut flushed = self
            .flushed
            .lock()
            .map_err(|_| Error::Backend("memory backend lock poisoned".into()))?;
        *flushed = lists.clone();
        Ok(())
    }
}

impl<B: ListBackend + ?Sized> ListBackend for &B {
    fn load(&self) -> Result<ListMap> {
        (**self).load()
    }

    fn store(&self, lists: &ListMap) -> Result<()> {
        (**self).store(lists)
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

pub struct SavedLists<B> {
    backend: B,
    lists: ListMap,
}

impl<B: ListBackend> SavedLists<B> {
    /// Open the store, reading whatever the backend holds.
    pub fn open(backend: B) -> Result<Self> {
        let lists = backend.load()?;
        tracing::debug!(lists = lists.len(), "saved lists opened");
        Ok(Self { backend, lists })
    }

    /// One summary per list, in insertion order.
    pub fn list(&self) -> Vec<ListSummary> {
        self.lists
            .iter()
            .map(|(name, keywords)| ListSummary {
                name: name.clone(),
                count: keywords.len(),
            })
            .collect()
    }

    /// The stored keywords of `name`.
    pub fn keywords(&self, name: &str) -> Result<&[String]> {
        self.lists
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::not_found(format!("saved list {name:?}")))
    }

    /// The stored keywords of `name`, each resolved against `dataset`.
    ///
    /// When several rows share a keyword, the first with a usable volume wins,
    /// else the first row. Keywords with no row come back bare.
    pub fn get(&self, name: &str, dataset: &Dataset) -> Result<Vec<KeywordRecord>> {
        Ok(self
            .keywords(name)?
            .iter()
            .map(|keyword| enrich(keyword, dataset))
            .collect())
    }

    /// Create or overwrite `name` with the normalized, deduplicated keywords.
    pub fn save<I, S>(&mut self, name: &str, keywords: I) -> Result<ListSummary>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if name.trim().is_empty() {
            return Err(Error::validation("list name is required"));
        }
        let unique: IndexSet<String> = keywords
            .into_iter()
            .map(|k| normalize(k.as_ref()).to_string())
            .filter(|k| !k.is_empty())
            .collect();
        if unique.is_empty() {
            return Err(Error::validation("at least one keyword is required"));
        }

        let mut next = self.lists.clone();
        next.insert(name.to_string(), unique.into_iter().collect());
        self.commit(next)?;

        let count = self.lists[name].len();
        tracing::info!(list = name, count, "saved list written");
        Ok(ListSummary {
            name: name.to_string(),
            count,
        })
    }

    pub fn delete(&mut self, name: &str) -> Result<()> {
        if !self.lists.contains_key(name) {
            return Err(Error::not_found(format!("saved list {name:?}")));
        }
        let mut next = self.lists.clone();
        next.shift_remove(name);
        self.commit(next)?;
        tracing::info!(list = name, "saved list deleted");
        Ok(())
    }

    fn commit(&mut self, next: ListMap) -> Result<()> {
        self.backend.store(&next)?;
        self.lists = next;
        Ok(())
    }
}

fn enrich(keyword: &str, dataset: &Dataset) -> KeywordRecord {
    let mut rows = dataset.rows_for(keyword).peekable();
    let first = rows.peek().copied().cloned();
    rows.find(|r| !r.has_blank_volume())
        .cloned()
        .or(first)
        .unwrap_or_else(|| KeywordRecord::bare(keyword))
}
