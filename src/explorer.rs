//! Explorer — the store object every operation goes through.
//!
//! Owns the dataset store, the saved-list store, the query engine and the
//! export assembler. Read-only operations take `&self`; anything that loads
//! or mutates takes `&mut self`, so a caller sharing an `Explorer` across
//! threads has to serialize writers (a `RwLock<Explorer>` is enough).

use keyscout_core::config::Config;
use keyscout_core::export::{Export, ExportAssembler};
use keyscout_core::lists::{JsonFileBackend, ListBackend, SavedLists};
use keyscout_core::search::{QueryEngine, QueryParams, QueryResult};
use keyscout_core::store::DatasetStore;
use keyscout_core::table::TableReader;
use keyscout_core::{Dataset, KeywordRecord, ListSummary, LoadError, Result, SheetInfo};
use keyscout_sources::FileReader;
use serde::Serialize;
use std::path::Path;

/// A page of results plus the partition state it was computed against.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    #[serde(flatten)]
    pub result: QueryResult,
    pub sheet_info: SheetInfo,
}

pub struct Explorer<R = FileReader, B = JsonFileBackend> {
    config: Config,
    datasets: DatasetStore<R>,
    lists: SavedLists<B>,
    engine: QueryEngine,
    exporter: ExportAssembler,
    startup_error: Option<LoadError>,
}

impl Explorer {
    /// Wire the file-based collaborators named in `config` and load the
    /// default dataset.
    pub fn open(config: Config) -> Result<Self> {
        let backend = JsonFileBackend::new(&config.data.saved_lists_path);
        Self::with_parts(config, FileReader::new(), backend)
    }
}

impl<R: TableReader, B: ListBackend> Explorer<R, B> {
    /// Build from explicit collaborators. A default dataset that cannot be
    /// loaded leaves the empty sentinel in place; only a broken saved-list
    /// store is an error.
    pub fn with_parts(config: Config, reader: R, backend: B) -> Result<Self> {
        let lists = SavedLists::open(backend)?;
        let mut datasets = DatasetStore::new(reader);
        let startup_error = datasets.load(&config.data.dataset_path, None).err();
        if let Some(err) = &startup_error {
            tracing::warn!(error = %err, "default dataset unavailable");
        }
        Ok(Self {
            engine: QueryEngine::new(config.query.batch_size),
            exporter: ExportAssembler::new(&config.export.file_stem),
            config,
            datasets,
            lists,
            startup_error,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Why the configured dataset failed to load, if it did.
    pub fn startup_error(&self) -> Option<&LoadError> {
        self.startup_error.as_ref()
    }

    /// Query parameters seeded from the configured defaults.
    pub fn default_params(&self) -> QueryParams {
        self.config.query.params()
    }

    pub fn dataset(&self) -> &Dataset {
        self.datasets.dataset()
    }

    // -- partitions ---------------------------------------------------------

    pub fn detect_partitions(&self, path: &Path) -> Vec<String> {
        self.datasets.detect_partitions(path)
    }

    pub fn sheet_info(&self) -> SheetInfo {
        self.datasets.sheet_info()
    }

    pub fn switch_sheet(&mut self, name: &str) -> Result<SheetInfo> {
        self.datasets.switch_partition(name)?;
        Ok(self.sheet_info())
    }

    /// Replace the data source with `path` and load its first partition.
    pub fn open_file(&mut self, path: &Path) -> Result<SheetInfo> {
        self.datasets.open_file(path)
    }

    // -- querying -----------------------------------------------------------

    pub fn query(&self, params: &QueryParams) -> QueryResponse {
        QueryResponse {
            result: self.engine.query(self.datasets.dataset(), params),
            sheet_info: self.sheet_info(),
        }
    }

    // -- saved lists --------------------------------------------------------

    pub fn saved_lists(&self) -> Vec<ListSummary> {
        self.lists.list()
    }

    pub fn saved_list(&self, name: &str) -> Result<Vec<KeywordRecord>> {
        self.lists.get(name, self.datasets.dataset())
    }

    pub fn save_list<S: AsRef<str>>(&mut self, name: &str, keywords: &[S]) -> Result<ListSummary> {
        self.lists.save(name, keywords)
    }

    pub fn delete_list(&mut self, name: &str) -> Result<()> {
        self.lists.delete(name)
    }

    // -- export -------------------------------------------------------------

    pub fn export<S: AsRef<str>>(&self, keywords: &[S]) -> Result<Export> {
        self.exporter.export(
            self.datasets.dataset(),
            keywords,
            self.datasets.current_partition(),
        )
    }

    /// Export the keywords stored under `name`.
    pub fn export_saved(&self, name: &str) -> Result<Export> {
        let keywords = self.lists.keywords(name)?;
        self.export(keywords)
    }
}
