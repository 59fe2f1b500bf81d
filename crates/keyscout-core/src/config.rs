//! Configuration types for keyscout.
//!
//! [`Config::load`] reads `~/.config/keyscout/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::load_from`] reads an
//! explicit file instead. Both apply `KEYSCOUT_*` environment overrides last
//! (`KEYSCOUT_QUERY__THRESHOLD=80`). [`Config::defaults`] returns the
//! defaults without touching the filesystem (useful in tests).

use crate::search::{QueryParams, SearchMode};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[data]
dataset_path     = "data/keywords.csv"
saved_lists_path = "data/saved_lists.json"

[query]
threshold      = 70.0
page_size      = 200
search_mode    = "partial"
sort_column    = "keyword"
sort_ascending = true
batch_size     = 1000

[export]
file_stem = "selected_keywords"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// `[data]` section: where the dataset and saved lists live.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,
    #[serde(default = "default_saved_lists_path")]
    pub saved_lists_path: PathBuf,
}

fn default_dataset_path() -> PathBuf { PathBuf::from("data/keywords.csv") }
fn default_saved_lists_path() -> PathBuf { PathBuf::from("data/saved_lists.json") }

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            saved_lists_path: default_saved_lists_path(),
        }
    }
}

/// `[query]` section: defaults for parameters a caller leaves out.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub search_mode: SearchMode,
    #[serde(default = "default_sort_column")]
    pub sort_column: String,
    #[serde(default = "default_sort_ascending")]
    pub sort_ascending: bool,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_threshold() -> f64 { 70.0 }
fn default_page_size() -> usize { 200 }
fn default_sort_column() -> String { "keyword".to_string() }
fn default_sort_ascending() -> bool { true }
fn default_batch_size() -> usize { crate::search::DEFAULT_BATCH_SIZE }

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            page_size: default_page_size(),
            search_mode: SearchMode::default(),
            sort_column: default_sort_column(),
            sort_ascending: default_sort_ascending(),
            batch_size: default_batch_size(),
        }
    }
}

impl QueryConfig {
    /// Query parameters seeded from these defaults.
    pub fn params(&self) -> QueryParams {
        QueryParams {
            search_mode: self.search_mode,
            threshold: self.threshold,
            sort_column: self.sort_column.clone(),
            sort_ascending: self.sort_ascending,
            page_size: self.page_size,
            ..QueryParams::default()
        }
    }
}

/// `[export]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_file_stem")]
    pub file_stem: String,
}

fn default_file_stem() -> String { crate::export::DEFAULT_FILE_STEM.to_string() }

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_stem: default_file_stem(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/keyscout/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Load an explicit config file, layered on top of the built-in defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix("KEYSCOUT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("keyscout")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
