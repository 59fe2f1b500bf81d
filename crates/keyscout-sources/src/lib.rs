//! keyscout-sources — tabular file readers for the dataset store.
//!
//! [`FileReader`] dispatches on the file extension (case-insensitive):
//!
//! | Extension | Reader | Partitions |
//! |-----------|--------|------------|
//! | `.csv` | [`CsvReader`] | one, named after the file |
//! | `.xlsx` `.xls` `.xlsm` | [`SpreadsheetReader`] | the workbook's sheets |
//!
//! Anything else reports [`LoadError::UnsupportedFormat`].

pub mod csv;
pub mod spreadsheet;

pub use crate::csv::CsvReader;
pub use crate::spreadsheet::SpreadsheetReader;

use keyscout_core::table::{RawTable, TableReader};
use keyscout_core::LoadError;
use std::path::Path;

/// Which reader handles a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Csv,
    Spreadsheet,
}

impl SourceKind {
    pub fn detect(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(SourceKind::Csv),
            "xlsx" | "xls" | "xlsm" => Some(SourceKind::Spreadsheet),
            _ => None,
        }
    }
}

/// Extension-dispatching [`TableReader`].
#[derive(Debug, Clone, Default)]
pub struct FileReader {
    csv: CsvReader,
    spreadsheet: SpreadsheetReader,
}

impl FileReader {
    pub fn new() -> Self {
        Self::default()
    }

    fn pick(&self, path: &Path) -> Result<&dyn TableReader, LoadError> {
        match SourceKind::detect(path) {
            Some(SourceKind::Csv) => Ok(&self.csv),
            Some(SourceKind::Spreadsheet) => Ok(&self.spreadsheet),
            None => Err(LoadError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

impl TableReader for FileReader {
    fn partitions(&self, path: &Path) -> Result<Vec<String>, LoadError> {
        self.pick(path)?.partitions(path)
    }

    fn read(&self, path: &Path, partition: Option<&str>) -> Result<RawTable, LoadError> {
        self.pick(path)?.read(path, partition)
    }
}
