//! Export — write a keyword selection back to a flat CSV file.
//!
//! Selected keywords are matched against dataset rows in both their raw and
//! normalized forms, so callers may pass either the display keyword or the
//! annotated original. Matching rows are written in dataset order (not
//! selection order) under the legacy `KW,Volumn,KD` header, keywords
//! normalized.

use crate::error::{Error, Result};
use crate::normalizer::normalize;
use crate::table::LEGACY_HEADERS;
use crate::types::{Dataset, KeywordRecord};
use arrow_array::{ArrayRef, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

/// Default file name stem of an export.
pub const DEFAULT_FILE_STEM: &str = "selected_keywords";

/// A finished export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Export {
    /// Suggested download name, `<stem>_<sheet>.csv` or `<stem>.csv`.
    pub filename: String,
    /// Number of data rows written.
    pub rows: usize,
    #[serde(skip)]
    pub content: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ExportAssembler {
    file_stem: String,
}

impl Default for ExportAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_STEM)
    }
}

impl ExportAssembler {
    pub fn new(file_stem: impl Into<String>) -> Self {
        Self {
            file_stem: file_stem.into(),
        }
    }

    pub fn export<S: AsRef<str>>(
        &self,
        dataset: &Dataset,
        selected: &[S],
        sheet: Option<&str>,
    ) -> Result<Export> {
        if selected.is_empty() {
            return Err(Error::validation("no keywords selected"));
        }

        let candidates: HashSet<&str> = selected
            .iter()
            .flat_map(|k| [k.as_ref(), normalize(k.as_ref())])
            .collect();
        let rows: Vec<&KeywordRecord> = dataset
            .records()
            .iter()
            .filter(|r| candidates.contains(r.keyword.as_str()))
            .collect();

        let content = write_csv(&rows)?;
        tracing::info!(selected = selected.len(), rows = rows.len(), "export assembled");

        Ok(Export {
            filename: self.filename(sheet),
            rows: rows.len(),
            content,
        })
    }

    pub fn filename(&self, sheet: Option<&str>) -> String {
        match sheet {
            Some(sheet) => format!("{}_{sheet}.csv", self.file_stem),
            None => format!("{}.csv", self.file_stem),
        }
    }
}

fn write_csv(rows: &[&KeywordRecord]) -> Result<Vec<u8>> {
    let schema = Arc::new(Schema::new(
        LEGACY_HEADERS
            .iter()
            .map(|name| Field::new(*name, DataType::Utf8, false))
            .collect::<Vec<_>>(),
    ));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| normalize(&r.keyword)))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.volume.as_str()))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.value.as_str()))),
    ];
    let batch = RecordBatch::try_new(schema, columns).map_err(|e| Error::Export(e.to_string()))?;

    let mut writer = arrow_csv::WriterBuilder::new()
        .with_header(true)
        .build(Vec::new());
    writer
        .write(&batch)
        .map_err(|e| Error::Export(e.to_string()))?;
    Ok(writer.into_inner())
}
