//! Flat delimited files read through `arrow-csv`.
//!
//! Every column is read as text; the header only supplies names. Short rows
//! are padded with absent cells rather than rejected.

use arrow_array::cast::AsArray;
use arrow_array::Array;
use arrow_csv::reader::Format;
use arrow_csv::ReaderBuilder;
use arrow_schema::{DataType, Field, Schema};
use keyscout_core::table::{RawTable, TableReader};
use keyscout_core::LoadError;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

const BATCH_SIZE: usize = 8192;

#[derive(Debug, Clone, Copy)]
pub struct CsvReader {
    delimiter: u8,
}

impl Default for CsvReader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvReader {
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    fn header(&self, path: &Path) -> Result<Schema, LoadError> {
        let file = open(path)?;
        let (inferred, _) = Format::default()
            .with_header(true)
            .with_delimiter(self.delimiter)
            .with_truncated_rows(true)
            .infer_schema(BufReader::new(file), Some(1))
            .map_err(|e| LoadError::unreadable(path, e))?;

        Ok(Schema::new(
            inferred
                .fields()
                .iter()
                .map(|f| Field::new(f.name(), DataType::Utf8, true))
                .collect::<Vec<_>>(),
        ))
    }
}

/// The single synthetic partition of a flat file: its base name up to the
/// first `.`.
pub fn partition_name(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    name.split('.').next().map(str::to_string)
}

impl TableReader for CsvReader {
    fn partitions(&self, path: &Path) -> Result<Vec<String>, LoadError> {
        partition_name(path)
            .map(|name| vec![name])
            .ok_or_else(|| LoadError::unreadable(path, "file name is not valid UTF-8"))
    }

    fn read(&self, path: &Path, _partition: Option<&str>) -> Result<RawTable, LoadError> {
        let schema = Arc::new(self.header(path)?);
        let headers = schema.fields().iter().map(|f| f.name().clone()).collect();

        let reader = ReaderBuilder::new(schema)
            .with_header(true)
            .with_delimiter(self.delimiter)
            .with_truncated_rows(true)
            .with_batch_size(BATCH_SIZE)
            .build(open(path)?)
            .map_err(|e| LoadError::unreadable(path, e))?;

        let mut rows = Vec::new();
        for batch in reader {
            let batch = batch.map_err(|e| LoadError::unreadable(path, e))?;
            let columns = batch
                .columns()
                .iter()
                .map(|c| c.as_string_opt::<i32>())
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| LoadError::unreadable(path, "non-text column in CSV batch"))?;
            for i in 0..batch.num_rows() {
                rows.push(
                    columns
                        .iter()
                        .map(|col| (!col.is_null(i)).then(|| col.value(i).to_string()))
                        .collect(),
                );
            }
        }

        tracing::debug!(path = %path.display(), rows = rows.len(), "csv read");
        Ok(RawTable::new(headers, rows))
    }
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|e| LoadError::unreadable(path, e))
}
