//! Spreadsheet workbooks (`.xlsx`, `.xls`, `.xlsm`) read through `calamine`.
//!
//! Each worksheet is a partition. The first row of the used range is the
//! header; every cell is rendered as text and empty cells are absent.

use calamine::{open_workbook_auto, Data, Reader};
use keyscout_core::table::{RawTable, TableReader};
use keyscout_core::LoadError;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetReader;

impl TableReader for SpreadsheetReader {
    fn partitions(&self, path: &Path) -> Result<Vec<String>, LoadError> {
        let workbook = open_workbook_auto(path).map_err(|e| LoadError::unreadable(path, e))?;
        Ok(workbook.sheet_names())
    }

    fn read(&self, path: &Path, partition: Option<&str>) -> Result<RawTable, LoadError> {
        let mut workbook = open_workbook_auto(path).map_err(|e| LoadError::unreadable(path, e))?;
        let sheet = match partition {
            Some(name) => name.to_string(),
            None => workbook
                .sheet_names()
                .into_iter()
                .next()
                .ok_or_else(|| LoadError::unreadable(path, "workbook has no sheets"))?,
        };
        if !workbook.sheet_names().contains(&sheet) {
            return Err(LoadError::MissingPartition {
                path: path.to_path_buf(),
                partition: sheet,
            });
        }

        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|e| LoadError::unreadable(path, e))?;
        let mut rows = range.rows();
        let headers = rows
            .next()
            .map(|row| row.iter().map(cell_text).collect())
            .unwrap_or_default();
        let rows: Vec<Vec<Option<String>>> = rows
            .map(|row| row.iter().map(cell).collect())
            .collect();

        tracing::debug!(
            path = %path.display(),
            sheet = %sheet,
            rows = rows.len(),
            "worksheet read"
        );
        Ok(RawTable::new(headers, rows))
    }
}

fn cell(data: &Data) -> Option<String> {
    match data {
        Data::Empty => None,
        other => Some(cell_text(other)),
    }
}

fn cell_text(data: &Data) -> String {
    match data {
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}
