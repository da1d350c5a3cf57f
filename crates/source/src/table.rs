use crate::SourceError;
use std::path::Path;

/// An in-memory CSV table with normalized column names.
///
/// Every cell is kept as a string; typing decisions belong to the
/// normalization step, not the reader.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Reads a CSV file, decoding as UTF-8 and falling back to
    /// Latin-1 when the bytes are not valid UTF-8. Column names are
    /// normalized with [`norm_col`](crate::norm_col) on the way in.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let bytes = std::fs::read(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => {
                log::debug!("{} is not UTF-8, decoding as Latin-1", path.display());
                err.into_bytes().iter().map(|&b| b as char).collect()
            }
        };
        Self::from_csv_str(&text)
    }

    pub fn from_csv_str(text: &str) -> Result<Self, SourceError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(crate::norm_col)
            .collect();
        if columns.is_empty() {
            return Err(SourceError::MissingHeader);
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut row: Vec<String> =
                record.iter().map(|cell| cell.to_string()).collect();
            // Ragged rows are padded so every lookup by column index
            // is in bounds.
            row.resize(columns.len(), String::new());
            rows.push(row);
        }
        Ok(Self { columns, rows })
    }

    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}
