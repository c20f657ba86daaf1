//! Input module: the company list for the email workflow
//!
//! Reads a CSV table, keeps every column so the output can echo the input
//! rows, and locates the company-name column by header.

use crate::ScoutError;
use csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use std::path::Path;

/// Company rows read from a CSV file
#[derive(Debug, Clone)]
pub struct CompanyTable {
    headers: StringRecord,
    rows: Vec<StringRecord>,
    name_column: usize,
}

impl CompanyTable {
    /// Reads a company table from a CSV file
    ///
    /// # Arguments
    ///
    /// * `path` - CSV file with a header row
    /// * `column` - Header of the company-name column, matched exactly
    /// * `max_rows` - Keep at most this many rows; 0 keeps all
    ///
    /// # Returns
    ///
    /// * `Ok(CompanyTable)` - The (possibly truncated) table
    /// * `Err(ScoutError::MissingColumn)` - No header matches `column`
    /// * `Err(ScoutError)` - The file could not be read or parsed
    pub fn from_path(path: &Path, column: &str, max_rows: usize) -> Result<Self, ScoutError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, column, max_rows)
    }

    /// Reads a company table from any CSV source
    pub fn from_reader<R: Read>(reader: R, column: &str, max_rows: usize) -> Result<Self, ScoutError> {
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers = reader.headers()?.clone();
        let name_column = headers
            .iter()
            .position(|header| header == column)
            .ok_or_else(|| ScoutError::MissingColumn {
                column: column.to_string(),
            })?;

        let mut rows = Vec::new();
        for record in reader.records() {
            if max_rows > 0 && rows.len() >= max_rows {
                break;
            }
            rows.push(record?);
        }

        tracing::debug!("Loaded {} company row(s)", rows.len());

        Ok(Self {
            headers,
            rows,
            name_column,
        })
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Company name of each row, trimmed; short rows yield `""`
    pub fn company_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(self.name_column).unwrap_or("").trim())
    }
}
