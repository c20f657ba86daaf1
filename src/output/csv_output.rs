//! CSV output for both workflows
//!
//! Writers take any `io::Write` so tests can write to memory; the `save_*`
//! wrappers create the file and report failures as `ScoutError::OutputWrite`.

use crate::input::CompanyTable;
use crate::registry::{CompanyRecord, PREFERRED_COLUMNS};
use crate::workflow::CompanyContact;
use crate::ScoutError;
use csv::Writer;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

/// Output column holding the resolved website domain
pub const DOMAIN_COLUMN: &str = "company_domain";

/// Output column holding the `"; "`-joined email candidates
pub const EMAIL_COLUMN: &str = "company_email";

/// Writes the input table with the domain and email columns appended
///
/// `contacts` is aligned with the table rows; rows without a contact get
/// empty columns.
pub fn write_email_table<W: Write>(
    writer: W,
    table: &CompanyTable,
    contacts: &[CompanyContact],
) -> Result<(), ScoutError> {
    let mut csv = Writer::from_writer(writer);

    let mut header: Vec<&str> = table.headers().iter().collect();
    header.push(DOMAIN_COLUMN);
    header.push(EMAIL_COLUMN);
    csv.write_record(&header)?;

    let width = table.headers().len();
    for (index, row) in table.rows().iter().enumerate() {
        let mut fields: Vec<String> = (0..width)
            .map(|i| row.get(i).unwrap_or("").to_string())
            .collect();

        match contacts.get(index) {
            Some(contact) => {
                fields.push(contact.domain.clone());
                fields.push(contact.email_column());
            }
            None => {
                fields.push(String::new());
                fields.push(String::new());
            }
        }
        csv.write_record(&fields)?;
    }

    csv.flush()?;
    Ok(())
}

/// Writes the enriched email table to `path`
pub fn save_email_table(
    path: &Path,
    table: &CompanyTable,
    contacts: &[CompanyContact],
) -> Result<(), ScoutError> {
    let file = std::fs::File::create(path).map_err(|e| output_error(path, e))?;
    write_email_table(file, table, contacts).map_err(|e| output_error(path, e))
}

/// Column order for a set of registry records
///
/// Preferred columns first, then every other field name across all records
/// in sorted order.
pub fn registry_columns(records: &[CompanyRecord]) -> Vec<String> {
    let extras: BTreeSet<&str> = records
        .iter()
        .flat_map(|record| record.extra.keys().map(String::as_str))
        .filter(|name| !PREFERRED_COLUMNS.contains(name))
        .collect();

    PREFERRED_COLUMNS
        .iter()
        .copied()
        .chain(extras)
        .map(str::to_string)
        .collect()
}

/// Writes registry records, one row each
pub fn write_registry_records<W: Write>(writer: W, records: &[CompanyRecord]) -> Result<(), ScoutError> {
    let mut csv = Writer::from_writer(writer);
    let columns = registry_columns(records);
    csv.write_record(&columns)?;

    for record in records {
        let row: Vec<&str> = columns
            .iter()
            .map(|column| record.get(column).unwrap_or(""))
            .collect();
        csv.write_record(&row)?;
    }

    csv.flush()?;
    Ok(())
}

/// Writes registry records to `path`
pub fn save_registry_records(path: &Path, records: &[CompanyRecord]) -> Result<(), ScoutError> {
    let file = std::fs::File::create(path).map_err(|e| output_error(path, e))?;
    write_registry_records(file, records).map_err(|e| output_error(path, e))
}

fn output_error(path: &Path, error: impl std::fmt::Display) -> ScoutError {
    ScoutError::OutputWrite {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}
