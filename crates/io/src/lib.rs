//! Catalog loading: primary-feed rows from Excel or CSV, the reference
//! region list, and the in-memory [`Catalog`] the engine reconciles.

pub mod catalog;
pub mod csv;
pub mod error;
pub mod regions;
pub mod row;
pub mod xlsx;

use std::path::Path;

pub use catalog::Catalog;
pub use error::SourceError;
pub use regions::{Region, RegionsConfig};
pub use row::{CatalogRow, ColumnMapping};

/// Load catalog rows, picking the reader from the file extension.
pub fn load_rows(path: &Path, mapping: &ColumnMapping) -> Result<Vec<CatalogRow>, SourceError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => xlsx::load_rows(path, mapping),
        "csv" | "tsv" | "txt" => csv::load_rows(path, mapping),
        other => Err(SourceError::UnsupportedFormat(other.to_string())),
    }
}
