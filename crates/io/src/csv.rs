// CSV/TSV import

use std::io::Read;
use std::path::Path;

use crate::row::{rows_from_grid, CatalogRow, ColumnMapping};
use crate::SourceError;

pub fn load_rows(path: &Path, mapping: &ColumnMapping) -> Result<Vec<CatalogRow>, SourceError> {
    let content = read_file_as_utf8(path)?;
    rows_from_str(&content, mapping)
}

/// Parse catalog rows from CSV text, sniffing the delimiter from the header row.
pub fn rows_from_str(content: &str, mapping: &ColumnMapping) -> Result<Vec<CatalogRow>, SourceError> {
    let delimiter = sniff_delimiter(content, mapping);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut grid = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| SourceError::Csv(format!("line {}: {}", row_idx + 1, e)))?;
        grid.push(record.iter().map(str::to_string).collect());
    }

    rows_from_grid(grid, mapping)
}

const DELIMITERS: [u8; 4] = [b'\t', b';', b',', b'|'];

/// Pick the delimiter that splits the header row into fields naming both
/// mapped columns. Failing that, the one giving the most header fields;
/// comma when nothing splits.
fn sniff_delimiter(content: &str, mapping: &ColumnMapping) -> u8 {
    let header = content.lines().nth(mapping.header_row).unwrap_or_default();
    let fields = |delim: u8| -> Vec<String> {
        csv::ReaderBuilder::new()
            .delimiter(delim)
            .has_headers(false)
            .flexible(true)
            .from_reader(header.as_bytes())
            .records()
            .next()
            .and_then(Result::ok)
            .map(|r| r.iter().map(|f| f.trim().to_ascii_lowercase()).collect())
            .unwrap_or_default()
    };
    let wanted = [
        mapping.province.trim().to_ascii_lowercase(),
        mapping.municipality.trim().to_ascii_lowercase(),
    ];

    let names_both = DELIMITERS.iter().copied().find(|&d| {
        let found = fields(d);
        wanted.iter().all(|w| found.contains(w))
    });

    names_both
        .or_else(|| {
            // rev: earlier candidates win ties
            DELIMITERS
                .iter()
                .rev()
                .map(|&d| (d, fields(d).len()))
                .filter(|&(_, n)| n > 1)
                .max_by_key(|&(_, n)| n)
                .map(|(d, _)| d)
        })
        .unwrap_or(b',')
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, SourceError> {
    let mut file = std::fs::File::open(path)
        .map_err(|e| SourceError::Io(format!("{}: {}", path.display(), e)))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| SourceError::Io(format!("{}: {}", path.display(), e)))?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(s)),
        Err(e) => {
            let bytes = e.into_bytes();
            // Fall back to Windows-1252 (common for Excel-exported CSVs)
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}
