use std::fmt;

#[derive(Debug)]
pub enum SourceError {
    /// Workbook could not be opened or decoded.
    Open { path: String, message: String },
    /// Workbook has no sheets.
    NoSheets,
    /// Requested sheet does not exist.
    SheetNotFound(String),
    /// Header row lacks a mapped column.
    MissingColumn { column: String, header_row: usize },
    /// Row has a municipality but no province.
    MissingProvince { row: usize },
    /// CSV decode error.
    Csv(String),
    /// Region config TOML parse / deserialization error.
    RegionsParse(String),
    /// Region config parsed but is unusable (no regions, duplicate names, etc.).
    RegionsInvalid(String),
    /// Region listing requested but no region config is attached.
    NoRegions,
    /// File extension not recognized as a spreadsheet or CSV.
    UnsupportedFormat(String),
    /// IO error (file read, etc.).
    Io(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, message } => write!(f, "cannot open {path}: {message}"),
            Self::NoSheets => write!(f, "workbook contains no sheets"),
            Self::SheetNotFound(name) => write!(f, "sheet not found: '{name}'"),
            Self::MissingColumn { column, header_row } => {
                write!(f, "missing column '{column}' in header row {}", header_row + 1)
            }
            Self::MissingProvince { row } => write!(f, "row {row}: municipality without a province"),
            Self::Csv(msg) => write!(f, "CSV error: {msg}"),
            Self::RegionsParse(msg) => write!(f, "region config parse error: {msg}"),
            Self::RegionsInvalid(msg) => write!(f, "region config invalid: {msg}"),
            Self::NoRegions => write!(f, "no region config loaded"),
            Self::UnsupportedFormat(ext) => write!(f, "unsupported file format: '{ext}'"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {}
