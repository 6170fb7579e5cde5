// Application settings
// Loaded from ~/.config/geocat/settings.toml, then overridden from ./.env and the environment

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use geocat_io::ColumnMapping;
use serde::{Deserialize, Serialize};

/// Environment variables consulted by [`Settings::apply_env`].
pub const ENV_EXCEL_FILE: &str = "GEOCAT_EXCEL_FILE";
pub const ENV_EXCEL_URL: &str = "GEOCAT_EXCEL_URL";
/// Older deployments set this name for the download URL.
pub const ENV_EXCEL_URL_LEGACY: &str = "EXCEL_FILE_URL";
pub const ENV_SHEET: &str = "GEOCAT_SHEET";
pub const ENV_REGIONS_FILE: &str = "GEOCAT_REGIONS_FILE";
pub const ENV_LOG: &str = "GEOCAT_LOG";

/// Dotenv file read from the working directory only.
pub const DOTENV_FILE: &str = ".env";

#[derive(Debug)]
pub enum ConfigError {
    /// Settings file could not be read.
    Read { path: PathBuf, message: String },
    /// TOML parse / deserialization error.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, message } => write!(f, "cannot read {}: {message}", path.display()),
            Self::Parse(msg) => write!(f, "settings parse error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Where the primary (spreadsheet) feed comes from and how to read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Local workbook or CSV. Used when no URL is set.
    pub excel_path: Option<PathBuf>,

    /// Remote workbook. When set, it is downloaded to `download_path` first.
    pub excel_url: Option<String>,

    /// Download destination, relative to the working directory.
    pub download_path: PathBuf,

    /// Sheet to read (None = first sheet)
    pub sheet: Option<String>,

    /// 0-based header row index
    pub header_row: usize,

    pub province_column: String,
    pub municipality_column: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            excel_path: None,
            excel_url: None,
            download_path: PathBuf::from("datasource.xlsx"),
            sheet: None,
            header_row: 0,
            province_column: "province".into(),
            municipality_column: "municipality".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionSettings {
    /// Region config (TOML) listing provinces per region.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Filter directive, e.g. "info" or "geocat_recon=debug". RUST_LOG wins over this.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub source: SourceSettings,
    pub regions: RegionSettings,
    pub log: LogSettings,
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("geocat")
            .join("settings.toml")
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load settings from an explicit file; a missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&contents)
    }

    /// Load settings from the default location, falling back to defaults if absent
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Apply overrides from `./.env` (if present) and the process environment.
    /// Process variables win over `.env` entries.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        let dir = std::env::current_dir().map_err(|e| ConfigError::Read {
            path: PathBuf::from("."),
            message: e.to_string(),
        })?;
        self.apply_env_in(&dir)
    }

    /// Same as [`Settings::apply_env`] with `.env` taken from `dir`.
    /// Parent directories are never searched.
    pub fn apply_env_in(&mut self, dir: &Path) -> Result<(), ConfigError> {
        self.apply_dotenv_under(dir, |key| std::env::var(key).ok())
    }

    fn apply_dotenv_under<F>(&mut self, dir: &Path, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let dotenv = read_dotenv(&dir.join(DOTENV_FILE))?;
        self.apply_env_with(|key| lookup(key).or_else(|| dotenv.get(key).cloned()));
        Ok(())
    }

    /// Apply overrides from an arbitrary lookup. Empty values are ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = get(ENV_EXCEL_FILE) {
            self.source.excel_path = Some(PathBuf::from(path));
        }
        if let Some(url) = get(ENV_EXCEL_URL).or_else(|| get(ENV_EXCEL_URL_LEGACY)) {
            self.source.excel_url = Some(url);
        }
        if let Some(sheet) = get(ENV_SHEET) {
            self.source.sheet = Some(sheet);
        }
        if let Some(path) = get(ENV_REGIONS_FILE) {
            self.regions.path = Some(PathBuf::from(path));
        }
        if let Some(filter) = get(ENV_LOG) {
            self.log.filter = filter;
        }
    }

    /// Column mapping for the row loaders.
    pub fn column_mapping(&self) -> ColumnMapping {
        ColumnMapping {
            province: self.source.province_column.clone(),
            municipality: self.source.municipality_column.clone(),
            header_row: self.source.header_row,
            sheet: self.source.sheet.clone(),
        }
    }
}

/// Entries of a dotenv file; a missing file reads as empty.
/// The process environment is left untouched.
fn read_dotenv(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let read_err = |e: dotenvy::Error| ConfigError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let entries = match dotenvy::from_path_iter(path) {
        Ok(entries) => entries,
        Err(e) if e.not_found() => return Ok(HashMap::new()),
        Err(e) => return Err(read_err(e)),
    };
    entries.map(|entry| entry.map_err(read_err)).collect()
}
