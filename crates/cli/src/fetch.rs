//! Workbook download for URL-configured sources.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const USER_AGENT: &str = concat!("geocat/", env!("CARGO_PKG_VERSION"));

const TIMEOUT_SECS: u64 = 60;

#[derive(Debug)]
pub enum FetchError {
    /// HTTP client could not be built.
    Client(String),
    /// Request failed before a response arrived (DNS, connect, timeout).
    Request { url: String, message: String },
    /// Server answered with a non-success status.
    Status { url: String, status: u16 },
    /// Body could not be read or written to disk.
    Write { path: PathBuf, message: String },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Client(msg) => write!(f, "cannot build HTTP client: {msg}"),
            Self::Request { url, message } => write!(f, "request to {url} failed: {message}"),
            Self::Status { url, status } => write!(f, "download of {url} failed: HTTP {status}"),
            Self::Write { path, message } => write!(f, "cannot write {}: {message}", path.display()),
        }
    }
}

impl std::error::Error for FetchError {}

/// Download `url` to `dest`, creating parent directories. Returns bytes written.
pub fn download(url: &str, dest: &Path) -> Result<u64, FetchError> {
    let http = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| FetchError::Client(e.to_string()))?;

    log::info!("downloading {url}");
    let resp = http.get(url).send().map_err(|e| FetchError::Request {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let write_err = |message: String| FetchError::Write {
        path: dest.to_path_buf(),
        message,
    };

    let body = resp.bytes().map_err(|e| write_err(e.to_string()))?;

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
    }
    std::fs::write(dest, &body).map_err(|e| write_err(e.to_string()))?;

    log::debug!("wrote {} byte(s) to {}", body.len(), dest.display());
    Ok(body.len() as u64)
}
