//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! | Code | Description                                                  |
//! |------|--------------------------------------------------------------|
//! | 0    | Success                                                      |
//! | 1    | General error (unspecified)                                  |
//! | 2    | CLI usage error (bad args, no workbook or region config set) |
//! | 3    | `check --strict` found discrepancies                         |
//! | 4    | Source data unavailable or malformed                         |
//! | 5    | Workbook download failed                                     |
//! | 6    | Invalid settings or region config                            |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required inputs.
pub const EXIT_USAGE: u8 = 2;

/// Discrepancies found and `--strict` was given.
pub const EXIT_CHECK_DISCREPANCY: u8 = 3;

/// Rows, groupings or regions could not be produced.
pub const EXIT_SOURCE: u8 = 4;

/// Download failed (network error, non-2xx status, cannot write file).
pub const EXIT_FETCH: u8 = 5;

/// Settings file or region config failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 6;
