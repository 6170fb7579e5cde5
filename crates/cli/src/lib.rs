//! Library half of the `geocat` binary: pieces that are tested directly.

pub mod detail;
pub mod exit_codes;
pub mod fetch;
pub mod logging;
