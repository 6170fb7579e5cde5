// Configuration loading

pub mod settings;

pub use settings::{ConfigError, LogSettings, RegionSettings, Settings, SourceSettings};
