// geocat CLI - reconcile a province/municipality workbook against a region config

mod check;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use geocat_cli::exit_codes::{
    EXIT_ERROR, EXIT_FETCH, EXIT_INVALID_CONFIG, EXIT_SUCCESS, EXIT_USAGE,
};
use geocat_cli::{fetch, logging};
use geocat_config::Settings;
use geocat_io::RegionsConfig;

#[derive(Parser)]
#[command(name = "geocat")]
#[command(about = "Reconcile province/municipality catalogs from a spreadsheet and a region config")]
#[command(version)]
struct Cli {
    /// Settings file (default: <config dir>/geocat/settings.toml)
    #[arg(long, global = true, env = "GEOCAT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare the workbook's provinces/municipalities with the region config
    #[command(after_help = "\
Examples:
  geocat check --excel data/day1.xlsx --regions regions.toml
  geocat check --url https://example.org/10day.xlsx --regions regions.toml --json
  geocat check --detail --strict")]
    Check(check::CheckArgs),

    /// Download the configured workbook without checking it
    #[command(after_help = "\
Examples:
  geocat fetch https://example.org/10day.xlsx
  geocat fetch https://example.org/10day.xlsx -o data/day1.xlsx")]
    Fetch {
        /// Workbook URL (default: source.excel_url from settings/env)
        url: Option<String>,

        /// Destination file (default: source.download_path)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Region config commands
    #[command(subcommand)]
    Regions(RegionsCommands),
}

#[derive(Subcommand)]
enum RegionsCommands {
    /// Parse and validate a region config without running a check
    Validate {
        /// Path to the region config (.toml)
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = load_settings(cli.config.as_deref()).and_then(|settings| {
        logging::init(&settings.log.filter);
        match cli.command {
            Commands::Check(args) => check::cmd_check(args, settings),
            Commands::Fetch { url, output } => cmd_fetch(url, output, &settings),
            Commands::Regions(RegionsCommands::Validate { file }) => cmd_regions_validate(file),
        }
    });

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn usage(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::new(EXIT_ERROR, msg)
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<fetch::FetchError> for CliError {
    fn from(err: fetch::FetchError) -> Self {
        Self::new(EXIT_FETCH, err.to_string())
    }
}

/// Settings file (explicit or default location), then `.env` / environment.
fn load_settings(path: Option<&std::path::Path>) -> Result<Settings, CliError> {
    let mut settings = match path {
        Some(p) => Settings::load_from(p),
        None => Settings::load(),
    }
    .map_err(|e| CliError::new(EXIT_INVALID_CONFIG, e.to_string()))?;

    settings
        .apply_env()
        .map_err(|e| CliError::new(EXIT_INVALID_CONFIG, e.to_string()))?;
    Ok(settings)
}

// ============================================================================
// fetch
// ============================================================================

fn cmd_fetch(url: Option<String>, output: Option<PathBuf>, settings: &Settings) -> Result<(), CliError> {
    let url = url.or_else(|| settings.source.excel_url.clone()).ok_or_else(|| {
        CliError::usage("no workbook URL given")
            .with_hint("pass a URL, or set GEOCAT_EXCEL_URL / source.excel_url")
    })?;
    let dest = output.unwrap_or_else(|| settings.source.download_path.clone());

    let bytes = fetch::download(&url, &dest)?;
    eprintln!("wrote {} ({} bytes)", dest.display(), bytes);
    Ok(())
}

// ============================================================================
// regions validate
// ============================================================================

fn cmd_regions_validate(file: PathBuf) -> Result<(), CliError> {
    let config = RegionsConfig::load(&file).map_err(|e| check::source_err(&e))?;
    eprintln!(
        "valid: {} region(s), {} distinct province(s)",
        config.regions.len(),
        config.province_count(),
    );
    Ok(())
}
