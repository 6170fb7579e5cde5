//! `geocat check` — load both feeds, reconcile, report.

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;

use geocat_cli::detail::{self, Detail};
use geocat_cli::exit_codes::{EXIT_CHECK_DISCREPANCY, EXIT_INVALID_CONFIG, EXIT_SOURCE};
use geocat_cli::fetch;
use geocat_config::Settings;
use geocat_io::{Catalog, RegionsConfig, SourceError};
use geocat_recon::ReconReport;

use crate::render;
use crate::CliError;

#[derive(Args)]
pub struct CheckArgs {
    /// Workbook or CSV to read (overrides settings and env)
    #[arg(long)]
    excel: Option<PathBuf>,

    /// Download the workbook from this URL first
    #[arg(long, conflicts_with = "excel")]
    url: Option<String>,

    /// Region config (.toml) listing provinces per region
    #[arg(long)]
    regions: Option<PathBuf>,

    /// Sheet name for multi-sheet workbooks
    #[arg(long)]
    sheet: Option<String>,

    /// Output JSON to stdout
    #[arg(long)]
    json: bool,

    /// Write JSON output to file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Also list the provinces/municipalities behind each flag
    #[arg(long)]
    detail: bool,

    /// Exit 3 when a discrepancy is flagged
    #[arg(long)]
    strict: bool,

    /// Suppress the human summary
    #[arg(long, short = 'q')]
    quiet: bool,
}

#[derive(Serialize)]
struct CheckMeta {
    engine_version: &'static str,
    run_at: String,
    excel_source: String,
    regions_source: String,
}

#[derive(Serialize)]
struct CheckOutput<'a> {
    meta: CheckMeta,
    report: &'a ReconReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<&'a Detail>,
}

/// Map a loading error to the exit code of its kind.
pub fn source_err(err: &SourceError) -> CliError {
    match err {
        SourceError::RegionsParse(_) | SourceError::RegionsInvalid(_) => {
            CliError::new(EXIT_INVALID_CONFIG, err.to_string())
        }
        SourceError::MissingColumn { .. } => CliError::new(EXIT_SOURCE, err.to_string())
            .with_hint("set source.province_column / source.municipality_column or source.header_row"),
        _ => CliError::new(EXIT_SOURCE, err.to_string()),
    }
}

pub fn cmd_check(args: CheckArgs, mut settings: Settings) -> Result<(), CliError> {
    // Flags win over settings file and environment
    if let Some(path) = args.excel {
        settings.source.excel_path = Some(path);
        settings.source.excel_url = None;
    }
    if let Some(url) = args.url {
        settings.source.excel_url = Some(url);
    }
    if let Some(path) = args.regions {
        settings.regions.path = Some(path);
    }
    if let Some(sheet) = args.sheet {
        settings.source.sheet = Some(sheet);
    }

    let (workbook, excel_source) = resolve_workbook(&settings)?;
    let regions_path = settings.regions.path.clone().ok_or_else(|| {
        CliError::usage("no region config given")
            .with_hint("pass --regions, or set GEOCAT_REGIONS_FILE / regions.path")
    })?;

    let rows = geocat_io::load_rows(&workbook, &settings.column_mapping())
        .map_err(|e| source_err(&e))?;
    log::debug!("loaded {} row(s) from {}", rows.len(), workbook.display());

    let regions = RegionsConfig::load(&regions_path).map_err(|e| source_err(&e))?;
    let catalog = Catalog::new(rows).with_regions(regions);

    let report = geocat_recon::build_report(&catalog)
        .map_err(|e| CliError::new(EXIT_SOURCE, e.to_string()))?;

    let detail = args.detail.then(|| detail::compute(&report));

    if args.json || args.output.is_some() {
        let out = CheckOutput {
            meta: CheckMeta {
                engine_version: env!("CARGO_PKG_VERSION"),
                run_at: chrono::Utc::now().to_rfc3339(),
                excel_source,
                regions_source: regions_path.display().to_string(),
            },
            report: &report,
            detail: detail.as_ref(),
        };
        let json_str = serde_json::to_string_pretty(&out)
            .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;

        if let Some(ref path) = args.output {
            std::fs::write(path, &json_str)
                .map_err(|e| CliError::io(format!("cannot write output: {e}")))?;
            eprintln!("wrote {}", path.display());
        }
        if args.json {
            println!("{json_str}");
        }
    }

    if !args.quiet {
        render::print_summary(&report, detail.as_ref());
    }

    if args.strict && !report.is_consistent() {
        return Err(CliError::new(EXIT_CHECK_DISCREPANCY, "discrepancies found"));
    }

    Ok(())
}

/// Local path to read, downloading first when a URL is configured.
/// Returns the path and a label for the output metadata.
fn resolve_workbook(settings: &Settings) -> Result<(PathBuf, String), CliError> {
    if let Some(ref url) = settings.source.excel_url {
        let dest: &Path = &settings.source.download_path;
        let bytes = fetch::download(url, dest)?;
        log::info!("downloaded {} byte(s) to {}", bytes, dest.display());
        return Ok((dest.to_path_buf(), url.clone()));
    }

    match settings.source.excel_path {
        Some(ref path) => Ok((path.clone(), path.display().to_string())),
        None => Err(CliError::usage("no workbook given")
            .with_hint("pass --excel or --url, or set GEOCAT_EXCEL_FILE / GEOCAT_EXCEL_URL")),
    }
}
