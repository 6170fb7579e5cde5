//! Human-readable summary on stderr.

use std::io::IsTerminal;

use crossterm::style::Stylize;
use geocat_recon::ReconReport;

use geocat_cli::detail::Detail;

/// Applies colors only when stderr is a terminal and NO_COLOR is unset.
struct Paint {
    enabled: bool,
}

impl Paint {
    fn detect() -> Self {
        Self {
            enabled: std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
        }
    }

    fn info(&self, s: String) -> String {
        if self.enabled { s.cyan().to_string() } else { s }
    }

    fn ok(&self, s: String) -> String {
        if self.enabled { s.green().to_string() } else { s }
    }

    fn warn(&self, s: String) -> String {
        if self.enabled { s.yellow().bold().to_string() } else { s }
    }
}

pub fn print_summary(report: &ReconReport, detail: Option<&Detail>) {
    let paint = Paint::detect();
    let excel = report.excel();
    let config = report.config();

    eprintln!(
        "{}",
        paint.info(format!(
            "[INFO]: parsed municipalities from config: {}",
            config.count_municipalities()
        ))
    );
    eprintln!(
        "{}",
        paint.info(format!(
            "        loaded municipalities from excel: {}",
            excel.count_municipalities()
        ))
    );
    eprintln!(
        "provinces: {} in excel, {} in config",
        excel.provinces.len(),
        config.provinces.len()
    );

    if report.has_missing_in_config() {
        eprintln!(
            "{}",
            paint.warn(format!(
                "[WARN]: missing in config: excel has {} more municipalit{}",
                report.municipality_delta(),
                if report.municipality_delta() == 1 { "y" } else { "ies" }
            ))
        );
    }
    if report.has_missing_in_excel() {
        eprintln!(
            "{}",
            paint.warn(format!(
                "[WARN]: missing in excel: config has {} more province{}",
                report.province_delta(),
                if report.province_delta() == 1 { "" } else { "s" }
            ))
        );
    }
    if report.is_consistent() {
        eprintln!("{}", paint.ok("[OK]: no discrepancies".to_string()));
    }

    if let Some(detail) = detail {
        print_list(&paint, "provinces only in config", &detail.provinces_only_in_config);
        print_list(&paint, "provinces only in excel", &detail.provinces_only_in_excel);
        for (province, missing) in &detail.municipalities_missing_in_config {
            print_list(&paint, &format!("{province}: municipalities not in config"), missing);
        }
    }
}

fn print_list(paint: &Paint, label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    eprintln!("{}", paint.warn(format!("{label} ({}):", items.len())));
    for item in items {
        eprintln!("  - {item}");
    }
}
