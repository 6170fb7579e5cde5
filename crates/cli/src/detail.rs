//! Element-wise differences between the two snapshots of a report.
//!
//! The report itself only carries coarse flags; callers that want the
//! actual names compute them here from the returned groupings.

use indexmap::IndexMap;
use serde::Serialize;

use geocat_recon::ReconReport;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Detail {
    /// Provinces named by the region config that never appear in the rows.
    pub provinces_only_in_config: Vec<String>,
    /// Provinces in the rows that no region lists.
    pub provinces_only_in_excel: Vec<String>,
    /// Per excel province, municipalities the config grouping does not hold.
    pub municipalities_missing_in_config: IndexMap<String, Vec<String>>,
}

impl Detail {
    pub fn is_empty(&self) -> bool {
        self.provinces_only_in_config.is_empty()
            && self.provinces_only_in_excel.is_empty()
            && self.municipalities_missing_in_config.is_empty()
    }
}

pub fn compute(report: &ReconReport) -> Detail {
    let excel = report.excel();
    let config = report.config();

    let provinces_only_in_config = config
        .provinces
        .iter()
        .filter(|p| !excel.provinces.contains(p))
        .map(str::to_string)
        .collect();

    let provinces_only_in_excel = excel
        .provinces
        .iter()
        .filter(|p| !config.provinces.contains(p))
        .map(str::to_string)
        .collect();

    let mut municipalities_missing_in_config = IndexMap::new();
    for (province, municipalities) in excel.municipalities.iter() {
        let covered = config.municipalities.get(province).unwrap_or(&[]);
        let missing: Vec<String> = municipalities
            .iter()
            .filter(|m| !covered.contains(m))
            .cloned()
            .collect();
        if !missing.is_empty() {
            municipalities_missing_in_config.insert(province.to_string(), missing);
        }
    }

    Detail {
        provinces_only_in_config,
        provinces_only_in_excel,
        municipalities_missing_in_config,
    }
}
