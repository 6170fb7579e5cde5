use geocat_recon::{CatalogSource, MunicipalityGroup, RegionDimension};
use indexmap::{IndexMap, IndexSet};

use crate::regions::RegionsConfig;
use crate::row::CatalogRow;
use crate::SourceError;

/// Loaded primary-feed rows plus the reference region list.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    rows: Vec<CatalogRow>,
    regions: Option<RegionsConfig>,
}

impl Catalog {
    pub fn new(rows: Vec<CatalogRow>) -> Self {
        Self { rows, regions: None }
    }

    pub fn with_regions(mut self, regions: RegionsConfig) -> Self {
        self.regions = Some(regions);
        self
    }
}

impl CatalogSource for Catalog {
    type Row = CatalogRow;
    type Error = SourceError;

    fn rows(&self) -> Result<&[CatalogRow], SourceError> {
        Ok(self.rows.as_slice())
    }

    /// Municipalities in row order, one entry per requested province.
    ///
    /// Repeated municipality names within a province collapse to the first;
    /// a province with no rows gets an empty list.
    fn group_municipalities(&self, provinces: &[String]) -> Result<MunicipalityGroup, SourceError> {
        let mut by_province: IndexMap<&str, IndexSet<&str>> = IndexMap::new();
        for row in &self.rows {
            by_province
                .entry(row.province.as_str())
                .or_default()
                .insert(row.municipality.as_str());
        }

        let mut group = MunicipalityGroup::new();
        for province in provinces {
            if group.get(province).is_some() {
                continue;
            }
            let municipalities = by_province
                .get(province.as_str())
                .map(|m| m.iter().map(|s| s.to_string()).collect())
                .unwrap_or_default();
            group.insert(province.clone(), municipalities);
        }
        Ok(group)
    }

    fn list_regions(&self, dimension: RegionDimension) -> Result<Vec<Vec<String>>, SourceError> {
        self.regions
            .as_ref()
            .map(|r| r.list(dimension))
            .ok_or(SourceError::NoRegions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geocat_recon::build_report;

    fn row(province: &str, municipality: &str, n: usize) -> CatalogRow {
        CatalogRow {
            province: province.into(),
            municipality: municipality.into(),
            row_number: n,
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            row("Abra", "Bangued", 2),
            row("Benguet", "La Trinidad", 3),
            row("Abra", "Tayum", 4),
            row("Abra", "Bangued", 5),
        ])
    }

    #[test]
    fn groups_in_request_order_with_dedup() {
        let request: Vec<String> = ["Benguet", "Abra", "Benguet", "Kalinga"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let group = catalog().group_municipalities(&request).unwrap();
        let provinces: Vec<&str> = group.provinces().collect();
        assert_eq!(provinces, ["Benguet", "Abra", "Kalinga"]);
        assert_eq!(group.get("Abra").unwrap(), ["Bangued", "Tayum"]);
        assert_eq!(group.get("Kalinga").unwrap().len(), 0);
        assert_eq!(group.total_municipalities(), 3);
    }

    #[test]
    fn interleaved_rows_keep_encounter_order_per_province() {
        let rows = (0..5_000)
            .map(|i| row(&format!("P{}", i % 50), &format!("M{}", i % 200), i + 2))
            .collect();
        let request: Vec<String> = (0..60).rev().map(|i| format!("P{i}")).collect();
        let group = Catalog::new(rows).group_municipalities(&request).unwrap();

        assert_eq!(group.len(), 60);
        assert_eq!(group.provinces().next(), Some("P59"));
        assert!(group.get("P55").unwrap().is_empty());
        // i % 50 == 7 hits M7, M57, M107, M157, then repeats
        assert_eq!(group.get("P7").unwrap(), ["M7", "M57", "M107", "M157"]);
        assert_eq!(group.total_municipalities(), 200);
    }

    #[test]
    fn no_regions_is_an_error() {
        let err = catalog().list_regions(RegionDimension::Provinces).unwrap_err();
        assert!(matches!(err, SourceError::NoRegions));

        let err = build_report(&catalog()).unwrap_err();
        assert!(err.to_string().contains("no region config loaded"));
    }

    #[test]
    fn report_over_loaded_catalog() {
        let regions = RegionsConfig::from_toml(
            "[[regions]]\nname = \"CAR\"\nprovinces = [\"Abra\", \"Benguet\", \"Kalinga\"]\n",
        )
        .unwrap();
        let report = build_report(&catalog().with_regions(regions)).unwrap();

        assert_eq!(report.excel().count_municipalities(), 3);
        assert_eq!(report.config().count_municipalities(), 3);
        assert!(report.has_missing_in_excel());
        assert!(!report.has_missing_in_config());
    }
}
