// Property tests for the reconciliation engine.
//
// Run with: cargo test -p geocat-recon --test properties

use std::collections::BTreeMap;
use std::fmt;

use geocat_recon::{build_report, CatalogSource, MunicipalityGroup, ProvinceRecord, RegionDimension};
use proptest::prelude::*;

#[derive(Debug)]
struct Row {
    province: String,
}

impl ProvinceRecord for Row {
    fn province(&self) -> &str {
        &self.province
    }
}

#[derive(Debug)]
struct Never;

impl fmt::Display for Never {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("never")
    }
}

impl std::error::Error for Never {}

/// Rows plus a municipality table shared by both groupings.
#[derive(Debug)]
struct Fixture {
    rows: Vec<Row>,
    table: BTreeMap<String, Vec<String>>,
    regions: Vec<Vec<String>>,
}

impl CatalogSource for Fixture {
    type Row = Row;
    type Error = Never;

    fn rows(&self) -> Result<&[Row], Never> {
        Ok(self.rows.as_slice())
    }

    fn group_municipalities(&self, provinces: &[String]) -> Result<MunicipalityGroup, Never> {
        Ok(provinces
            .iter()
            .map(|p| (p.clone(), self.table.get(p).cloned().unwrap_or_default()))
            .collect())
    }

    fn list_regions(&self, _dimension: RegionDimension) -> Result<Vec<Vec<String>>, Never> {
        Ok(self.regions.clone())
    }
}

fn province() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Abra", "Benguet", "Cebu", "Davao", "Ifugao", "Leyte"])
        .prop_map(str::to_string)
}

fn fixture() -> impl Strategy<Value = Fixture> {
    (
        prop::collection::vec(province(), 0..20),
        prop::collection::btree_map(province(), prop::collection::vec("[A-Z][a-z]{1,6}", 0..5), 0..6),
        prop::collection::vec(prop::collection::vec(province(), 0..4), 0..5),
    )
        .prop_map(|(rows, table, regions)| Fixture {
            rows: rows.into_iter().map(|province| Row { province }).collect(),
            table,
            regions,
        })
}

proptest! {
    #[test]
    fn report_is_idempotent(f in fixture()) {
        let first = build_report(&f).unwrap();
        let second = build_report(&f).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn counts_match_groupings(f in fixture()) {
        let report = build_report(&f).unwrap();
        for snap in [report.excel(), report.config()] {
            let sum: usize = snap.municipalities.iter().map(|(_, m)| m.len()).sum();
            prop_assert_eq!(snap.count_municipalities(), sum);
        }
    }

    #[test]
    fn excel_provinces_are_distinct_in_row_order(f in fixture()) {
        let report = build_report(&f).unwrap();
        let got: Vec<&str> = report.excel().provinces.iter().collect();

        let mut expected: Vec<&str> = Vec::new();
        for row in &f.rows {
            if !expected.contains(&row.province.as_str()) {
                expected.push(&row.province);
            }
        }
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn missing_in_excel_tracks_cardinality(f in fixture()) {
        let report = build_report(&f).unwrap();
        let excel = &report.excel().provinces;
        let config = &report.config().provinces;
        prop_assert_eq!(report.has_missing_in_excel(), config.len() > excel.len());

        if excel.iter().all(|p| config.contains(p)) && config.len() > excel.len() {
            prop_assert!(report.has_missing_in_excel());
        }
        if config.iter().all(|p| excel.contains(p)) {
            prop_assert!(!report.has_missing_in_excel());
        }
    }

    #[test]
    fn empty_rows_never_flag_missing_in_config(
        table in prop::collection::btree_map(province(), prop::collection::vec("[a-z]{2}", 0..4), 0..6),
        regions in prop::collection::vec(prop::collection::vec(province(), 0..4), 0..5),
    ) {
        let f = Fixture { rows: Vec::new(), table, regions };
        let report = build_report(&f).unwrap();
        prop_assert!(report.excel().provinces.is_empty());
        prop_assert_eq!(report.excel().count_municipalities(), 0);
        prop_assert!(!report.has_missing_in_config());
    }
}
