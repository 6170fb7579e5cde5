//! Reference region list: named clusters of provinces.
//!
//! ```toml
//! [[regions]]
//! name = "Cordillera Administrative Region"
//! provinces = ["Abra", "Apayao", "Benguet", "Ifugao", "Kalinga", "Mountain Province"]
//! ```

use std::collections::HashSet;
use std::path::Path;

use geocat_recon::RegionDimension;
use serde::Deserialize;

use crate::SourceError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Region {
    pub name: String,
    #[serde(default)]
    pub provinces: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegionsConfig {
    pub regions: Vec<Region>,
}

impl RegionsConfig {
    pub fn from_toml(toml_str: &str) -> Result<Self, SourceError> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| SourceError::RegionsParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SourceError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    fn validate(&self) -> Result<(), SourceError> {
        if self.regions.is_empty() {
            return Err(SourceError::RegionsInvalid("at least one region is required".into()));
        }

        let mut seen = HashSet::new();
        for region in &self.regions {
            if region.name.trim().is_empty() {
                return Err(SourceError::RegionsInvalid("region name must not be empty".into()));
            }
            if !seen.insert(region.name.as_str()) {
                return Err(SourceError::RegionsInvalid(format!(
                    "duplicate region name '{}'",
                    region.name
                )));
            }
        }

        Ok(())
    }

    /// One list per region, in file order.
    pub fn list(&self, dimension: RegionDimension) -> Vec<Vec<String>> {
        self.regions
            .iter()
            .map(|r| match dimension {
                RegionDimension::Provinces => r.provinces.clone(),
                RegionDimension::Names => vec![r.name.clone()],
            })
            .collect()
    }

    /// Distinct provinces across all regions.
    pub fn province_count(&self) -> usize {
        self.regions
            .iter()
            .flat_map(|r| r.provinces.iter())
            .collect::<HashSet<_>>()
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[regions]]
name = "Ilocos Region"
provinces = ["Ilocos Norte", "Ilocos Sur", "La Union", "Pangasinan"]

[[regions]]
name = "Cordillera Administrative Region"
provinces = ["Abra", "Benguet"]

[[regions]]
name = "Cagayan Valley (Batanes)"
provinces = ["Batanes", "Ilocos Norte"]
"#;

    #[test]
    fn list_by_dimension() {
        let config = RegionsConfig::from_toml(SAMPLE).unwrap();
        let provinces = config.list(RegionDimension::Provinces);
        assert_eq!(provinces.len(), 3);
        assert_eq!(provinces[1], ["Abra", "Benguet"]);

        let names = config.list(RegionDimension::Names);
        assert_eq!(names[0], ["Ilocos Region"]);
        assert_eq!(config.province_count(), 7);
    }

    #[test]
    fn region_without_provinces_is_allowed() {
        let config = RegionsConfig::from_toml("[[regions]]\nname = \"NCR\"\n").unwrap();
        assert_eq!(config.list(RegionDimension::Provinces), vec![Vec::<String>::new()]);
    }

    #[test]
    fn rejects_empty_and_duplicate() {
        let err = RegionsConfig::from_toml("regions = []").unwrap_err();
        assert!(matches!(err, SourceError::RegionsInvalid(_)));

        let dup = "[[regions]]\nname = \"A\"\n[[regions]]\nname = \"A\"\n";
        let err = RegionsConfig::from_toml(dup).unwrap_err();
        assert!(err.to_string().contains("duplicate region name 'A'"));
    }

    #[test]
    fn parse_error() {
        let err = RegionsConfig::from_toml("[[regions]]\nprovinces = 3\n").unwrap_err();
        assert!(matches!(err, SourceError::RegionsParse(_)));
    }
}
