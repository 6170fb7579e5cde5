use indexmap::{IndexMap, IndexSet};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Provinces
// ---------------------------------------------------------------------------

/// Distinct province names in first-seen order.
///
/// Names compare by exact string: no case folding, no whitespace trimming.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ProvinceSet(IndexSet<String>);

impl ProvinceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a name. Returns false if it was already present (position unchanged).
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.0.insert(name.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl PartialEq for ProvinceSet {
    // IndexSet equality ignores order; ours does not.
    fn eq(&self, other: &Self) -> bool {
        self.0.iter().eq(other.0.iter())
    }
}

impl Eq for ProvinceSet {}

impl FromIterator<String> for ProvinceSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for ProvinceSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_string).collect())
    }
}

// ---------------------------------------------------------------------------
// Municipalities
// ---------------------------------------------------------------------------

/// Province name → municipality names, in insertion order.
///
/// Municipality lists are kept exactly as the grouping collaborator returned
/// them; duplicates inside a list are not removed here.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct MunicipalityGroup(IndexMap<String, Vec<String>>);

impl MunicipalityGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the municipality list for a province, replacing any previous list.
    pub fn insert(&mut self, province: impl Into<String>, municipalities: Vec<String>) {
        self.0.insert(province.into(), municipalities);
    }

    pub fn get(&self, province: &str) -> Option<&[String]> {
        self.0.get(province).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn provinces(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of provinces in the group.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of the municipality list lengths across all provinces.
    pub fn total_municipalities(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

impl PartialEq for MunicipalityGroup {
    fn eq(&self, other: &Self) -> bool {
        self.0.iter().eq(other.0.iter())
    }
}

impl Eq for MunicipalityGroup {}

impl<P: Into<String>> FromIterator<(P, Vec<String>)> for MunicipalityGroup {
    fn from_iter<I: IntoIterator<Item = (P, Vec<String>)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(p, m)| (p.into(), m)).collect())
    }
}

// ---------------------------------------------------------------------------
// Snapshot + Report
// ---------------------------------------------------------------------------

/// One feed's normalized view: its provinces and the municipalities grouped
/// under them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSnapshot {
    pub provinces: ProvinceSet,
    pub municipalities: MunicipalityGroup,
}

impl SourceSnapshot {
    pub fn new(provinces: ProvinceSet, municipalities: MunicipalityGroup) -> Self {
        Self {
            provinces,
            municipalities,
        }
    }

    /// Always derived from `municipalities`; there is no stored count.
    pub fn count_municipalities(&self) -> usize {
        self.municipalities.total_municipalities()
    }
}

impl Serialize for SourceSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("SourceSnapshot", 3)?;
        s.serialize_field("provinces", &self.provinces)?;
        s.serialize_field("municipalities", &self.municipalities)?;
        s.serialize_field("count_municipalities", &self.count_municipalities())?;
        s.end()
    }
}

/// Result of comparing the primary (excel) feed with the reference (config) feed.
///
/// Flags are coarse: they compare totals and cardinalities, not members.
/// Equal totals do not prove equal sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconReport {
    excel: SourceSnapshot,
    config: SourceSnapshot,
    has_missing_in_excel: bool,
    has_missing_in_config: bool,
}

impl ReconReport {
    /// Assemble a report, deriving both flags from the snapshots.
    pub fn from_snapshots(excel: SourceSnapshot, config: SourceSnapshot) -> Self {
        let has_missing_in_config = excel.count_municipalities() > config.count_municipalities();
        let has_missing_in_excel = config.provinces.len() > excel.provinces.len();
        Self {
            excel,
            config,
            has_missing_in_excel,
            has_missing_in_config,
        }
    }

    pub fn excel(&self) -> &SourceSnapshot {
        &self.excel
    }

    pub fn config(&self) -> &SourceSnapshot {
        &self.config
    }

    /// The reference feed knows more provinces than appear in the excel rows.
    pub fn has_missing_in_excel(&self) -> bool {
        self.has_missing_in_excel
    }

    /// The excel feed counts more municipalities than the config provinces cover.
    pub fn has_missing_in_config(&self) -> bool {
        self.has_missing_in_config
    }

    pub fn is_consistent(&self) -> bool {
        !self.has_missing_in_excel && !self.has_missing_in_config
    }

    /// excel municipality count minus config municipality count.
    pub fn municipality_delta(&self) -> i64 {
        self.excel.count_municipalities() as i64 - self.config.count_municipalities() as i64
    }

    /// config province count minus excel province count.
    pub fn province_delta(&self) -> i64 {
        self.config.provinces.len() as i64 - self.excel.provinces.len() as i64
    }
}
