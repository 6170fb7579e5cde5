//! The data-source seam the engine reconciles against.

use std::fmt;

use crate::model::MunicipalityGroup;

/// A row record that names its province.
pub trait ProvinceRecord {
    fn province(&self) -> &str;
}

/// Which attribute of each region a region listing yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionDimension {
    /// The provinces that make up each region.
    Provinces,
    /// Each region's display name, as a one-element list.
    Names,
}

impl fmt::Display for RegionDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provinces => write!(f, "provinces"),
            Self::Names => write!(f, "names"),
        }
    }
}

/// Everything the engine needs from a loaded catalog.
///
/// Implementations hold already-materialized data; the engine calls each
/// capability at most twice per report and never retries.
pub trait CatalogSource {
    type Row: ProvinceRecord;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Row records of the primary feed, in source order.
    fn rows(&self) -> Result<&[Self::Row], Self::Error>;

    /// Municipalities keyed by each of `provinces`.
    fn group_municipalities(&self, provinces: &[String]) -> Result<MunicipalityGroup, Self::Error>;

    /// Region groupings from the reference feed, one inner list per region.
    fn list_regions(&self, dimension: RegionDimension) -> Result<Vec<Vec<String>>, Self::Error>;
}
