use crate::error::{ReconError, SourceStage};
use crate::model::{ProvinceSet, ReconReport, SourceSnapshot};
use crate::source::{CatalogSource, ProvinceRecord, RegionDimension};

/// Reconcile the primary (excel) feed against the reference (config) feed.
///
/// Pure over already-loaded data: a fixed sequence of collaborator calls with
/// in-memory aggregation between them. Any collaborator failure aborts the
/// run and no partial report is produced.
pub fn build_report<S>(source: &S) -> Result<ReconReport, ReconError>
where
    S: CatalogSource + ?Sized,
{
    let excel = excel_snapshot(source)?;
    let config = config_snapshot(source)?;

    log::debug!(
        "parsed municipalities from config: {}, loaded municipalities from excel: {}",
        config.count_municipalities(),
        excel.count_municipalities(),
    );

    Ok(ReconReport::from_snapshots(excel, config))
}

/// Provinces in row order, grouped by the source.
fn excel_snapshot<S>(source: &S) -> Result<SourceSnapshot, ReconError>
where
    S: CatalogSource + ?Sized,
{
    let rows = source
        .rows()
        .map_err(|e| ReconError::source_unavailable(SourceStage::Rows, e))?;

    let provinces: ProvinceSet = rows.iter().map(|row| row.province()).collect();
    log::debug!("excel: {} row(s), {} distinct province(s)", rows.len(), provinces.len());

    let municipalities = source
        .group_municipalities(&provinces.to_vec())
        .map_err(|e| ReconError::source_unavailable(SourceStage::Grouping, e))?;

    Ok(SourceSnapshot::new(provinces, municipalities))
}

/// Provinces flattened out of every region, grouped by the same source.
fn config_snapshot<S>(source: &S) -> Result<SourceSnapshot, ReconError>
where
    S: CatalogSource + ?Sized,
{
    let regions = source
        .list_regions(RegionDimension::Provinces)
        .map_err(|e| ReconError::source_unavailable(SourceStage::Regions, e))?;

    let provinces: ProvinceSet = regions.into_iter().flatten().collect();
    log::debug!("config: {} distinct province(s)", provinces.len());

    let municipalities = source
        .group_municipalities(&provinces.to_vec())
        .map_err(|e| ReconError::source_unavailable(SourceStage::Grouping, e))?;

    Ok(SourceSnapshot::new(provinces, municipalities))
}
