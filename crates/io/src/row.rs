use geocat_recon::ProvinceRecord;

/// One data row of the primary feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
    pub province: String,
    pub municipality: String,
    /// 1-based row number in the source sheet.
    pub row_number: usize,
}

impl ProvinceRecord for CatalogRow {
    fn province(&self) -> &str {
        &self.province
    }
}

/// Where the two catalog fields live in a sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub province: String,
    pub municipality: String,
    /// 0-based index of the header row; rows above it are ignored.
    pub header_row: usize,
    /// Sheet to read. `None` = first sheet. Ignored for CSV.
    pub sheet: Option<String>,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            province: "province".into(),
            municipality: "municipality".into(),
            header_row: 0,
            sheet: None,
        }
    }
}

/// Build catalog rows from a grid of cell text.
///
/// Headers match case-insensitively after trimming; cell values are kept as-is.
/// Rows where both mapped cells are empty are skipped.
pub(crate) fn rows_from_grid(
    grid: Vec<Vec<String>>,
    mapping: &ColumnMapping,
) -> Result<Vec<CatalogRow>, crate::SourceError> {
    use crate::SourceError;

    let mut lines = grid.into_iter().enumerate().skip(mapping.header_row);

    let Some((_, headers)) = lines.next() else {
        return Err(SourceError::MissingColumn {
            column: mapping.province.clone(),
            header_row: mapping.header_row,
        });
    };

    let idx = |name: &str| -> Result<usize, SourceError> {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| SourceError::MissingColumn {
                column: name.into(),
                header_row: mapping.header_row,
            })
    };

    let province_idx = idx(&mapping.province)?;
    let municipality_idx = idx(&mapping.municipality)?;

    let mut rows = Vec::new();
    for (i, mut line) in lines {
        let cell = |line: &mut Vec<String>, at: usize| {
            line.get_mut(at).map(std::mem::take).unwrap_or_default()
        };
        let province = cell(&mut line, province_idx);
        let municipality = cell(&mut line, municipality_idx);

        if province.is_empty() && municipality.is_empty() {
            continue;
        }
        if province.is_empty() {
            return Err(SourceError::MissingProvince { row: i + 1 });
        }

        rows.push(CatalogRow {
            province,
            municipality,
            row_number: i + 1,
        });
    }

    Ok(rows)
}
