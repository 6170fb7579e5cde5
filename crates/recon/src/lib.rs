//! `geocat-recon` — province/municipality catalog reconciliation engine.
//!
//! Pure engine crate: reads an already-loaded catalog through the
//! [`CatalogSource`] trait and returns a [`ReconReport`].
//! No CLI or IO dependencies.

pub mod engine;
pub mod error;
pub mod model;
pub mod source;

pub use engine::build_report;
pub use error::{ReconError, SourceStage};
pub use model::{MunicipalityGroup, ProvinceSet, ReconReport, SourceSnapshot};
pub use source::{CatalogSource, ProvinceRecord, RegionDimension};
