//! `curator-engine` — Constituent-correspondence appraisal engine.
//!
//! Pure engine crate: receives pre-loaded export tables, returns merge,
//! classification, deletion-plan, and reconciliation results.
//! No CLI or IO dependencies; the filesystem side lives in `curator-io`.

pub mod categories;
pub mod classify;
pub mod error;
pub mod merge;
pub mod model;
pub mod plan;
pub mod reconcile;
pub mod resolve;
pub mod schema;
pub mod topics;

pub use categories::{Category, CategoryRule, RULES};
pub use classify::{classify_all, classify_category, Classification};
pub use error::EngineError;
pub use merge::merge_export;
pub use model::{ExportTables, MergedTable, RecordId, SourceTable};
pub use plan::{plan_deletion, DeletionAction};
pub use reconcile::{reconcile, ReconciliationResult};
pub use resolve::{resolve, PathResolution};
