//! `curator-io` — the filesystem side of the appraisal pipeline.
//!
//! Export table loading (with encoding fallback), document-tree inventory,
//! the audited deletion executor, topic materialization, and the tabular
//! report writers. All decision logic lives in `curator-engine`; this crate
//! carries it out and logs outcomes.

pub mod delete;
pub mod error;
pub mod inventory;
pub mod reports;
pub mod tables;
pub mod topics;

pub use delete::{delete_appraised, AuditEntry, DeletionOutcome};
pub use error::IoError;
pub use inventory::walk_documents;
pub use tables::load_export;
pub use topics::{materialize_topics, TopicOutcome};
