//! Deletion planning: the pure per-record decision behind audited deletion.
//!
//! The executor in `curator-io` carries out `Delete` plans and writes the
//! audit rows; everything decided here is side-effect free and testable
//! without a filesystem.

use std::path::Path;

use crate::resolve::{is_template, resolve, PathResolution};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionAction {
    /// Blank document reference: nothing to delete, a legitimate skip.
    SkipBlank,
    /// Form/template letter: retained regardless of category.
    Retain,
    /// Unrecognized path pattern: logged, never attempted.
    Unresolved,
    /// Resolved target to delete.
    Delete(std::path::PathBuf),
}

pub fn plan_deletion(doc_ref: &str, export_root: &Path) -> DeletionAction {
    if doc_ref.trim().is_empty() {
        return DeletionAction::SkipBlank;
    }
    if is_template(doc_ref) {
        return DeletionAction::Retain;
    }
    match resolve(doc_ref, export_root) {
        PathResolution::Resolved(path) => DeletionAction::Delete(path),
        PathResolution::Unresolved => DeletionAction::Unresolved,
    }
}
