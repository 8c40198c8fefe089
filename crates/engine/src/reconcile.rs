//! Reconciliation: metadata-declared document paths vs. the live file tree.
//!
//! Declared references are deduplicated before bucketing, so duplicate
//! metadata rows never inflate the Match count. Four disjoint buckets:
//! blank reference, metadata-only, directory-only, match.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::resolve::{resolve, PathResolution};

#[derive(Debug, Default)]
pub struct ReconciliationResult {
    /// Records (not distinct paths) with a blank declared reference.
    pub blank: usize,
    /// Declared and present on disk. Absolute paths, sorted.
    pub matched: Vec<PathBuf>,
    /// Declared but absent on disk, including unresolvable declared
    /// references (present in metadata, not locatable on disk).
    /// Deduplicated declared references, sorted.
    pub metadata_only: Vec<String>,
    /// On disk but never declared. Absolute paths, sorted.
    pub directory_only: Vec<PathBuf>,
}

impl ReconciliationResult {
    pub fn match_count(&self) -> usize {
        self.matched.len()
    }
}

/// Compare declared references against a recursive inventory of the
/// document tree (absolute paths, as produced by the inventory walk).
pub fn reconcile<'a, I>(
    declared: I,
    inventory: &BTreeSet<PathBuf>,
    export_root: &Path,
) -> ReconciliationResult
where
    I: IntoIterator<Item = &'a str>,
{
    let mut result = ReconciliationResult::default();

    let mut distinct: BTreeSet<&str> = BTreeSet::new();
    for doc_ref in declared {
        if doc_ref.trim().is_empty() {
            result.blank += 1;
        } else {
            distinct.insert(doc_ref);
        }
    }

    let mut matched: BTreeSet<PathBuf> = BTreeSet::new();
    for doc_ref in distinct {
        match resolve(doc_ref, export_root) {
            PathResolution::Resolved(path) if inventory.contains(&path) => {
                matched.insert(path);
            }
            _ => result.metadata_only.push(doc_ref.to_string()),
        }
    }

    result.directory_only = inventory.iter().filter(|p| !matched.contains(*p)).cloned().collect();
    result.matched = matched.into_iter().collect();
    result
}
