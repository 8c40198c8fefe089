//! Topic materialization: copy constituent-facing documents into
//! topic-named review folders.

use std::path::{Path, PathBuf};

use curator_engine::model::MergedTable;
use curator_engine::resolve::{resolve, PathResolution};
use curator_engine::schema;
use curator_engine::topics::{group_by_topic, sanitize_folder_name};

use crate::error::IoError;

pub const TOPIC_TREE: &str = "Correspondence_by_Topic";

#[derive(Debug, Default, serde::Serialize)]
pub struct TopicOutcome {
    pub topics: usize,
    pub copied: usize,
    /// (topic, declared path) pairs for documents missing on disk.
    pub not_found: Vec<(String, String)>,
}

/// Copy every locatable document of every topic into
/// `out_dir/Correspondence_by_Topic/<sanitized topic>/<filename>`.
///
/// A document missing on disk goes to the not-found list rather than
/// failing the run. A topic folder that ends up with zero files is removed;
/// empty folders are never left behind as artifacts.
pub fn materialize_topics(
    merged: &MergedTable,
    export_root: &Path,
    out_dir: &Path,
) -> Result<TopicOutcome, IoError> {
    let base = out_dir.join(TOPIC_TREE);
    let mut outcome = TopicOutcome::default();

    for (topic, ids) in group_by_topic(merged) {
        let folder_name = sanitize_folder_name(&topic);
        if folder_name.is_empty() {
            continue;
        }
        let folder = base.join(&folder_name);
        std::fs::create_dir_all(&folder).map_err(|e| IoError::Write {
            path: folder.clone(),
            message: e.to_string(),
        })?;

        let mut copied_here = 0usize;
        for id in ids {
            let Some(row) = merged.row(id) else { continue };
            let doc_ref = merged.field(row, schema::DOCUMENT_REF);
            match resolve(doc_ref, export_root) {
                PathResolution::Resolved(source) if source.is_file() => {
                    if let Some(dest) = destination(&folder, &source) {
                        std::fs::copy(&source, &dest).map_err(|e| IoError::Write {
                            path: dest.clone(),
                            message: e.to_string(),
                        })?;
                        copied_here += 1;
                    }
                }
                _ => outcome.not_found.push((topic.clone(), doc_ref.to_string())),
            }
        }

        if copied_here == 0 {
            // All referenced documents were missing; drop the empty folder.
            let _ = std::fs::remove_dir(&folder);
        } else {
            outcome.topics += 1;
            outcome.copied += copied_here;
        }
    }

    Ok(outcome)
}

/// Destination path preserving only the source filename.
fn destination(folder: &Path, source: &Path) -> Option<PathBuf> {
    source.file_name().map(|name| folder.join(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use curator_engine::model::{MergedRow, RecordId};

    fn merged(rows: &[(&str, &str)]) -> MergedTable {
        MergedTable {
            columns: vec!["document_ref".into(), "code_description".into()],
            rows: rows
                .iter()
                .enumerate()
                .map(|(i, (doc, topic))| MergedRow {
                    id: RecordId(i),
                    fields: vec![doc.to_string(), topic.to_string()],
                })
                .collect(),
        }
    }

    #[test]
    fn copies_into_sanitized_topic_folders() {
        let dir = tempfile::tempdir().unwrap();
        let docs = dir.path().join("documents").join("in-email");
        std::fs::create_dir_all(&docs).unwrap();
        std::fs::write(docs.join("1.txt"), "letter").unwrap();

        let m = merged(&[("in-email\\1.txt", "Roads/Bridges")]);
        let out = materialize_topics(&m, dir.path(), dir.path()).unwrap();

        assert_eq!(out.copied, 1);
        let dest = dir.path().join(TOPIC_TREE).join("Roads_Bridges").join("1.txt");
        assert_eq!(std::fs::read_to_string(dest).unwrap(), "letter");
    }

    #[test]
    fn missing_documents_are_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let m = merged(&[("in-email\\ghost.txt", "Veterans")]);
        let out = materialize_topics(&m, dir.path(), dir.path()).unwrap();

        assert_eq!(out.copied, 0);
        assert_eq!(
            out.not_found,
            vec![("Veterans".to_string(), "in-email\\ghost.txt".to_string())]
        );
    }

    #[test]
    fn empty_topic_folders_are_pruned() {
        let dir = tempfile::tempdir().unwrap();
        let m = merged(&[("in-email\\ghost.txt", "Veterans")]);
        materialize_topics(&m, dir.path(), dir.path()).unwrap();
        assert!(!dir.path().join(TOPIC_TREE).join("Veterans").exists());
    }

    #[test]
    fn mixed_topic_keeps_folder_and_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        let docs = dir.path().join("documents").join("out-custom");
        std::fs::create_dir_all(&docs).unwrap();
        std::fs::write(docs.join("real.txt"), "x").unwrap();

        let m = merged(&[
            ("out-custom\\real.txt", "Agriculture"),
            ("out-custom\\ghost.txt", "Agriculture"),
        ]);
        let out = materialize_topics(&m, dir.path(), dir.path()).unwrap();

        assert_eq!(out.topics, 1);
        assert_eq!(out.copied, 1);
        assert_eq!(out.not_found.len(), 1);
        assert!(dir.path().join(TOPIC_TREE).join("Agriculture").join("real.txt").exists());
    }
}
