//! Audited deletion executor.
//!
//! Carries out the engine's per-record deletion plans against the export
//! tree. Every attempt appends one row to the day-stamped audit log; size
//! and content hash are computed *before* the file is removed. Per-record
//! failures are logged and the run continues; nothing here aborts.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;
use sha2::{Digest, Sha256};

use curator_engine::categories::combined_label;
use curator_engine::classify::Classification;
use curator_engine::model::MergedTable;
use curator_engine::plan::{plan_deletion, DeletionAction};
use curator_engine::schema;

use crate::error::IoError;

/// One audit row. Append-only; the log for a given date is never
/// overwritten.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    #[serde(rename = "File")]
    pub file: String,
    #[serde(rename = "SizeKB")]
    pub size_kb: u64,
    #[serde(rename = "DateCreated")]
    pub date_created: String,
    #[serde(rename = "DateDeleted")]
    pub date_deleted: String,
    #[serde(rename = "ContentHash")]
    pub content_hash: String,
    #[serde(rename = "Notes")]
    pub notes: String,
}

pub const AUDIT_COLUMNS: [&str; 6] =
    ["File", "SizeKB", "DateCreated", "DateDeleted", "ContentHash", "Notes"];

#[derive(Debug, Default, Serialize)]
pub struct DeletionOutcome {
    pub deleted: usize,
    pub retained: usize,
    pub skipped_blank: usize,
    pub unresolved: usize,
    pub missing: usize,
    pub log_path: PathBuf,
}

/// Audit log path for a run date. Day-stamped from the injected date, so
/// repeated runs within one day are deterministic and testable.
pub fn audit_log_path(out_dir: &Path, log_date: NaiveDate) -> PathBuf {
    out_dir.join(format!("file_deletion_log_{}.csv", log_date.format("%Y-%m-%d")))
}

/// Append one row, creating the log with its header on first use. The
/// header is written only when the file is created; a same-day re-run
/// appends rows without duplicating it. The file is not held open across
/// the run, so a crash mid-run leaves a valid partial log.
fn append_audit_row(log_path: &Path, entry: &AuditEntry) -> Result<(), IoError> {
    let write_err = |message: String| IoError::Write {
        path: log_path.to_path_buf(),
        message,
    };

    let fresh = !log_path.exists();
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|e| write_err(e.to_string()))?;

    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
    if fresh {
        writer.write_record(AUDIT_COLUMNS).map_err(|e| write_err(e.to_string()))?;
    }
    writer.serialize(entry).map_err(|e| write_err(e.to_string()))?;
    writer.flush().map_err(|e| write_err(e.to_string()))?;
    Ok(())
}

fn timestamp(t: std::time::SystemTime) -> String {
    DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M:%S").to_string()
}

fn placeholder_entry(file: impl Into<String>, notes: impl Into<String>) -> AuditEntry {
    AuditEntry {
        file: file.into(),
        size_kb: 0,
        date_created: String::new(),
        date_deleted: String::new(),
        content_hash: String::new(),
        notes: notes.into(),
    }
}

/// Delete the files behind every classified record, writing the audit
/// trail as it goes.
pub fn delete_appraised(
    merged: &MergedTable,
    classification: &Classification,
    export_root: &Path,
    out_dir: &Path,
    log_date: NaiveDate,
    dry_run: bool,
) -> Result<DeletionOutcome, IoError> {
    let log_path = audit_log_path(out_dir, log_date);
    let mut outcome = DeletionOutcome { log_path: log_path.clone(), ..Default::default() };

    for (id, tags) in classification.tagged_records() {
        let Some(row) = merged.row(id) else { continue };
        let doc_ref = merged.field(row, schema::DOCUMENT_REF);
        let label = combined_label(tags);

        match plan_deletion(doc_ref, export_root) {
            DeletionAction::SkipBlank => {
                // Nothing to delete; a legitimate skip, not an attempt.
                outcome.skipped_blank += 1;
            }
            DeletionAction::Retain => {
                outcome.retained += 1;
                append_audit_row(
                    &log_path,
                    &placeholder_entry(doc_ref, "Retained: form/template letter"),
                )?;
            }
            DeletionAction::Unresolved => {
                outcome.unresolved += 1;
                append_audit_row(
                    &log_path,
                    &placeholder_entry(doc_ref, "Cannot determine file path: new pattern"),
                )?;
            }
            DeletionAction::Delete(path) => {
                let entry = delete_one(&path, &label, dry_run, &mut outcome);
                append_audit_row(&log_path, &entry)?;
            }
        }
    }

    Ok(outcome)
}

/// Attempt one deletion. Per-record failures become audit notes, never
/// errors; the pipeline moves on to the next record.
fn delete_one(path: &Path, label: &str, dry_run: bool, outcome: &mut DeletionOutcome) -> AuditEntry {
    let display = path.display().to_string();

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            outcome.missing += 1;
            return placeholder_entry(display, "Cannot delete: FileNotFoundError");
        }
        Err(e) => {
            outcome.missing += 1;
            return placeholder_entry(display, format!("Cannot delete: {e}"));
        }
    };

    let size_kb = bytes.len() as u64 / 1024;
    let content_hash = format!("{:x}", Sha256::digest(&bytes));
    let date_created = std::fs::metadata(path)
        .ok()
        .and_then(|m| m.created().or_else(|_| m.modified()).ok())
        .map(timestamp)
        .unwrap_or_default();

    if dry_run {
        return AuditEntry {
            file: display,
            size_kb,
            date_created,
            date_deleted: String::new(),
            content_hash,
            notes: format!("Dry run: would delete ({label})"),
        };
    }

    match std::fs::remove_file(path) {
        Ok(()) => {
            outcome.deleted += 1;
            AuditEntry {
                file: display,
                size_kb,
                date_created,
                date_deleted: timestamp(std::time::SystemTime::now()),
                content_hash,
                notes: label.to_string(),
            }
        }
        Err(e) => {
            outcome.missing += 1;
            placeholder_entry(display, format!("Cannot delete: {e}"))
        }
    }
}
