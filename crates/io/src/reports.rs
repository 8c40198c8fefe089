//! Tabular report writers and advisory format statistics.
//!
//! Every report is CSV with a header row and stable column order. Reports
//! are rebuilt per run; only the deletion audit log has append semantics
//! (see `delete`).

use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use curator_engine::categories::combined_label;
use curator_engine::classify::Classification;
use curator_engine::model::MergedTable;
use curator_engine::reconcile::ReconciliationResult;
use curator_engine::schema;

use crate::error::IoError;

fn writer(path: &Path) -> Result<csv::Writer<std::fs::File>, IoError> {
    csv::Writer::from_path(path).map_err(|e| IoError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn write_err(path: &Path) -> impl Fn(csv::Error) -> IoError + '_ {
    move |e| IoError::Write { path: path.to_path_buf(), message: e.to_string() }
}

/// `appraisal_check_log.csv` — one row per (record, category) weak match.
/// The free-text column is included: it is the evidence a reviewer needs.
pub fn write_review_log(
    path: &Path,
    merged: &MergedTable,
    classification: &Classification,
) -> Result<(), IoError> {
    let mut w = writer(path)?;
    let err = write_err(path);

    let mut header = vec!["Category".to_string()];
    header.extend(merged.columns.iter().cloned());
    w.write_record(&header).map_err(&err)?;

    for (id, category) in &classification.review {
        let Some(row) = merged.row(*id) else { continue };
        let mut record = vec![category.label().to_string()];
        record.extend(row.fields.iter().cloned());
        w.write_record(&record).map_err(&err)?;
    }
    w.flush().map_err(|e| IoError::Write { path: path.to_path_buf(), message: e.to_string() })
}

/// `appraisal_delete_log.csv` — classified records with combined `|` tags.
/// The free-text column is dropped here, after classification has used it:
/// the last PII-adjacent field to go.
pub fn write_delete_log(
    path: &Path,
    merged: &MergedTable,
    classification: &Classification,
) -> Result<(), IoError> {
    let mut w = writer(path)?;
    let err = write_err(path);

    let kept: Vec<usize> = merged
        .columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.as_str() != schema::FREE_TEXT)
        .map(|(i, _)| i)
        .collect();

    let mut header = vec!["Categories".to_string()];
    header.extend(kept.iter().map(|&i| merged.columns[i].clone()));
    w.write_record(&header).map_err(&err)?;

    for (id, tags) in classification.tagged_records() {
        let Some(row) = merged.row(id) else { continue };
        let mut record = vec![combined_label(tags)];
        record.extend(kept.iter().map(|&i| row.fields[i].clone()));
        w.write_record(&record).map_err(&err)?;
    }
    w.flush().map_err(|e| IoError::Write { path: path.to_path_buf(), message: e.to_string() })
}

/// `usability_report_matching.csv` (counts) and
/// `usability_report_details.csv` (per-path bucket rows).
pub fn write_reconciliation(
    matching_path: &Path,
    details_path: &Path,
    result: &ReconciliationResult,
) -> Result<(), IoError> {
    let mut w = writer(matching_path)?;
    let err = write_err(matching_path);
    let counts = [
        ("Match", result.match_count()),
        ("MetadataOnly", result.metadata_only.len()),
        ("DirectoryOnly", result.directory_only.len()),
        ("MetadataBlank", result.blank),
    ];
    w.write_record(["Bucket", "Count"]).map_err(&err)?;
    for (bucket, count) in counts {
        w.write_record([bucket.to_string(), count.to_string()]).map_err(&err)?;
    }
    w.flush().map_err(|e| IoError::Write { path: matching_path.to_path_buf(), message: e.to_string() })?;

    let mut w = writer(details_path)?;
    let err = write_err(details_path);
    w.write_record(["Bucket", "Path"]).map_err(&err)?;
    for p in &result.matched {
        w.write_record(["Match".to_string(), p.display().to_string()]).map_err(&err)?;
    }
    for declared in &result.metadata_only {
        w.write_record(["MetadataOnly", declared.as_str()]).map_err(&err)?;
    }
    for p in &result.directory_only {
        w.write_record(["DirectoryOnly".to_string(), p.display().to_string()]).map_err(&err)?;
    }
    w.flush().map_err(|e| IoError::Write { path: details_path.to_path_buf(), message: e.to_string() })
}

/// `topic_sort_file_not_found.csv` — (topic, declared path) pairs.
pub fn write_not_found(path: &Path, pairs: &[(String, String)]) -> Result<(), IoError> {
    let mut w = writer(path)?;
    let err = write_err(path);
    w.write_record(["Topic", "DeclaredPath"]).map_err(&err)?;
    for (topic, declared) in pairs {
        w.write_record([topic, declared]).map_err(&err)?;
    }
    w.flush().map_err(|e| IoError::Write { path: path.to_path_buf(), message: e.to_string() })
}

// ---------------------------------------------------------------------------
// Advisory format statistics
// ---------------------------------------------------------------------------

/// Counts of non-blank values not matching the expected shapes. Reported,
/// never blocking.
#[derive(Debug, Default, Serialize)]
pub struct FormatAdvisories {
    pub bad_dates: usize,
    pub bad_zips: usize,
    pub bad_states: usize,
}

fn valid_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || NaiveDate::parse_from_str(value, "%m/%d/%Y").is_ok()
}

fn valid_zip(value: &str) -> bool {
    match value.len() {
        5 | 9 => value.bytes().all(|b| b.is_ascii_digit()),
        10 => {
            let (head, tail) = value.split_at(5);
            head.bytes().all(|b| b.is_ascii_digit())
                && tail.starts_with('-')
                && tail[1..].bytes().all(|b| b.is_ascii_digit())
        }
        _ => false,
    }
}

fn valid_state(value: &str) -> bool {
    value.len() == 2 && value.bytes().all(|b| b.is_ascii_alphabetic())
}

pub fn format_advisories(merged: &MergedTable) -> FormatAdvisories {
    let mut advisories = FormatAdvisories::default();
    for row in &merged.rows {
        let checks = [
            (merged.field(row, schema::DATE_IN), valid_date as fn(&str) -> bool, &mut advisories.bad_dates),
            (merged.field(row, schema::ZIP), valid_zip, &mut advisories.bad_zips),
            (merged.field(row, schema::STATE), valid_state, &mut advisories.bad_states),
        ];
        for (value, valid, counter) in checks {
            let value = value.trim();
            if !value.is_empty() && !valid(value) {
                *counter += 1;
            }
        }
    }
    advisories
}
