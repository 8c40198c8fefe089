//! The three pipeline commands: appraise, reconcile, topics.
//!
//! Each prints a short mode banner to stderr and otherwise communicates
//! outcomes through the generated report files (and `--json` on stdout).

use std::path::{Path, PathBuf};

use serde::Serialize;

use curator_engine::categories::RULES;
use curator_engine::classify::classify_all;
use curator_engine::merge::merge_export;
use curator_engine::model::MergedTable;
use curator_engine::reconcile::reconcile;
use curator_engine::schema;
use curator_io::reports::{self, FormatAdvisories};
use curator_io::{delete_appraised, load_export, materialize_topics, walk_documents, IoError};

use crate::exit_codes::{EXIT_ERROR, EXIT_SCHEMA, EXIT_TABLE};
use crate::CliError;

pub const REVIEW_LOG: &str = "appraisal_check_log.csv";
pub const DELETE_LOG: &str = "appraisal_delete_log.csv";
pub const MATCHING_REPORT: &str = "usability_report_matching.csv";
pub const DETAILS_REPORT: &str = "usability_report_details.csv";
pub const NOT_FOUND_REPORT: &str = "topic_sort_file_not_found.csv";

fn cli_err(err: IoError) -> CliError {
    let code = match &err {
        IoError::Table { .. } => EXIT_TABLE,
        IoError::Engine(_) => EXIT_SCHEMA,
        IoError::Write { .. } => EXIT_ERROR,
    };
    CliError { code, message: err.to_string(), hint: None }
}

/// Load and merge the export. Any failure here is fatal; merge correctness
/// is a prerequisite for safe deletion.
fn load_merged(export_root: &Path) -> Result<MergedTable, CliError> {
    let tables = load_export(export_root).map_err(cli_err)?;
    merge_export(tables).map_err(|e| cli_err(IoError::Engine(e)))
}

fn out_dir(export_root: &Path, out: Option<PathBuf>) -> Result<PathBuf, CliError> {
    let dir = out.unwrap_or_else(|| export_root.to_path_buf());
    std::fs::create_dir_all(&dir).map_err(|e| CliError {
        code: EXIT_ERROR,
        message: format!("cannot create output directory {}: {e}", dir.display()),
        hint: None,
    })?;
    Ok(dir)
}

fn emit_json<T: Serialize>(summary: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(summary).map_err(|e| CliError {
        code: EXIT_ERROR,
        message: format!("JSON serialization error: {e}"),
        hint: None,
    })?;
    println!("{json}");
    Ok(())
}

// ---------------------------------------------------------------------------
// appraise
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct AppraiseSummary {
    records: usize,
    tagged: usize,
    review: usize,
    deleted: usize,
    retained: usize,
    skipped_blank: usize,
    unresolved: usize,
    missing: usize,
    dry_run: bool,
    advisories: FormatAdvisories,
}

pub fn cmd_appraise(
    export_root: PathBuf,
    out: Option<PathBuf>,
    log_date: Option<chrono::NaiveDate>,
    dry_run: bool,
    json: bool,
) -> Result<(), CliError> {
    eprintln!(
        "curator appraise — {}{}",
        export_root.display(),
        if dry_run { " (dry run)" } else { "" }
    );

    let merged = load_merged(&export_root)?;
    let classification = classify_all(&merged, RULES);
    let out = out_dir(&export_root, out)?;

    reports::write_review_log(&out.join(REVIEW_LOG), &merged, &classification).map_err(cli_err)?;
    reports::write_delete_log(&out.join(DELETE_LOG), &merged, &classification).map_err(cli_err)?;

    let log_date = log_date.unwrap_or_else(|| chrono::Local::now().date_naive());
    let deletion =
        delete_appraised(&merged, &classification, &export_root, &out, log_date, dry_run)
            .map_err(cli_err)?;

    let summary = AppraiseSummary {
        records: merged.rows.len(),
        tagged: classification.tags.len(),
        review: classification.review.len(),
        deleted: deletion.deleted,
        retained: deletion.retained,
        skipped_blank: deletion.skipped_blank,
        unresolved: deletion.unresolved,
        missing: deletion.missing,
        dry_run,
        advisories: reports::format_advisories(&merged),
    };

    eprintln!(
        "{} records — {} tagged, {} for review; {} deleted, {} retained, {} unresolved, {} missing",
        summary.records,
        summary.tagged,
        summary.review,
        summary.deleted,
        summary.retained,
        summary.unresolved,
        summary.missing,
    );
    eprintln!("audit log: {}", deletion.log_path.display());

    if json {
        emit_json(&summary)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// reconcile
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ReconcileSummary {
    records: usize,
    matched: usize,
    metadata_only: usize,
    directory_only: usize,
    metadata_blank: usize,
}

pub fn cmd_reconcile(
    export_root: PathBuf,
    out: Option<PathBuf>,
    json: bool,
) -> Result<(), CliError> {
    eprintln!("curator reconcile — {}", export_root.display());

    let merged = load_merged(&export_root)?;
    let inventory = walk_documents(&export_root).map_err(cli_err)?;
    let declared = merged.rows.iter().map(|r| merged.field(r, schema::DOCUMENT_REF));
    let result = reconcile(declared, &inventory, &export_root);
    let out = out_dir(&export_root, out)?;

    reports::write_reconciliation(
        &out.join(MATCHING_REPORT),
        &out.join(DETAILS_REPORT),
        &result,
    )
    .map_err(cli_err)?;

    let summary = ReconcileSummary {
        records: merged.rows.len(),
        matched: result.match_count(),
        metadata_only: result.metadata_only.len(),
        directory_only: result.directory_only.len(),
        metadata_blank: result.blank,
    };

    eprintln!(
        "{} records — {} matched, {} metadata-only, {} directory-only, {} blank",
        summary.records,
        summary.matched,
        summary.metadata_only,
        summary.directory_only,
        summary.metadata_blank,
    );

    if json {
        emit_json(&summary)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// topics
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct TopicsSummary {
    topics: usize,
    copied: usize,
    not_found: usize,
}

pub fn cmd_topics(export_root: PathBuf, out: Option<PathBuf>, json: bool) -> Result<(), CliError> {
    eprintln!("curator topics — {}", export_root.display());

    let merged = load_merged(&export_root)?;
    let out = out_dir(&export_root, out)?;
    let outcome = materialize_topics(&merged, &export_root, &out).map_err(cli_err)?;

    reports::write_not_found(&out.join(NOT_FOUND_REPORT), &outcome.not_found).map_err(cli_err)?;

    let summary = TopicsSummary {
        topics: outcome.topics,
        copied: outcome.copied,
        not_found: outcome.not_found.len(),
    };

    eprintln!(
        "{} topic folder(s), {} file(s) copied, {} not found",
        summary.topics, summary.copied, summary.not_found,
    );

    if json {
        emit_json(&summary)?;
    }
    Ok(())
}
