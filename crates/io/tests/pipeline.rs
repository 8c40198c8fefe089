//! End-to-end pipeline runs against a synthetic export directory.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use curator_engine::categories::{combined_label, RULES};
use curator_engine::classify::classify_all;
use curator_engine::merge::merge_export;
use curator_engine::reconcile::reconcile;
use curator_engine::schema;
use curator_io::{delete_appraised, load_export, materialize_topics, walk_documents};

fn write_tables(root: &Path) {
    let tables: &[(&str, &str)] = &[
        (
            "address.txt",
            "constituent_id\tfirst_name\tlast_name\taddress_1\tcity\tstate\tzip\n\
             c1\tPat\tDoe\t1 Main St\tSpringfield\tIL\t62701\n\
             c2\tSam\tRoe\t2 Oak Ave\tPeoria\tIL\t61602\n",
        ),
        (
            "correspondence.txt",
            "correspondence_id\tconstituent_id\tdate_in\n\
             m1\tc1\t1998-03-14\n\
             m2\tc2\t1998-04-02\n\
             m3\tc1\t1998-05-20\n",
        ),
        (
            "code.txt",
            "correspondence_id\tcode\nm1\tREC\nm2\tAGR\nm3\tCAS\n",
        ),
        (
            "documents.txt",
            "correspondence_id\tdocument_ref\n\
             m1\tout-custom\\1.txt\n\
             m2\tin-email\\2.txt\n\
             m3\tform-attachments\\std_reply.doc\n",
        ),
        (
            "text.txt",
            "correspondence_id\tfree_text\n\
             m1\trequests a letter of recommendation\n\
             m2\tconcerns about soybean prices\n\
             m3\tcasework referral for passport help\n",
        ),
        (
            "code_dictionary.txt",
            "code\tcode_description\nREC\tRecommendations\nAGR\tAgriculture\nCAS\tCasework\n",
        ),
    ];
    for (name, content) in tables {
        std::fs::write(root.join(name), content).unwrap();
    }
}

fn write_doc(root: &Path, rel: &[&str], content: &str) -> PathBuf {
    let mut path = root.join("documents");
    for c in rel {
        path.push(c);
    }
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).unwrap();
    path
}

fn log_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1999, 6, 1).unwrap()
}

#[test]
fn recommendation_record_is_classified_and_its_file_deleted() {
    let dir = tempfile::tempdir().unwrap();
    write_tables(dir.path());
    let target = write_doc(dir.path(), &["out-custom", "1.txt"], "please recommend me");
    let template = write_doc(dir.path(), &["form-attachments", "std_reply.doc"], "form");

    let merged = merge_export(load_export(dir.path()).unwrap()).unwrap();
    let classification = classify_all(&merged, RULES);

    let rec = merged
        .rows
        .iter()
        .find(|r| merged.field(r, schema::DOCUMENT_REF) == "out-custom\\1.txt")
        .unwrap();
    assert_eq!(combined_label(&classification.tags[&rec.id]), "Recommendation");

    let outcome = delete_appraised(
        &merged,
        &classification,
        dir.path(),
        dir.path(),
        log_date(),
        false,
    )
    .unwrap();

    assert!(!target.exists(), "appraised file is removed");
    assert!(template.exists(), "classified template is retained");
    assert_eq!(outcome.deleted, 1);
    assert_eq!(outcome.retained, 1);
}

#[test]
fn missing_file_logs_filenotfound_and_run_continues() {
    let dir = tempfile::tempdir().unwrap();
    write_tables(dir.path());
    // out-custom\1.txt is never written; in-email\2.txt exists but its
    // record (Agriculture) carries no tag, so only m1's deletion runs.

    let merged = merge_export(load_export(dir.path()).unwrap()).unwrap();
    let classification = classify_all(&merged, RULES);
    let outcome = delete_appraised(
        &merged,
        &classification,
        dir.path(),
        dir.path(),
        log_date(),
        false,
    )
    .unwrap();

    assert_eq!(outcome.missing, 1);
    let log = std::fs::read_to_string(&outcome.log_path).unwrap();
    assert!(log.contains("Cannot delete: FileNotFoundError"));
}

#[test]
fn reconciliation_buckets_the_synthetic_export() {
    let dir = tempfile::tempdir().unwrap();
    write_tables(dir.path());
    write_doc(dir.path(), &["in-email", "2.txt"], "x");
    let stray = write_doc(dir.path(), &["in-letter", "stray.txt"], "y");

    let merged = merge_export(load_export(dir.path()).unwrap()).unwrap();
    let inventory = walk_documents(dir.path()).unwrap();
    let declared = merged.rows.iter().map(|r| merged.field(r, schema::DOCUMENT_REF));
    let result = reconcile(declared, &inventory, dir.path());

    assert_eq!(result.match_count(), 1);
    // out-custom\1.txt and form-attachments\std_reply.doc are declared but absent.
    assert_eq!(result.metadata_only.len(), 2);
    assert_eq!(result.directory_only, vec![stray]);
    assert_eq!(result.blank, 0);
}

#[test]
fn topic_tree_materializes_and_prunes() {
    let dir = tempfile::tempdir().unwrap();
    write_tables(dir.path());
    write_doc(dir.path(), &["in-email", "2.txt"], "soybeans");
    // m1's out-custom\1.txt is missing: the Recommendations folder must
    // not survive as an empty artifact.

    let merged = merge_export(load_export(dir.path()).unwrap()).unwrap();
    let outcome = materialize_topics(&merged, dir.path(), dir.path()).unwrap();

    assert_eq!(outcome.topics, 1);
    assert_eq!(outcome.copied, 1);
    assert_eq!(
        outcome.not_found,
        vec![("Recommendations".to_string(), "out-custom\\1.txt".to_string())]
    );

    let base = dir.path().join("Correspondence_by_Topic");
    assert!(base.join("Agriculture").join("2.txt").exists());
    assert!(!base.join("Recommendations").exists());
}
