//! Topic grouping and folder-name sanitization for the review tree.

use std::collections::BTreeMap;

use crate::model::{MergedTable, RecordId};
use crate::resolve::{is_template, leading_folder};
use crate::schema;

/// Replace filesystem-illegal characters with `_`, then strip leading and
/// trailing whitespace and period characters (illegal at the end of a
/// folder name on at least one target filesystem).
pub fn sanitize_folder_name(topic: &str) -> String {
    let replaced: String = topic
        .chars()
        .map(|c| match c {
            '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect();
    replaced
        .trim_matches(|c: char| c.is_whitespace() || c == '.')
        .to_string()
}

/// Group constituent-originated and outbound document references by their
/// code-description topic.
///
/// Skips blank references, form/template references, and rows without a
/// topic value (there is nothing to name the folder by).
pub fn group_by_topic(table: &MergedTable) -> BTreeMap<String, Vec<RecordId>> {
    let mut groups: BTreeMap<String, Vec<RecordId>> = BTreeMap::new();

    for row in &table.rows {
        let doc_ref = table.field(row, schema::DOCUMENT_REF);
        if doc_ref.trim().is_empty() || is_template(doc_ref) {
            continue;
        }
        let folder = leading_folder(doc_ref).to_ascii_lowercase();
        if !folder.starts_with("in-") && !folder.starts_with("out-") {
            continue;
        }
        let topic = table.field(row, schema::CODE_DESCRIPTION).trim();
        if topic.is_empty() {
            continue;
        }
        groups.entry(topic.to_string()).or_default().push(row.id);
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MergedRow;

    #[test]
    fn illegal_characters_become_underscores() {
        assert_eq!(
            sanitize_folder_name("A\\B/C:D*E?F\"G<H>I|J"),
            "A_B_C_D_E_F_G_H_I_J"
        );
    }

    #[test]
    fn trailing_space_and_period_stripped() {
        assert_eq!(sanitize_folder_name("dog. "), "dog");
        assert_eq!(sanitize_folder_name("  agriculture.  "), "agriculture");
    }

    #[test]
    fn interior_periods_survive() {
        assert_eq!(sanitize_folder_name("H.R. 1776"), "H.R. 1776");
    }

    fn table(rows: &[(&str, &str)]) -> MergedTable {
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
    fn groups_constituent_and_outbound_documents() {
        let t = table(&[
            ("in-email\\1.txt", "Agriculture"),
            ("out-custom\\2.txt", "Agriculture"),
            ("in-letter\\3.txt", "Veterans"),
        ]);
        let groups = group_by_topic(&t);
        assert_eq!(groups["Agriculture"], vec![RecordId(0), RecordId(1)]);
        assert_eq!(groups["Veterans"], vec![RecordId(2)]);
    }

    #[test]
    fn templates_blank_refs_and_blank_topics_skipped() {
        let t = table(&[
            ("form-attachments\\ack.doc", "Agriculture"),
            ("", "Agriculture"),
            ("in-email\\1.txt", ""),
            ("casework\\4.txt", "Agriculture"),
        ]);
        assert!(group_by_topic(&t).is_empty());
    }
}
