//! Category classifier: a two-tier keyword cascade run independently per
//! category over the full merged record set.
//!
//! Categories are not mutually exclusive across each other; a record
//! matching strong phrases from two categories carries both tags. Within a
//! category, a strong match removes the record from the weak-keyword pool,
//! so a record never appears in both the matched and review sets of the
//! same category.

use std::collections::BTreeMap;

use crate::categories::{Category, CategoryRule};
use crate::model::{MergedTable, RecordId};
use crate::schema;

/// Per-category result of one cascade pass.
#[derive(Debug)]
pub struct CategoryMatches {
    pub category: Category,
    pub matched: Vec<RecordId>,
    pub review: Vec<RecordId>,
}

/// Combined multi-label result: record identity → tags in rule order,
/// plus the review candidates from every category.
#[derive(Debug, Default)]
pub struct Classification {
    pub tags: BTreeMap<RecordId, Vec<Category>>,
    pub review: Vec<(RecordId, Category)>,
}

impl Classification {
    /// Records carrying at least one tag, in record order.
    pub fn tagged_records(&self) -> impl Iterator<Item = (RecordId, &[Category])> {
        self.tags.iter().map(|(id, tags)| (*id, tags.as_slice()))
    }
}

fn record_matches(table: &MergedTable, row: &crate::model::MergedRow, phrase: &str) -> bool {
    let needle = phrase.to_lowercase();
    schema::CLASSIFIER_FIELDS.iter().any(|field| {
        let value = table.field(row, field);
        // Blank fields never match; they are not wildcards.
        !value.trim().is_empty() && value.to_lowercase().contains(&needle)
    })
}

/// Run one category's cascade over the full record set.
pub fn classify_category(table: &MergedTable, rule: &CategoryRule) -> CategoryMatches {
    let mut matched = Vec::new();
    let mut pool = Vec::new();

    for row in &table.rows {
        if rule.strong.iter().any(|p| record_matches(table, row, p)) {
            matched.push(row.id);
        } else {
            pool.push(row);
        }
    }

    let review = pool
        .into_iter()
        .filter(|row| record_matches(table, row, rule.weak))
        .map(|row| row.id)
        .collect();

    CategoryMatches { category: rule.category, matched, review }
}

/// Evaluate every rule independently and union the tags per record.
/// Tag order within a record follows rule declaration order, so combined
/// labels are deterministic.
pub fn classify_all(table: &MergedTable, rules: &[CategoryRule]) -> Classification {
    let mut result = Classification::default();

    for rule in rules {
        let matches = classify_category(table, rule);
        for id in matches.matched {
            result.tags.entry(id).or_default().push(rule.category);
        }
        for id in matches.review {
            result.review.push((id, rule.category));
        }
    }

    result
}
