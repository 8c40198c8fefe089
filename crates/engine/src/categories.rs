//! The fixed, hand-curated appraisal categories.
//!
//! Curated from the appraisal policy, not user-configurable at runtime.
//! Strong phrases auto-classify; the single weak keyword only routes a
//! record to manual review ("flag, don't guess"). Matching is
//! case-insensitive substring containment, so "recommendation" also covers
//! "recommendations".

use serde::Serialize;

/// Closed set of appraisal categories. A record may carry several;
/// combined labels join tags with `|` in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    AcademyApplication,
    Casework,
    JobApplication,
    Recommendation,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Self::AcademyApplication => "Academy_Application",
            Self::Casework => "Casework",
            Self::JobApplication => "Job_Application",
            Self::Recommendation => "Recommendation",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Join a tag set into the combined label, preserving the given order.
/// Category names never contain `|`, so no escaping is needed.
pub fn combined_label(categories: &[Category]) -> String {
    categories
        .iter()
        .map(Category::label)
        .collect::<Vec<_>>()
        .join("|")
}

pub struct CategoryRule {
    pub category: Category,
    /// High-confidence phrases: any substring hit auto-classifies.
    pub strong: &'static [&'static str],
    /// Low-confidence keyword: hits go to the review log only.
    pub weak: &'static str,
}

pub const RULES: &[CategoryRule] = &[
    CategoryRule {
        category: Category::AcademyApplication,
        strong: &[
            "academy nomination",
            "academy application",
            "service academy",
            "west point",
            "naval academy",
            "air force academy",
            "merchant marine academy",
        ],
        weak: "academy",
    },
    CategoryRule {
        category: Category::Casework,
        strong: &["casework", "case work", "constituent case", "case file"],
        weak: "case",
    },
    CategoryRule {
        category: Category::JobApplication,
        strong: &[
            "job application",
            "employment application",
            "application for employment",
            "resume",
            "internship application",
        ],
        weak: "job",
    },
    CategoryRule {
        category: Category::Recommendation,
        strong: &["recommendation", "letter of reference", "recommending"],
        weak: "reference",
    },
];
