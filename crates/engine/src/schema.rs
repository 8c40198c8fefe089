//! Canonical column names for the export tables.
//!
//! One canonical schema is assumed; per-format column renaming happens in
//! the loader that produced the tables, not here.

/// Constituent identifier, joins address ⋈ correspondence.
pub const CONSTITUENT_ID: &str = "constituent_id";
/// Correspondence-event identifier, joins header ⋈ documents ⋈ text.
pub const CORRESPONDENCE_ID: &str = "correspondence_id";
/// Free-form classification code, joins header ⋈ code dictionary.
pub const CODE: &str = "code";
/// Human-readable description of the code; doubles as the topic label.
pub const CODE_DESCRIPTION: &str = "code_description";
/// Declared relative document path (may be blank).
pub const DOCUMENT_REF: &str = "document_ref";
/// Free text associated with the interaction.
pub const FREE_TEXT: &str = "free_text";
pub const DATE_IN: &str = "date_in";
pub const CITY: &str = "city";
pub const STATE: &str = "state";
pub const ZIP: &str = "zip";

/// Text fields the classifier searches, in search order.
pub const CLASSIFIER_FIELDS: [&str; 3] = [DOCUMENT_REF, FREE_TEXT, CODE_DESCRIPTION];

/// PII columns stripped from each table before any join. Names, street
/// address lines, and organization never survive past the loader-to-merge
/// boundary; city/state/zip are non-identifying geography and stay.
pub const PII_COLUMNS: [&str; 8] = [
    "prefix",
    "first_name",
    "middle_name",
    "last_name",
    "suffix",
    "organization",
    "address_1",
    "address_2",
];

/// Column order of the merged table, after key columns are dropped.
pub const MERGED_COLUMNS: [&str; 8] = [
    CODE,
    CODE_DESCRIPTION,
    DOCUMENT_REF,
    FREE_TEXT,
    DATE_IN,
    CITY,
    STATE,
    ZIP,
];
