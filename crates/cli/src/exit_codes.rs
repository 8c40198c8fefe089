//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part of
//! the shell contract; scripts rely on them.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success                                              |
//! | 1    | General error (unspecified)                          |
//! | 2    | CLI usage error (bad args)                           |
//! | 3    | Required input table missing or unreadable           |
//! | 4    | Merge/schema error (missing column, empty table)     |
//!
//! Per-record conditions (missing file, unresolved pattern, blank
//! reference) never exit nonzero; they are logged to the reports and the
//! run continues.

/// Success - run completed; outcomes are in the report files.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure. Prefer a specific code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// A required export table is missing or unreadable after the encoding
/// fallback. Fatal before any deletion step.
pub const EXIT_TABLE: u8 = 3;

/// The merge failed (missing column, empty required table).
pub const EXIT_SCHEMA: u8 = 4;
