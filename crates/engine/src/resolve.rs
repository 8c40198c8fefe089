//! Path resolver: declared document references → absolute locations.
//!
//! A declared reference is a structured relative path from a Windows-era
//! export (`\` separators). It must begin with one of the recognized
//! top-level folder names; anything else is surfaced as unresolved — a
//! mis-resolved path risks skipping a required deletion or deleting the
//! wrong file, so the resolver never guesses.

use std::path::{Path, PathBuf};

/// The recognized top-level document folders of the export.
pub const KNOWN_PREFIXES: [&str; 9] = [
    "in-email",
    "out-email",
    "in-letter",
    "out-custom",
    "in-attachments",
    "out-attachments",
    "form-letters",
    "form-attachments",
    "casework",
];

/// Prefixes denoting reusable form/template letters. Shared across many
/// constituents, never individually appraisable.
pub const TEMPLATE_PREFIXES: [&str; 2] = ["form-letters", "form-attachments"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathResolution {
    Resolved(PathBuf),
    /// Unknown leading folder: a new pattern, auditable, never guessed at.
    Unresolved,
}

/// First path component of a declared reference (up to the first `\` or `/`).
pub fn leading_folder(declared: &str) -> &str {
    declared
        .split(['\\', '/'])
        .next()
        .unwrap_or("")
        .trim()
}

/// True when the declared reference denotes a form/template letter.
pub fn is_template(declared: &str) -> bool {
    let folder = leading_folder(declared);
    TEMPLATE_PREFIXES.iter().any(|p| folder.eq_ignore_ascii_case(p))
}

/// Rewrite a declared reference to `export_root/documents/<declared>`,
/// or report it unresolved when the leading folder is unrecognized.
pub fn resolve(declared: &str, export_root: &Path) -> PathResolution {
    let folder = leading_folder(declared);
    if !KNOWN_PREFIXES.iter().any(|p| folder.eq_ignore_ascii_case(p)) {
        return PathResolution::Unresolved;
    }

    let mut path = export_root.join("documents");
    for component in declared.split(['\\', '/']) {
        let component = component.trim();
        if !component.is_empty() {
            path.push(component);
        }
    }
    PathResolution::Resolved(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_prefix_resolves_under_documents() {
        let r = resolve("in-email\\2.txt", Path::new("R"));
        assert_eq!(
            r,
            PathResolution::Resolved(PathBuf::from("R").join("documents").join("in-email").join("2.txt"))
        );
    }

    #[test]
    fn resolution_is_idempotent() {
        let root = Path::new("/export");
        let a = resolve("casework\\1998\\45.txt", root);
        let b = resolve("casework\\1998\\45.txt", root);
        assert_eq!(a, b);
        assert!(matches!(a, PathResolution::Resolved(_)));
    }

    #[test]
    fn unknown_prefix_is_never_guessed() {
        let root = Path::new("/export");
        assert_eq!(resolve("scans\\44.tif", root), PathResolution::Unresolved);
        assert_eq!(resolve("scans\\44.tif", root), PathResolution::Unresolved);
    }

    #[test]
    fn forward_slashes_accepted() {
        let r = resolve("out-custom/1.txt", Path::new("R"));
        assert_eq!(
            r,
            PathResolution::Resolved(PathBuf::from("R").join("documents").join("out-custom").join("1.txt"))
        );
    }

    #[test]
    fn template_detection() {
        assert!(is_template("form-attachments\\std_reply.doc"));
        assert!(is_template("Form-Letters\\ack.txt"));
        assert!(!is_template("in-email\\2.txt"));
        assert!(!is_template(""));
    }
}
