//! Recursive inventory of the export's `documents/` subtree.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::IoError;

/// Walk `export_root/documents` and collect every file path. A missing
/// documents directory yields an empty inventory (everything declared in
/// metadata then reconciles as metadata-only), not an error.
pub fn walk_documents(export_root: &Path) -> Result<BTreeSet<PathBuf>, IoError> {
    let root = export_root.join("documents");
    let mut files = BTreeSet::new();
    if root.is_dir() {
        walk(&root, &mut files)?;
    }
    Ok(files)
}

fn walk(dir: &Path, files: &mut BTreeSet<PathBuf>) -> Result<(), IoError> {
    let entries = std::fs::read_dir(dir).map_err(|e| IoError::Table {
        path: dir.to_path_buf(),
        message: e.to_string(),
    })?;
    for entry in entries {
        let entry = entry.map_err(|e| IoError::Table {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;
        let path = entry.path();
        if path.is_dir() {
            walk(&path, files)?;
        } else {
            files.insert(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let docs = dir.path().join("documents");
        std::fs::create_dir_all(docs.join("in-email")).unwrap();
        std::fs::create_dir_all(docs.join("casework").join("1998")).unwrap();
        std::fs::write(docs.join("in-email").join("1.txt"), "x").unwrap();
        std::fs::write(docs.join("casework").join("1998").join("45.txt"), "y").unwrap();

        let files = walk_documents(dir.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.contains(&docs.join("casework").join("1998").join("45.txt")));
    }

    #[test]
    fn missing_documents_tree_is_empty_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let files = walk_documents(dir.path()).unwrap();
        assert!(files.is_empty());
    }
}
