//! Export table loading.
//!
//! Tables are tab-delimited with a header row. Export encodings are not
//! guaranteed to be compliant, so reading falls back from UTF-8 to lossy
//! Windows-1252 decoding with a stderr warning rather than failing the run.

use std::io::Read;
use std::path::Path;

use curator_engine::model::{ExportTables, SourceTable};

use crate::error::IoError;

/// Canonical table file names inside the export directory.
pub const TABLE_FILES: [(&str, &str); 6] = [
    ("address", "address.txt"),
    ("correspondence", "correspondence.txt"),
    ("code", "code.txt"),
    ("documents", "documents.txt"),
    ("text", "text.txt"),
    ("code_dictionary", "code_dictionary.txt"),
];

/// Read a file as UTF-8, falling back to Windows-1252 when the bytes are
/// not valid UTF-8 (common for legacy office exports). The fallback warns
/// on stderr; it is never silent.
pub fn read_file_as_utf8(path: &Path) -> Result<String, IoError> {
    let table_err = |message: String| IoError::Table { path: path.to_path_buf(), message };

    let mut file = std::fs::File::open(path).map_err(|e| table_err(e.to_string()))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| table_err(e.to_string()))?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            eprintln!(
                "warning: {} is not valid UTF-8, re-reading as Windows-1252",
                path.display()
            );
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

/// Load one tab-delimited table. Export rows can be ragged, so the reader
/// is flexible; `SourceTable` pads rows to the header width.
pub fn read_table(path: &Path, name: &str) -> Result<SourceTable, IoError> {
    let content = read_file_as_utf8(path)?;
    let table_err = |message: String| IoError::Table { path: path.to_path_buf(), message };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| table_err(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| table_err(e.to_string()))?;
        rows.push(record.iter().map(|f| f.to_string()).collect());
    }

    Ok(SourceTable::new(name, columns, rows))
}

/// Load all six canonical tables from the export directory. A missing or
/// unreadable table is fatal; merge correctness is a prerequisite for safe
/// deletion.
pub fn load_export(export_root: &Path) -> Result<ExportTables, IoError> {
    let mut loaded = Vec::with_capacity(TABLE_FILES.len());
    for (name, file) in TABLE_FILES {
        loaded.push(read_table(&export_root.join(file), name)?);
    }
    let mut it = loaded.into_iter();
    Ok(ExportTables {
        address: it.next().unwrap(),
        correspondence: it.next().unwrap(),
        code: it.next().unwrap(),
        documents: it.next().unwrap(),
        text: it.next().unwrap(),
        code_dictionary: it.next().unwrap(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_tab_delimited_with_ragged_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.txt");
        std::fs::write(&path, "a\tb\tc\n1\t2\t3\n4\t5\n").unwrap();
        let table = read_table(&path, "t").unwrap();
        assert_eq!(table.columns, vec!["a", "b", "c"]);
        assert_eq!(table.rows[1], vec!["4".to_string(), "5".into(), "".into()]);
    }

    #[test]
    fn windows_1252_falls_back_instead_of_failing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.txt");
        let mut f = std::fs::File::create(&path).unwrap();
        // 0xE9 = é in Windows-1252, invalid as a lone UTF-8 byte.
        f.write_all(b"name\tcity\nRen\xe9\tQu\xe9bec\n").unwrap();
        let table = read_table(&path, "t").unwrap();
        assert_eq!(table.rows[0], vec!["René".to_string(), "Québec".into()]);
    }

    #[test]
    fn missing_table_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_table(&dir.path().join("absent.txt"), "absent").unwrap_err();
        assert!(err.to_string().contains("cannot read table"));
    }
}
