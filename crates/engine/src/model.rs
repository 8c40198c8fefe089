use serde::Serialize;

// ---------------------------------------------------------------------------
// Source tables
// ---------------------------------------------------------------------------

/// One export table in memory: ordered column names plus string rows.
///
/// Rows are padded/truncated to the column count on construction, so every
/// accessor can index by column position without bounds surprises.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SourceTable {
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut r| {
                r.resize(width, String::new());
                r
            })
            .collect();
        Self { name: name.into(), columns, rows }
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Drop the named columns wherever they exist. Absent names are ignored
    /// (not every export format carries every PII column).
    pub fn drop_columns(&mut self, names: &[&str]) {
        let keep: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| !names.contains(&c.as_str()))
            .map(|(i, _)| i)
            .collect();
        self.columns = keep.iter().map(|&i| self.columns[i].clone()).collect();
        for row in &mut self.rows {
            let kept: Vec<String> = keep.iter().map(|&i| std::mem::take(&mut row[i])).collect();
            *row = kept;
        }
    }

    /// Discard rows blank across every column (artifact of some exports).
    pub fn drop_blank_rows(&mut self) {
        self.rows.retain(|r| r.iter().any(|f| !f.trim().is_empty()));
    }
}

/// The six canonical export tables consumed by the merge.
pub struct ExportTables {
    pub address: SourceTable,
    pub correspondence: SourceTable,
    pub code: SourceTable,
    pub documents: SourceTable,
    pub text: SourceTable,
    pub code_dictionary: SourceTable,
}

// ---------------------------------------------------------------------------
// Merged output
// ---------------------------------------------------------------------------

/// Stable synthetic identity assigned to each merged row. Classification
/// tags records by id, never by row-content equality — two physical records
/// sharing all displayed columns remain distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RecordId(pub usize);

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct MergedRow {
    pub id: RecordId,
    pub fields: Vec<String>,
}

/// The merged record table. PII columns are gone by construction; merge key
/// columns are dropped after the join.
#[derive(Debug, Clone)]
pub struct MergedTable {
    pub columns: Vec<String>,
    pub rows: Vec<MergedRow>,
}

impl MergedTable {
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Field value by column name, or "" when the column is absent.
    pub fn field<'a>(&self, row: &'a MergedRow, column: &str) -> &'a str {
        self.column_index(column)
            .and_then(|i| row.fields.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn row(&self, id: RecordId) -> Option<&MergedRow> {
        self.rows.iter().find(|r| r.id == id)
    }
}
