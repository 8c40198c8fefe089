//! Record merge: six per-table exports into one row per correspondence
//! event (one row per document when an event carries several).
//!
//! PII columns are stripped from each table *before* any join so they never
//! reach the combined table at all.

use std::collections::HashMap;

use crate::error::EngineError;
use crate::model::{ExportTables, MergedRow, MergedTable, RecordId, SourceTable};
use crate::schema;

/// Full outer join of two tables on string keys.
///
/// Every left row appears at least once; a left row with several key
/// matches on the right expands into one output row per match. Right rows
/// whose key never appears on the left still contribute a row with blank
/// left columns. Blank keys never join.
///
/// Right columns whose name already exists on the left are not duplicated;
/// the left value wins (the canonical schema only overlaps on join keys).
pub fn outer_join(
    left: &SourceTable,
    right: &SourceTable,
    left_key: &str,
    right_key: &str,
) -> Result<SourceTable, EngineError> {
    let lk = left.column_index(left_key).ok_or_else(|| EngineError::MissingColumn {
        table: left.name.clone(),
        column: left_key.into(),
    })?;
    let rk = right.column_index(right_key).ok_or_else(|| EngineError::MissingColumn {
        table: right.name.clone(),
        column: right_key.into(),
    })?;

    // Right columns carried into the output (key and duplicates excluded).
    let carried: Vec<usize> = right
        .columns
        .iter()
        .enumerate()
        .filter(|(i, c)| *i != rk && left.column_index(c).is_none())
        .map(|(i, _)| i)
        .collect();

    let mut columns = left.columns.clone();
    columns.extend(carried.iter().map(|&i| right.columns[i].clone()));

    let mut by_key: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, row) in right.rows.iter().enumerate() {
        let key = row[rk].trim();
        if !key.is_empty() {
            by_key.entry(key).or_default().push(i);
        }
    }

    let mut matched_right = vec![false; right.rows.len()];
    let mut rows = Vec::with_capacity(left.rows.len());

    for lrow in &left.rows {
        let key = lrow[lk].trim();
        match by_key.get(key).filter(|_| !key.is_empty()) {
            Some(indices) => {
                for &ri in indices {
                    matched_right[ri] = true;
                    let mut out = lrow.clone();
                    out.extend(carried.iter().map(|&ci| right.rows[ri][ci].clone()));
                    rows.push(out);
                }
            }
            None => {
                let mut out = lrow.clone();
                out.extend(carried.iter().map(|_| String::new()));
                rows.push(out);
            }
        }
    }

    // Right-only rows: blank left columns, key value carried into the
    // left key position so the identifier still contributes a row.
    for (ri, rrow) in right.rows.iter().enumerate() {
        if matched_right[ri] || rrow[rk].trim().is_empty() {
            continue;
        }
        let mut out = vec![String::new(); left.columns.len()];
        out[lk] = rrow[rk].clone();
        out.extend(carried.iter().map(|&ci| rrow[ci].clone()));
        rows.push(out);
    }

    Ok(SourceTable::new(format!("{}+{}", left.name, right.name), columns, rows))
}

/// Merge the full export into one combined record table.
///
/// Join chain: correspondence ⋈ address (constituent id) ⋈ classification
/// code (correspondence id) ⋈ code dictionary (code) ⋈ documents
/// (correspondence id, expanding one-to-many) ⋈ free text (correspondence
/// id). Key columns are dropped at the end; each surviving row receives a
/// stable synthetic `RecordId`.
pub fn merge_export(tables: ExportTables) -> Result<MergedTable, EngineError> {
    let ExportTables {
        mut address,
        mut correspondence,
        mut code,
        mut documents,
        mut text,
        mut code_dictionary,
    } = tables;

    if correspondence.rows.is_empty() {
        return Err(EngineError::EmptyTable(correspondence.name));
    }

    for t in [
        &mut address,
        &mut correspondence,
        &mut code,
        &mut documents,
        &mut text,
        &mut code_dictionary,
    ] {
        t.drop_columns(&schema::PII_COLUMNS);
        t.drop_blank_rows();
    }

    let mut combined = outer_join(&correspondence, &address, schema::CONSTITUENT_ID, schema::CONSTITUENT_ID)?;
    combined = outer_join(&combined, &code, schema::CORRESPONDENCE_ID, schema::CORRESPONDENCE_ID)?;
    combined = outer_join(&combined, &code_dictionary, schema::CODE, schema::CODE)?;
    combined = outer_join(&combined, &documents, schema::CORRESPONDENCE_ID, schema::CORRESPONDENCE_ID)?;
    combined = outer_join(&combined, &text, schema::CORRESPONDENCE_ID, schema::CORRESPONDENCE_ID)?;

    combined.drop_columns(&[schema::CONSTITUENT_ID, schema::CORRESPONDENCE_ID]);
    combined.drop_blank_rows();

    // Project onto the canonical merged column order. A column an upstream
    // table never provided stays blank for every row.
    let indices: Vec<Option<usize>> = schema::MERGED_COLUMNS
        .iter()
        .map(|c| combined.column_index(c))
        .collect();

    let rows = combined
        .rows
        .iter()
        .enumerate()
        .map(|(n, row)| MergedRow {
            id: RecordId(n),
            fields: indices
                .iter()
                .map(|idx| idx.map(|i| row[i].clone()).unwrap_or_default())
                .collect(),
        })
        .collect();

    Ok(MergedTable {
        columns: schema::MERGED_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows,
    })
}
