use std::fmt;

#[derive(Debug)]
pub enum EngineError {
    /// A required column is absent from an export table.
    MissingColumn { table: String, column: String },
    /// A required table arrived with no rows at all.
    EmptyTable(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColumn { table, column } => {
                write!(f, "table '{table}': missing column '{column}'")
            }
            Self::EmptyTable(table) => write!(f, "table '{table}' has no rows"),
        }
    }
}

impl std::error::Error for EngineError {}
