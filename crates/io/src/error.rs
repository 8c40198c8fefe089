use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum IoError {
    /// A required export table is missing or unreadable. Fatal: the run
    /// aborts before any deletion step.
    Table { path: PathBuf, message: String },
    /// A report or audit file could not be written.
    Write { path: PathBuf, message: String },
    /// Merge/schema failure from the engine.
    Engine(curator_engine::EngineError),
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table { path, message } => {
                write!(f, "cannot read table {}: {message}", path.display())
            }
            Self::Write { path, message } => {
                write!(f, "cannot write {}: {message}", path.display())
            }
            Self::Engine(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for IoError {}

impl From<curator_engine::EngineError> for IoError {
    fn from(e: curator_engine::EngineError) -> Self {
        Self::Engine(e)
    }
}
