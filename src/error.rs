use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("dataset not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed reading dataset {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing required column `{column}`")]
    MissingColumn { column: &'static str },

    #[error("line {line}: {message}")]
    Parse { line: u64, message: String },

    #[error("no World Cup final recorded for {year}")]
    LookupMiss { year: i32 },

    #[error("invalid input for {key}: expected {expected}")]
    InvalidInput { key: String, expected: &'static str },

    #[error("output {key} already has a callback bound to it")]
    DuplicateOutput { key: String },
}

impl DashboardError {
    /// True for errors raised while reading the input file; these are fatal at startup.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. }
                | Self::Io { .. }
                | Self::Csv(_)
                | Self::MissingColumn { .. }
                | Self::Parse { .. }
        )
    }
}
