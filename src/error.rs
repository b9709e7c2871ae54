//! Error type shared by every stage of the conversion

use std::path::PathBuf;

/// Broad classification of an [`Error`], used by callers that only care
/// whether a failure was fatal and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Parse,
    NotFound,
    /// Record-level problem; the record is skipped and the run continues
    Validation,
    Style,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("error opening input file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("error reading directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write to file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("error reading the CSV file: {0}")]
    Csv(#[from] csv::Error),
    #[error("no CSV files found in {}", .0.display())]
    NotFound(PathBuf),
    #[error("record {position} has {found} fields, at least {required} required: {fields:?}")]
    InsufficientFields {
        position: usize,
        found: usize,
        required: usize,
        fields: Vec<String>,
    },
    #[error("invalid style: {0}")]
    Style(String),
    #[error("invalid cell range: {0}")]
    Range(String),
    #[error("failed to save workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Open { .. } | Error::Write { .. } => ErrorKind::Io,
            // discovery reports an unreadable directory the same as an empty one
            Error::ReadDir { .. } => ErrorKind::NotFound,
            Error::Csv(e) if e.is_io_error() => ErrorKind::Io,
            Error::Csv(_) => ErrorKind::Parse,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::InsufficientFields { .. } => ErrorKind::Validation,
            Error::Style(_) | Error::Range(_) => ErrorKind::Style,
            Error::Xlsx(rust_xlsxwriter::XlsxError::IoError(_)) => ErrorKind::Io,
            Error::Xlsx(_) => ErrorKind::Style,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
