//! Type definitions and fixed configuration for hash-to-excel

use std::path::PathBuf;

/// Column of the file name in an input record
pub const FILE_NAME_INDEX: usize = 0;
/// Column of the hash value in an input record
pub const HASH_INDEX: usize = 1;
/// Column of the file size in an input record
pub const FILE_SIZE_INDEX: usize = 11;

/// Records shorter than this are skipped
pub const DEFAULT_MIN_FIELDS: usize = 12;

pub const DEFAULT_OUTPUT: &str = "formatted_hash.xlsx";
pub const DEFAULT_REPORT: &str = "formatted_hash.txt";
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Header row labels, columns A-D
pub const HEADERS: [&str; 4] = ["ลำดับ", "File name", "SHA-256", "File size"];

pub const FONT_NAME: &str = "TH Sarabun New";
pub const FONT_SIZE: f64 = 16.0;

/// Line break inserted into hashes to force a wrap inside the cell
pub const HASH_BREAK: &str = "\r\n";

/// One parsed CSV row
pub type Record = csv::StringRecord;

/// Display-ready values derived from one retained record
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedRow {
    /// 1-based sequence number shown in column A
    pub sequence: u32,
    /// 0-based worksheet row the values land on
    pub sheet_row: u32,
    pub file_name: String,
    pub hash: String,
    pub file_size: String,
}

/// Value of a single worksheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellData {
    Number(f64),
    Text(String),
}

impl From<&str> for CellData {
    fn from(s: &str) -> Self {
        CellData::Text(s.to_string())
    }
}

impl From<String> for CellData {
    fn from(s: String) -> Self {
        CellData::Text(s)
    }
}

impl From<u32> for CellData {
    fn from(v: u32) -> Self {
        CellData::Number(f64::from(v))
    }
}

impl FormattedRow {
    /// Cells for columns A-D in order
    pub fn cells(&self) -> Vec<CellData> {
        vec![
            self.sequence.into(),
            self.file_name.as_str().into(),
            self.hash.as_str().into(),
            self.file_size.as_str().into(),
        ]
    }
}

/// How sequence numbers and sheet rows are assigned when records are skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowNumbering {
    /// Count retained records only: no gaps, sequence 1..=N
    #[default]
    Compact,
    /// Number by position among all input records, leaving a blank row per skip
    SourcePosition,
}

/// Settings for a single conversion run
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Explicit input CSV; `None` picks the first CSV in `search_dir`
    pub input: Option<PathBuf>,
    pub search_dir: PathBuf,
    pub output: PathBuf,
    /// Text report destination; `None` disables the report
    pub report: Option<PathBuf>,
    pub sheet_name: String,
    pub min_fields: usize,
    pub numbering: RowNumbering,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            input: None,
            search_dir: PathBuf::from("."),
            output: PathBuf::from(DEFAULT_OUTPUT),
            report: Some(PathBuf::from(DEFAULT_REPORT)),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            min_fields: DEFAULT_MIN_FIELDS,
            numbering: RowNumbering::default(),
        }
    }
}

/// A record left out of both outputs
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    /// 1-based position in the input
    pub position: usize,
    pub fields: Vec<String>,
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct ConvertSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub report: Option<PathBuf>,
    /// Total input records, including skipped ones
    pub records: usize,
    pub rows_written: u32,
    pub skipped: Vec<SkippedRecord>,
}
