//! hash-to-excel - file-hash listings to a styled Excel sheet
//!
//! Reads a CSV of file-hash records (file name in column 0, hash in column 1,
//! size in column 11) and produces:
//! - a single-sheet workbook with a sequence / file name / SHA-256 / size
//!   table, fixed column widths and bordered TH Sarabun New styling
//! - an optional plain-text report with one Thai sentence per file
//!
//! Rows with too few fields are skipped and reported back to the caller.

pub mod convert;
pub mod error;
pub mod parse;
pub mod report;
pub mod sheet;
pub mod styles;
pub mod types;

pub use convert::{convert, convert_with, write_spreadsheet, SheetStats};
pub use error::{Error, ErrorKind, Result};
pub use parse::{find_first_csv, format_file_name, format_records, load_records, split_hash};
pub use report::write_text_report;
pub use sheet::{CellRange, Sheet, SheetWriter, StyleId};
pub use styles::StyleSpec;
pub use types::{
    CellData, ConvertOptions, ConvertSummary, FormattedRow, Record, RowNumbering, SkippedRecord,
};
