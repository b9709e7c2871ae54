//! Input loading, discovery and record formatting

use crate::error::{Error, Result};
use crate::types::{
    FormattedRow, Record, RowNumbering, FILE_NAME_INDEX, FILE_SIZE_INDEX, HASH_BREAK, HASH_INDEX,
};
use csv::ReaderBuilder;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Read every record of a CSV file into memory.
///
/// No header row is assumed and rows may differ in length; short rows are
/// dealt with later by the formatter.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let records = csv_reader
        .records()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(records)
}

/// Return the first regular `.csv` file in `dir`, in directory listing order
pub fn find_first_csv(dir: &Path) -> Result<PathBuf> {
    let read_dir_err = |source| Error::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        let path = entry.path();
        if is_file && path.extension().is_some_and(|ext| ext == "csv") {
            return Ok(path);
        }
    }

    Err(Error::NotFound(dir.to_path_buf()))
}

/// Break a file name after its third `_`-separated segment.
///
/// `report_2024_01_15_final` becomes `report_2024_01\n_15_final` and
/// `a_b_c` becomes `a_b_c\n`. Names with fewer than three segments are
/// returned unchanged.
pub fn format_file_name(name: &str) -> String {
    let parts: Vec<&str> = name.split('_').collect();
    if parts.len() < 3 {
        return name.to_string();
    }
    let head = parts[..3].join("_");
    if parts.len() == 3 {
        return format!("{}\n", head);
    }
    format!("{}\n_{}", head, parts[3..].join("_"))
}

/// Split a hash in half with a CRLF between the halves.
/// The first half gets `floor(len / 2)` characters.
pub fn split_hash(hash: &str) -> String {
    let half = hash.chars().count() / 2;
    let mid = hash
        .char_indices()
        .nth(half)
        .map(|(idx, _)| idx)
        .unwrap_or(hash.len());
    format!("{}{}{}", &hash[..mid], HASH_BREAK, &hash[mid..])
}

/// Derive the display row for one record.
///
/// `position` is the 0-based index of the record in the input.
pub fn format_record(
    position: usize,
    record: &Record,
    min_fields: usize,
    sequence: u32,
    sheet_row: u32,
) -> Result<FormattedRow> {
    let required = min_fields.max(FILE_SIZE_INDEX + 1);
    if record.len() < required {
        return Err(Error::InsufficientFields {
            position: position + 1,
            found: record.len(),
            required,
            fields: record.iter().map(str::to_string).collect(),
        });
    }

    Ok(FormattedRow {
        sequence,
        sheet_row,
        file_name: format_file_name(&record[FILE_NAME_INDEX]),
        hash: split_hash(&record[HASH_INDEX]),
        file_size: record[FILE_SIZE_INDEX].to_string(),
    })
}

/// Lazy formatter over a slice of records. Yields one item per input record:
/// a row for records that pass, the validation error for those that don't.
pub struct FormattedRows<'a> {
    records: std::iter::Enumerate<std::slice::Iter<'a, Record>>,
    min_fields: usize,
    numbering: RowNumbering,
    retained: u32,
}

pub fn format_records(
    records: &[Record],
    min_fields: usize,
    numbering: RowNumbering,
) -> FormattedRows<'_> {
    FormattedRows {
        records: records.iter().enumerate(),
        min_fields,
        numbering,
        retained: 0,
    }
}

impl Iterator for FormattedRows<'_> {
    type Item = Result<FormattedRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let (position, record) = self.records.next()?;
        let sequence = match self.numbering {
            RowNumbering::Compact => self.retained + 1,
            RowNumbering::SourcePosition => match u32::try_from(position + 1) {
                Ok(seq) => seq,
                Err(_) => {
                    return Some(Err(Error::Range(format!(
                        "record {} exceeds the worksheet row limit",
                        position + 1
                    ))))
                }
            },
        };

        let row = format_record(position, record, self.min_fields, sequence, sequence);
        if row.is_ok() {
            self.retained += 1;
        }
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

/// Convert column letters (`A`, `D`, `AA`) to a 0-based column index
pub fn parse_column(letters: &str) -> Result<u16> {
    let letters = letters.trim().to_uppercase();
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(Error::Range(format!("invalid column '{}'", letters)));
    }
    let col = letters
        .chars()
        .try_fold(0u32, |acc, c| {
            let next = acc * 26 + (c as u32 - 'A' as u32 + 1);
            (next <= 16_384).then_some(next)
        })
        .ok_or_else(|| Error::Range(format!("column '{}' out of range", letters)))?;
    Ok((col - 1) as u16)
}
