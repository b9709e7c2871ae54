//! Plain-text companion report, one Thai sentence per retained record

use crate::error::{Error, Result};
use crate::types::{Record, FILE_NAME_INDEX, FILE_SIZE_INDEX, HASH_INDEX};
use std::fs;
use std::path::Path;

/// One report line for a file name and its hash
pub fn report_line(file_name: &str, hash: &str) -> String {
    format!(
        "รายละเอียดปรากฏตามไฟล์ประกอบรายงาน ชื่อไฟล์ {} ค่า Hash SHA256: {}",
        file_name, hash
    )
}

/// Lines for every record that has at least `min_fields` fields, in input order
pub fn report_lines(records: &[Record], min_fields: usize) -> impl Iterator<Item = String> + '_ {
    let required = min_fields.max(FILE_SIZE_INDEX + 1);
    records
        .iter()
        .filter(move |record| record.len() >= required)
        .map(|record| report_line(&record[FILE_NAME_INDEX], &record[HASH_INDEX]))
}

/// Write the newline-joined report to `path`, replacing any existing file.
/// Returns the number of lines written.
pub fn write_text_report(records: &[Record], min_fields: usize, path: &Path) -> Result<usize> {
    let lines: Vec<String> = report_lines(records, min_fields).collect();
    fs::write(path, lines.join("\n")).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(lines.len())
}
