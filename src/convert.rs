//! Sheet layout and the end-to-end conversion run

use crate::error::{Error, Result};
use crate::parse::{find_first_csv, format_records, load_records, parse_column};
use crate::report::write_text_report;
use crate::sheet::{CellRange, Sheet, SheetWriter};
use crate::styles::{column_widths, StyleSpec};
use crate::types::{
    CellData, ConvertOptions, ConvertSummary, FormattedRow, RowNumbering, SkippedRecord, HEADERS,
};
use tracing::{debug, info, warn};

/// Last column index of the layout (column D)
const LAST_COL: u16 = (HEADERS.len() - 1) as u16;

/// What [`write_spreadsheet`] put on the sheet
#[derive(Debug, Clone, Default)]
pub struct SheetStats {
    pub rows_written: u32,
    /// 0-based index of the last styled data row; 0 when only the header exists
    pub last_row: u32,
    pub skipped: Vec<SkippedRecord>,
}

/// Lay out the header, data rows, column widths and styles on `sheet`.
///
/// Records that fail validation are logged, passed to `on_skip` as they are
/// met and collected in the returned stats; any other error aborts. Under
/// [`RowNumbering::SourcePosition`] the rows of skipped records stay blank
/// but are styled like data rows.
pub fn write_spreadsheet<W, I, F>(
    sheet: &mut W,
    rows: I,
    numbering: RowNumbering,
    mut on_skip: F,
) -> Result<SheetStats>
where
    W: SheetWriter,
    I: IntoIterator<Item = Result<FormattedRow>>,
    F: FnMut(&SkippedRecord),
{
    sheet.write_row(0, HEADERS.iter().map(|&h| CellData::from(h)).collect())?;

    let mut stats = SheetStats::default();
    for row in rows {
        match row {
            Ok(row) => {
                sheet.write_row(row.sheet_row, row.cells())?;
                stats.rows_written += 1;
                stats.last_row = stats.last_row.max(row.sheet_row);
            }
            Err(Error::InsufficientFields {
                position,
                found,
                required,
                fields,
            }) => {
                warn!(position, found, required, "skipping record due to insufficient fields");
                if numbering == RowNumbering::SourcePosition {
                    // 1-based input position doubles as the 0-based sheet row
                    let row = u32::try_from(position).map_err(|_| {
                        Error::Range(format!("record {} exceeds the worksheet row limit", position))
                    })?;
                    stats.last_row = stats.last_row.max(row);
                }
                let skipped = SkippedRecord { position, fields };
                on_skip(&skipped);
                stats.skipped.push(skipped);
            }
            Err(err) => return Err(err),
        }
    }

    for (letter, width) in column_widths() {
        sheet.set_column_width(parse_column(letter)?, width)?;
    }

    apply_styles(sheet, stats.last_row)?;
    Ok(stats)
}

/// Style the header row and data rows 1..=last_row (0-based)
fn apply_styles<W: SheetWriter>(sheet: &mut W, last_row: u32) -> Result<()> {
    let header = sheet.define_style(StyleSpec::header())?;
    let index = sheet.define_style(StyleSpec::index())?;
    let content = sheet.define_style(StyleSpec::content())?;
    let size = sheet.define_style(StyleSpec::size())?;

    sheet.apply_style(CellRange::new(0, 0, 0, LAST_COL)?, header)?;

    if last_row == 0 {
        return Ok(());
    }
    sheet.apply_style(CellRange::new(1, 0, last_row, 0)?, index)?;
    sheet.apply_style(CellRange::new(1, 1, last_row, 2)?, content)?;
    sheet.apply_style(CellRange::new(1, LAST_COL, last_row, LAST_COL)?, size)?;
    Ok(())
}

/// Run a full conversion: resolve the input, load it, lay out the sheet,
/// save the workbook and, when configured, the text report.
///
/// Nothing is written to disk unless the input was found and parsed. A
/// failure while saving may leave earlier outputs in place.
pub fn convert(options: &ConvertOptions) -> Result<ConvertSummary> {
    convert_with(options, |_| {})
}

/// [`convert`], calling `on_skip` for each skipped record before any output
/// is written, so skips are reported even when saving fails.
pub fn convert_with<F>(options: &ConvertOptions, on_skip: F) -> Result<ConvertSummary>
where
    F: FnMut(&SkippedRecord),
{
    debug!("resolving input");
    let input = match &options.input {
        Some(path) => path.clone(),
        None => find_first_csv(&options.search_dir)?,
    };

    debug!(input = %input.display(), "loading records");
    let records = load_records(&input)?;

    debug!(records = records.len(), "formatting");
    let mut sheet = Sheet::new(&options.sheet_name);
    let stats = write_spreadsheet(
        &mut sheet,
        format_records(&records, options.min_fields, options.numbering),
        options.numbering,
        on_skip,
    )?;

    debug!(output = %options.output.display(), "writing workbook");
    sheet.save(&options.output)?;

    let report = match &options.report {
        Some(path) => {
            debug!(report = %path.display(), "writing text report");
            write_text_report(&records, options.min_fields, path)?;
            Some(path.clone())
        }
        None => None,
    };

    info!(
        rows = stats.rows_written,
        skipped = stats.skipped.len(),
        "conversion finished"
    );

    Ok(ConvertSummary {
        input,
        output: options.output.clone(),
        report,
        records: records.len(),
        rows_written: stats.rows_written,
        skipped: stats.skipped,
    })
}
