//! Spreadsheet capability used by the converter.
//!
//! [`SheetWriter`] is the seam between the formatting logic and the xlsx
//! library. [`Sheet`] implements it as an in-memory single-sheet workbook
//! that is only handed to `rust_xlsxwriter` when saved.

use crate::error::{Error, Result};
use crate::styles::StyleSpec;
use crate::types::CellData;
use rust_xlsxwriter::{Format, Workbook};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Maximum worksheet dimensions of the xlsx format (0-based limits)
const MAX_ROW: u32 = 1_048_575;
const MAX_COL: u16 = 16_383;

/// Handle to a style registered with [`SheetWriter::define_style`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleId(usize);

/// Inclusive rectangle of cells, 0-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub first_row: u32,
    pub first_col: u16,
    pub last_row: u32,
    pub last_col: u16,
}

impl CellRange {
    pub fn new(first_row: u32, first_col: u16, last_row: u32, last_col: u16) -> Result<Self> {
        if first_row > last_row || first_col > last_col {
            return Err(Error::Range(format!(
                "({}, {}) to ({}, {}) is reversed",
                first_row, first_col, last_row, last_col
            )));
        }
        if last_row > MAX_ROW || last_col > MAX_COL {
            return Err(Error::Range(format!(
                "({}, {}) is beyond the worksheet limits",
                last_row, last_col
            )));
        }
        Ok(CellRange {
            first_row,
            first_col,
            last_row,
            last_col,
        })
    }

    fn cells(&self) -> impl Iterator<Item = (u32, u16)> + '_ {
        (self.first_row..=self.last_row)
            .flat_map(move |row| (self.first_col..=self.last_col).map(move |col| (row, col)))
    }
}

/// Operations the converter needs from a spreadsheet backend
pub trait SheetWriter {
    /// Write `cells` left to right starting at column A of `row`
    fn write_row(&mut self, row: u32, cells: Vec<CellData>) -> Result<()>;

    fn set_column_width(&mut self, col: u16, width: f64) -> Result<()>;

    fn define_style(&mut self, style: StyleSpec) -> Result<StyleId>;

    /// Assign `style` to every cell in `range`, written or not
    fn apply_style(&mut self, range: CellRange, style: StyleId) -> Result<()>;

    /// Serialize to `path`, replacing any existing file
    fn save(&self, path: &Path) -> Result<()>;
}

/// In-memory workbook holding one named sheet
#[derive(Debug, Default)]
pub struct Sheet {
    name: String,
    cells: BTreeMap<(u32, u16), CellData>,
    widths: BTreeMap<u16, f64>,
    styles: Vec<StyleSpec>,
    cell_styles: BTreeMap<(u32, u16), StyleId>,
}

impl Sheet {
    pub fn new(name: &str) -> Self {
        Sheet {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn cell(&self, row: u32, col: u16) -> Option<&CellData> {
        self.cells.get(&(row, col))
    }

    pub fn column_width(&self, col: u16) -> Option<f64> {
        self.widths.get(&col).copied()
    }

    /// Style assigned to a cell, if any
    pub fn style_at(&self, row: u32, col: u16) -> Option<&StyleSpec> {
        self.cell_styles
            .get(&(row, col))
            .map(|id| &self.styles[id.0])
    }

    /// Highest row index that holds data or a style
    pub fn last_row(&self) -> Option<u32> {
        let data = self.cells.keys().map(|(row, _)| *row).max();
        let styled = self.cell_styles.keys().map(|(row, _)| *row).max();
        data.max(styled)
    }

    /// Build the xlsx workbook. Every cell that carries data or a style is
    /// written; styled cells without data become formatted blanks.
    pub fn to_workbook(&self) -> Result<Workbook> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.name)?;

        let formats: Vec<Format> = self.styles.iter().map(StyleSpec::to_format).collect();

        for (&col, &width) in &self.widths {
            worksheet.set_column_width(col, width)?;
        }

        let coords: BTreeSet<(u32, u16)> = self
            .cells
            .keys()
            .chain(self.cell_styles.keys())
            .copied()
            .collect();

        for (row, col) in coords {
            let format = self.cell_styles.get(&(row, col)).map(|id| &formats[id.0]);
            match (self.cells.get(&(row, col)), format) {
                (Some(CellData::Number(v)), Some(fmt)) => {
                    worksheet.write_number_with_format(row, col, *v, fmt)?;
                }
                (Some(CellData::Number(v)), None) => {
                    worksheet.write_number(row, col, *v)?;
                }
                (Some(CellData::Text(s)), Some(fmt)) => {
                    worksheet.write_string_with_format(row, col, s, fmt)?;
                }
                (Some(CellData::Text(s)), None) => {
                    worksheet.write_string(row, col, s)?;
                }
                (None, Some(fmt)) => {
                    worksheet.write_blank(row, col, fmt)?;
                }
                (None, None) => {}
            }
        }

        Ok(workbook)
    }
}

impl SheetWriter for Sheet {
    fn write_row(&mut self, row: u32, cells: Vec<CellData>) -> Result<()> {
        if cells.is_empty() {
            return Ok(());
        }
        let last_col = u16::try_from(cells.len() - 1)
            .map_err(|_| Error::Range(format!("{} cells do not fit in one row", cells.len())))?;
        CellRange::new(row, 0, row, last_col)?;

        for (col, value) in (0u16..).zip(cells) {
            self.cells.insert((row, col), value);
        }
        Ok(())
    }

    fn set_column_width(&mut self, col: u16, width: f64) -> Result<()> {
        if col > MAX_COL {
            return Err(Error::Range(format!("column {} is beyond the worksheet limits", col)));
        }
        if !width.is_finite() || !(0.0..=255.0).contains(&width) {
            return Err(Error::Style(format!("column width {} outside 0-255", width)));
        }
        self.widths.insert(col, width);
        Ok(())
    }

    fn define_style(&mut self, style: StyleSpec) -> Result<StyleId> {
        style.validate()?;
        self.styles.push(style);
        Ok(StyleId(self.styles.len() - 1))
    }

    fn apply_style(&mut self, range: CellRange, style: StyleId) -> Result<()> {
        if style.0 >= self.styles.len() {
            return Err(Error::Style(format!("style {} was never defined", style.0)));
        }
        for coord in range.cells() {
            self.cell_styles.insert(coord, style);
        }
        Ok(())
    }

    fn save(&self, path: &Path) -> Result<()> {
        let mut workbook = self.to_workbook()?;
        workbook.save(path)?;
        Ok(())
    }
}
