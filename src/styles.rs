//! Cell style definitions and fixed column widths

use crate::error::{Error, Result};
use crate::types::{FONT_NAME, FONT_SIZE};
use indexmap::IndexMap;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    #[default]
    General,
    Center,
    Right,
}

/// Immutable formatting definition: font, alignment and border
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSpec {
    pub font_name: String,
    pub font_size: f64,
    pub bold: bool,
    pub horizontal: HAlign,
    /// Center vertically instead of Excel's bottom default
    pub vertical_center: bool,
    pub wrap_text: bool,
    /// Thin black border on all four sides
    pub border: bool,
}

impl StyleSpec {
    fn base() -> Self {
        StyleSpec {
            font_name: FONT_NAME.to_string(),
            font_size: FONT_SIZE,
            bold: false,
            horizontal: HAlign::General,
            vertical_center: true,
            wrap_text: false,
            border: true,
        }
    }

    /// Header row: bold, centered on both axes
    pub fn header() -> Self {
        StyleSpec {
            bold: true,
            horizontal: HAlign::Center,
            ..Self::base()
        }
    }

    /// Sequence column
    pub fn index() -> Self {
        StyleSpec {
            horizontal: HAlign::Center,
            ..Self::base()
        }
    }

    /// File name and hash columns
    pub fn content() -> Self {
        StyleSpec {
            wrap_text: true,
            ..Self::base()
        }
    }

    /// File size column
    pub fn size() -> Self {
        StyleSpec {
            horizontal: HAlign::Right,
            ..Self::base()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.font_name.trim().is_empty() {
            return Err(Error::Style("font name is empty".to_string()));
        }
        // Excel accepts font sizes from 1 to 409 points
        if !self.font_size.is_finite() || !(1.0..=409.0).contains(&self.font_size) {
            return Err(Error::Style(format!(
                "font size {} outside 1-409",
                self.font_size
            )));
        }
        Ok(())
    }

    pub(crate) fn to_format(&self) -> Format {
        let mut format = Format::new()
            .set_font_name(&self.font_name)
            .set_font_size(self.font_size);

        if self.bold {
            format = format.set_bold();
        }
        format = match self.horizontal {
            HAlign::General => format,
            HAlign::Center => format.set_align(FormatAlign::Center),
            HAlign::Right => format.set_align(FormatAlign::Right),
        };
        if self.vertical_center {
            format = format.set_align(FormatAlign::VerticalCenter);
        }
        if self.wrap_text {
            format = format.set_text_wrap();
        }
        if self.border {
            format = format
                .set_border(FormatBorder::Thin)
                .set_border_color(Color::Black);
        }
        format
    }
}

/// Column widths keyed by column letter, in sheet order
pub fn column_widths() -> IndexMap<&'static str, f64> {
    IndexMap::from([("A", 7.0), ("B", 40.0), ("C", 75.0), ("D", 15.0)])
}
