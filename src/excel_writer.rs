use std::path::Path;

use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook};
use tracing::info;

use crate::error::{Result, ScrapeError};
use crate::models::Record;

const MIN_WIDTH: usize = 10;
const MAX_WIDTH: usize = 60;

pub struct ExcelExporter {
    workbook: Workbook,
}

impl ExcelExporter {
    pub fn new() -> Self {
        Self {
            workbook: Workbook::new(),
        }
    }

    pub fn write_records(&mut self, records: &[Record]) -> Result<()> {
        let first = records.first().ok_or(ScrapeError::EmptyExport)?;
        let headers: Vec<&str> = first.field_names().collect();
        let worksheet = self.workbook.add_worksheet();

        // Navy background, bold white text
        let header_format = Format::new()
            .set_bold()
            .set_background_color(Color::RGB(0x000080))
            .set_font_color(Color::White)
            .set_border(FormatBorder::Thin);
        let cell_format = Format::new().set_border(FormatBorder::Thin);

        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();

        for (col, header) in headers.iter().enumerate() {
            worksheet.write_with_format(0, col as u16, *header, &header_format)?;
        }

        for (row_idx, record) in records.iter().enumerate() {
            let row = (row_idx + 1) as u32;
            for (col, header) in headers.iter().enumerate() {
                let value = record.get(header).unwrap_or("");
                widths[col] = widths[col].max(value.chars().count());
                worksheet.write_with_format(row, col as u16, value, &cell_format)?;
            }
        }

        for (col, width) in widths.iter().enumerate() {
            let width = (*width + 2).clamp(MIN_WIDTH, MAX_WIDTH);
            worksheet.set_column_width(col as u16, width as f64)?;
        }
        worksheet.set_freeze_panes(1, 0)?;

        Ok(())
    }

    pub fn save(mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.workbook.save(path)?;
        info!("Workbook written to {}", path.display());
        Ok(())
    }
}

impl Default for ExcelExporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes `records` to a single-sheet workbook at `path`.
pub fn write_to_xlsx(records: &[Record], path: impl AsRef<Path>) -> Result<()> {
    let mut exporter = ExcelExporter::new();
    exporter.write_records(records)?;
    exporter.save(path)
}
