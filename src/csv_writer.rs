use std::fs::File;
use std::path::Path;

use csv::Writer;
use tracing::info;

use crate::error::{Result, ScrapeError};
use crate::models::Record;

pub struct CsvExporter {
    writer: Writer<File>,
    header: Vec<String>,
}

impl CsvExporter {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let writer = Writer::from_path(path)?;
        Ok(Self {
            writer,
            header: Vec::new(),
        })
    }

    /// Writes the header row using the field names of `first`.
    pub fn write_header(&mut self, first: &Record) -> Result<()> {
        self.header = first.field_names().map(str::to_string).collect();
        self.writer.write_record(&self.header)?;
        Ok(())
    }

    /// Writes one row, ordered by the header; fields the record lacks are left empty.
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        self.writer
            .write_record(self.header.iter().map(|name| record.get(name).unwrap_or("")))?;
        Ok(())
    }

    pub fn finalize(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes `records` to `path` with a header taken from the first record.
///
/// A failed write leaves whatever was already written in place.
pub fn write_to_csv(records: &[Record], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let first = records.first().ok_or(ScrapeError::EmptyExport)?;

    let mut exporter = CsvExporter::new(path)?;
    exporter.write_header(first)?;
    for record in records {
        exporter.write_record(record)?;
    }
    exporter.finalize()?;

    info!("Data written to {}", path.display());
    Ok(())
}
