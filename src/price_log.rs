use csv::{ReaderBuilder, WriterBuilder};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::models::{LogRow, ProductRecord};
use crate::utils::error::Result;

pub const DELIMITER: u8 = b';';
pub const HEADER: [&str; 3] = ["ARTICLE", "PRICE", "DATE"];

/// Append-only `;`-separated history of price observations.
///
/// Runs are expected not to overlap; the file is not locked.
#[derive(Debug, Clone)]
pub struct PriceLog {
    path: PathBuf,
}

impl PriceLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        PriceLog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one row, writing the header first when the file is new or empty.
    pub fn append(&self, record: &ProductRecord) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let is_new = file.metadata()?.len() == 0;

        let mut writer = WriterBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .from_writer(file);

        if is_new {
            tracing::info!(path = %self.path.display(), "Creating price log");
            writer.write_record(HEADER)?;
        }
        writer.write_record(record.to_row())?;
        writer.flush()?;

        tracing::info!(
            path = %self.path.display(),
            article = %record.description,
            price = record.price.as_deref().unwrap_or(""),
            "Appended price record"
        );
        Ok(())
    }

    /// Reads every row back in append order.
    ///
    /// Fields are taken by position. A leading `ARTICLE;PRICE;DATE` line is
    /// skipped; logs started without one are read from their first line.
    pub fn read_all(&self) -> Result<Vec<LogRow>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .from_path(&self.path)?;

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            if index == 0 && record.iter().eq(HEADER) {
                continue;
            }
            rows.push(record.deserialize::<LogRow>(None)?);
        }
        Ok(rows)
    }

    /// Writes the header and every row to `out` in the log's own format.
    pub fn write_to<W: Write>(&self, out: W) -> Result<()> {
        let rows = self.read_all()?;

        let mut writer = WriterBuilder::new().delimiter(DELIMITER).from_writer(out);
        writer.write_record(HEADER)?;
        for row in &rows {
            writer.write_record([&row.article, &row.price, &row.date])?;
        }
        writer.flush()?;
        Ok(())
    }
}
