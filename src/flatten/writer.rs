use crate::error::{ConvertError, Result};
use crate::flatten::materialize::Row;
use std::io::Write;

/// Writes header and data rows as delimited text
pub struct RowWriter<W: Write> {
    writer: csv::Writer<W>,
    rows_written: usize,
}

/// Check that a delimiter can be used by the CSV writer.
pub fn delimiter_byte(delimiter: char) -> Result<u8> {
    let reason = match delimiter {
        '"' => "the quote character cannot separate fields",
        '\r' | '\n' => "line breaks cannot separate fields",
        c if !c.is_ascii() => "the delimiter must be a single ASCII character",
        c => return Ok(c as u8),
    };
    Err(ConvertError::InvalidDelimiter { delimiter, reason })
}

impl<W: Write> RowWriter<W> {
    pub fn new(writer: W, delimiter: char) -> Result<Self> {
        let writer = csv::WriterBuilder::new()
            .delimiter(delimiter_byte(delimiter)?)
            .flexible(false)
            .from_writer(writer);

        Ok(RowWriter {
            writer,
            rows_written: 0,
        })
    }

    pub fn write_header(&mut self, header: &[String]) -> Result<()> {
        self.writer
            .write_record(header)
            .map_err(|source| ConvertError::Write {
                operation: "write header",
                source,
            })
    }

    pub fn write_rows(&mut self, rows: &[Row]) -> Result<()> {
        for row in rows {
            self.writer
                .write_record(row)
                .map_err(|source| ConvertError::Write {
                    operation: "write csv row",
                    source,
                })?;
            self.rows_written += 1;
        }
        Ok(())
    }

    /// Data rows written so far, not counting the header
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| ConvertError::Write {
            operation: "flush csv output",
            source: e.into(),
        })
    }
}
