//! Streaming conversion of a top-level JSON array into CSV
//!
//! Records are pulled from the input one at a time through serde's
//! sequence access, flattened, and written before the next one is decoded.

use crate::error::{ConvertError, Result};
use crate::flatten::path::JsonType;
use crate::flatten::writer::delimiter_byte;
use crate::flatten::{Flattener, RowWriter};
use crate::types::Options;
use serde::de::{self, Deserializer as _, SeqAccess, Visitor};
use serde_json::Value;
use std::fmt;
use std::io::{BufRead, BufReader, Read, Write};

/// Counts reported after a successful conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Records read from the top-level array
    pub records: usize,
    /// Data rows written (header excluded)
    pub rows: usize,
    /// Records that produced no rows
    pub skipped_records: usize,
}

/// A validated conversion setup that can be run against many inputs
#[derive(Debug, Clone)]
pub struct Converter {
    flattener: Flattener,
    delimiter: char,
    header: bool,
}

impl Converter {
    /// Validate options and compute the flatten plan.
    ///
    /// Fails with a configuration error when no field contains `[*]`, a
    /// path is malformed, or the delimiter is unusable.
    pub fn new(options: &Options) -> Result<Self> {
        let flattener = Flattener::from_fields(&options.fields)?;
        delimiter_byte(options.delimiter)?;

        tracing::debug!(
            array_path = %flattener.plan().array_path,
            columns = flattener.plan().columns.len(),
            "Built flatten plan"
        );

        Ok(Converter {
            flattener,
            delimiter: options.delimiter,
            header: options.header,
        })
    }

    pub fn flattener(&self) -> &Flattener {
        &self.flattener
    }

    /// Convert one JSON array from `reader` into CSV on `writer`.
    ///
    /// Rows written before an error stay in the output.
    pub fn run<R: Read, W: Write>(&self, reader: R, writer: W) -> Result<Summary> {
        let mut out = RowWriter::new(writer, self.delimiter)?;
        if self.header {
            out.write_header(&self.flattener.header())?;
        }

        let mut reader = BufReader::new(reader);
        if at_end(&mut reader)? {
            tracing::debug!("Input is empty");
            out.flush()?;
            return Ok(Summary::default());
        }

        let mut progress = Progress::default();
        let mut deserializer = serde_json::Deserializer::from_reader(reader);
        let visited = (&mut deserializer).deserialize_seq(RecordVisitor {
            flattener: &self.flattener,
            out: &mut out,
            progress: &mut progress,
        });

        if let Err(err) = visited {
            return Err(match progress.failure.take() {
                Some(failure) => failure,
                None => classify(err, progress.started, progress.summary.records),
            });
        }

        deserializer
            .end()
            .map_err(|source| ConvertError::TrailingInput { source })?;
        out.flush()?;

        let summary = Summary {
            rows: out.rows_written(),
            ..progress.summary
        };
        tracing::info!(
            records = summary.records,
            rows = summary.rows,
            skipped_records = summary.skipped_records,
            "Conversion finished"
        );
        Ok(summary)
    }
}

/// Convert a JSON array of objects into CSV rows in one call.
pub fn convert<R: Read, W: Write>(reader: R, writer: W, options: &Options) -> Result<Summary> {
    Converter::new(options)?.run(reader, writer)
}

/// Skip leading whitespace and report whether the input has nothing else.
fn at_end<R: BufRead>(reader: &mut R) -> Result<bool> {
    loop {
        let buf = reader.fill_buf().map_err(ConvertError::Read)?;
        if buf.is_empty() {
            return Ok(true);
        }

        let len = buf.len();
        let skip = buf
            .iter()
            .take_while(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
            .count();
        reader.consume(skip);
        if skip < len {
            return Ok(false);
        }
    }
}

/// Map a decoder error onto the conversion error taxonomy.
fn classify(err: serde_json::Error, started: bool, index: usize) -> ConvertError {
    if err.is_eof() {
        ConvertError::Truncated { source: err }
    } else if !started {
        ConvertError::NotArrayInput { source: err }
    } else {
        ConvertError::Decode { index, source: err }
    }
}

#[derive(Default)]
struct Progress {
    summary: Summary,
    started: bool,
    failure: Option<ConvertError>,
}

struct RecordVisitor<'a, W: Write> {
    flattener: &'a Flattener,
    out: &'a mut RowWriter<W>,
    progress: &'a mut Progress,
}

impl<W: Write> RecordVisitor<'_, W> {
    fn process(&mut self, index: usize, record: Value) -> Result<()> {
        if !record.is_object() {
            return Err(ConvertError::RecordNotObject {
                index,
                found: JsonType::of(&record).as_str(),
            });
        }

        let rows = self.flattener.rows(&record)?;
        if rows.is_empty() {
            tracing::debug!(index, "Record produced no rows");
            self.progress.summary.skipped_records += 1;
        } else {
            tracing::trace!(index, rows = rows.len(), "Flattened record");
        }

        self.out.write_rows(&rows)?;
        Ok(())
    }
}

impl<'de, W: Write> Visitor<'de> for RecordVisitor<'_, W> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array of JSON objects")
    }

    fn visit_seq<A>(mut self, mut seq: A) -> std::result::Result<(), A::Error>
    where
        A: SeqAccess<'de>,
    {
        self.progress.started = true;

        while let Some(record) = seq.next_element::<Value>()? {
            let index = self.progress.summary.records;
            self.progress.summary.records += 1;

            if let Err(err) = self.process(index, record) {
                self.progress.failure = Some(err);
                return Err(de::Error::custom("conversion aborted"));
            }
        }

        Ok(())
    }
}
