//! JSON lines sink for persisting and replaying records

use crate::core::{LogRecord, Result, Sink};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Writes each record's structured form as one JSON object per line.
///
/// The rendered text is ignored; what lands on disk is exactly what
/// [`JsonSink::read_records`] turns back into records.
pub struct JsonSink {
    writer: BufWriter<File>,
}

impl JsonSink {
    /// Create a new JSON sink appending to `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Read back every record persisted at `path`, skipping blank lines.
    pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<LogRecord>> {
        let reader = BufReader::new(File::open(path)?);
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(LogRecord::from_json(&line)?);
        }
        Ok(records)
    }
}

impl Sink for JsonSink {
    fn name(&self) -> &str {
        "json"
    }

    fn append(&mut self, record: &LogRecord, _rendered: &str) -> Result<()> {
        writeln!(self.writer, "{}", record.to_json()?)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl Drop for JsonSink {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}
