//! File sink writing JSON lines

use crate::core::{Record, Result, Sink};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends each record as a single-line JSON object (JSONL format),
/// compatible with log aggregation tools.
pub struct FileSink {
    writer: BufWriter<File>,
}

impl FileSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Sink for FileSink {
    fn append(&mut self, record: &Record) -> Result<()> {
        writeln!(self.writer, "{}", record.to_json_string())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}
