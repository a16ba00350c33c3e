//! Lazy reading of line-delimited JSON files

use crate::load::error::RecordError;
use anyhow::{Context, Result};
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Forward-only iterator over a line-delimited JSON stream, one parsed record
/// per line.
///
/// Blank lines are skipped. A malformed line yields an error item for that
/// line only; parsing resumes on the next line, so one bad line cannot shift
/// or corrupt the records after it. The underlying handle is released when
/// the iterator is exhausted or dropped.
pub struct JsonLines<R> {
    reader: R,
    line: usize,
    done: bool,
}

impl JsonLines<BufReader<File>> {
    /// Open a source file for reading. Failure to open is fatal for the
    /// caller; everything after that is per-line.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path)
            .with_context(|| format!("failed to open source file: {}", path.as_ref().display()))?;
        Ok(JsonLines::new(BufReader::new(file)))
    }
}

impl<R: BufRead> JsonLines<R> {
    pub fn new(reader: R) -> Self {
        JsonLines {
            reader,
            line: 0,
            done: false,
        }
    }

    /// Parse one line, trying SIMD first and falling back to serde_json,
    /// which also supplies the error detail for malformed input.
    fn parse(line: &str, line_no: usize) -> Result<Value, RecordError> {
        let mut bytes = line.as_bytes().to_vec();
        if let Ok(value) = simd_json::from_slice::<Value>(&mut bytes) {
            return Ok(value);
        }

        serde_json::from_str(line).map_err(|source| RecordError::Parse {
            line: line_no,
            source,
        })
    }
}

impl<R: BufRead> Iterator for JsonLines<R> {
    type Item = Result<Value, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut buf = String::new();
        loop {
            buf.clear();
            self.line += 1;
            match self.reader.read_line(&mut buf) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {
                    let line = buf.trim();
                    if line.is_empty() {
                        continue;
                    }
                    return Some(Self::parse(line, self.line));
                }
                Err(source) => {
                    // An I/O error mid-file means the rest is unreadable
                    self.done = true;
                    return Some(Err(RecordError::Io {
                        line: self.line,
                        source,
                    }));
                }
            }
        }
    }
}
