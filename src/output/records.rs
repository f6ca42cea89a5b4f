//! Link record serialization to the output stream.

use std::fmt;
use std::io::Write;

use serde::Serialize;

use crate::crawl::LinkRecord;
use crate::error::Result;

/// Output format for collected link records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    /// One URL per line, after a `#`-prefixed version line.
    Plain,
    /// One JSON object per line.
    Jsonl,
}

impl fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordFormat::Plain => write!(f, "plain"),
            RecordFormat::Jsonl => write!(f, "jsonl"),
        }
    }
}

/// Leading record identifying the producing tool.
#[derive(Serialize)]
struct VersionRecord<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    name: &'a str,
    version: &'a str,
}

/// Writes collected link records to an output stream.
pub struct RecordWriter<W: Write> {
    out: W,
    format: RecordFormat,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(out: W, format: RecordFormat) -> Self {
        Self { out, format }
    }

    /// Write the version marker that opens each crawl's record stream.
    pub fn write_version(&mut self) -> Result<()> {
        match self.format {
            RecordFormat::Plain => {
                writeln!(
                    self.out,
                    "# {} {}",
                    env!("CARGO_PKG_NAME"),
                    env!("CARGO_PKG_VERSION")
                )?;
            }
            RecordFormat::Jsonl => {
                let marker = VersionRecord {
                    kind: "version",
                    name: env!("CARGO_PKG_NAME"),
                    version: env!("CARGO_PKG_VERSION"),
                };
                serde_json::to_writer(&mut self.out, &marker)?;
                writeln!(self.out)?;
            }
        }
        Ok(())
    }

    /// Write one collected link record.
    pub fn write_record(&mut self, record: &LinkRecord) -> Result<()> {
        match self.format {
            RecordFormat::Plain => writeln!(self.out, "{}", record.url)?,
            RecordFormat::Jsonl => {
                serde_json::to_writer(&mut self.out, record)?;
                writeln!(self.out)?;
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
