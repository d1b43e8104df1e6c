//! CSV codec for [`Records`].
//!
//! The on-disk and on-the-wire format is the IEEE listing layout:
//!
//! ```text
//! Registry,Assignment,Organization Name,Organization Address
//! MA-L,001122,Example Corp,123 Main St
//! ```

use std::io::{Read, Write};
use std::path::Path;

use manuf_common::{ManufError, Record, Records, Registry, Result};
use tempfile::NamedTempFile;
use tracing::debug;

pub const HEADER: [&str; 4] = [
    "Registry",
    "Assignment",
    "Organization Name",
    "Organization Address",
];

/// Writes the header row followed by one row per record, in collection order.
pub fn encode<W: Write>(records: &Records, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    writer
        .write_record(HEADER)
        .map_err(|e| write_error("failed to write header", e))?;
    for record in records {
        writer
            .write_record(record.to_row())
            .map_err(|e| write_error("failed to write record", e))?;
    }
    writer
        .flush()
        .map_err(|e| ManufError::io("failed to flush records", e))
}

pub fn encode_to_vec(records: &Records) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode(records, &mut buf)?;
    Ok(buf)
}

/// Parses records from a CSV stream. `origin` names the stream in errors.
///
/// A first row whose first field is literally `Registry` is the header and is skipped.
pub fn decode<R: Read>(reader: R, origin: &str) -> Result<Records> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(QuoteTracker::new(reader));

    let mut records = Records::new();
    for (index, row) in reader.records().enumerate() {
        let row = row.map_err(|e| ManufError::parse(origin, e))?;

        if index == 0 && row.get(0) == Some(HEADER[0]) {
            continue;
        }
        if row.len() != HEADER.len() {
            let line = row.position().map_or(0, |pos| pos.line());
            return Err(ManufError::parse(
                origin,
                format!("line {line}: expected {} fields, found {}", HEADER.len(), row.len()),
            ));
        }

        let registry: Registry = row[0].parse().map_err(|e| ManufError::parse(origin, e))?;
        records.push(Record::new(registry, &row[1], &row[2], &row[3]));
    }

    // The reader silently closes a quoted field left open at end of input.
    if reader.get_ref().state == QuoteState::Quoted {
        return Err(ManufError::parse(
            origin,
            "unexpected end of input inside a quoted field",
        ));
    }

    Ok(records)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    /// A `"` seen inside a quoted field: either the closing quote or half of an escaped one.
    QuoteInQuoted,
}

impl QuoteState {
    fn advance(self, byte: u8) -> Self {
        match (self, byte) {
            (Self::Quoted, b'"') => Self::QuoteInQuoted,
            (Self::Quoted, _) => Self::Quoted,
            (Self::QuoteInQuoted, b'"') => Self::Quoted,
            (_, b',' | b'\n' | b'\r') => Self::FieldStart,
            (Self::FieldStart, b'"') => Self::Quoted,
            _ => Self::Unquoted,
        }
    }
}

/// Follows the quoting state of every byte handed to the CSV reader.
struct QuoteTracker<R> {
    inner: R,
    state: QuoteState,
}

impl<R> QuoteTracker<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            state: QuoteState::FieldStart,
        }
    }
}

impl<R: Read> Read for QuoteTracker<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.state = buf[..n]
            .iter()
            .fold(self.state, |state, &byte| state.advance(byte));
        Ok(n)
    }
}

/// Replaces the file at `path` with the encoded records.
///
/// Rows go to a temporary sibling first, which is renamed over `path` only once fully
/// written, so a failure leaves any previous file untouched.
pub fn write_file(records: &Records, path: &Path) -> Result<()> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)
        .map_err(|e| ManufError::io(format!("failed to create directory {parent:?}"), e))?;

    let mut tmp = NamedTempFile::new_in(parent)
        .map_err(|e| ManufError::io(format!("failed to open file for writing in {parent:?}"), e))?;
    encode(records, tmp.as_file_mut())?;
    tmp.persist(path)
        .map_err(|e| ManufError::io(format!("failed to write file {path:?}"), e.error))?;

    debug!(path = ?path, records = records.len(), "wrote records");
    Ok(())
}

pub fn read_file(path: &Path) -> Result<Records> {
    let file = std::fs::File::open(path)
        .map_err(|e| ManufError::io(format!("failed to open file for reading {path:?}"), e))?;
    decode(std::io::BufReader::new(file), &path.display().to_string())
}

fn write_error(context: &str, err: csv::Error) -> ManufError {
    let source = match err.into_kind() {
        csv::ErrorKind::Io(io) => io,
        other => std::io::Error::other(format!("{other:?}")),
    };
    ManufError::io(context, source)
}
