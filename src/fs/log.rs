//! Append-only record logs.
//!
//! [`RecordLog`] is the sequence-of-records interface the memory log is built
//! on: append one record, or scan forward from a position. [`CsvLog`] stores
//! records as CSV rows under a fixed header. Callers own the row type, so the
//! on-disk format can change without touching them.
//!
//! Locking is the caller's job; these types never take the store lock.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, Read, Seek, SeekFrom, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{CrumbsError, IoContext, Result};

/// A record together with its ordinal in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Positioned<R> {
    pub position: usize,
    pub record: R,
}

/// Result of scanning a log.
#[derive(Debug, Clone)]
pub struct Scan<R> {
    /// Readable records at or after the requested position, in log order
    pub records: Vec<Positioned<R>>,
    /// Number of record slots in the whole log, unreadable ones included
    pub total: usize,
    /// Positions that could not be decoded
    pub skipped: Vec<usize>,
}

impl<R> Default for Scan<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            total: 0,
            skipped: Vec::new(),
        }
    }
}

pub trait RecordLog {
    type Record;

    /// Durably append one record at the end of the log.
    fn append(&self, record: &Self::Record) -> Result<()>;

    /// Read records whose position is `>= from`.
    ///
    /// A record that cannot be decoded is skipped with a warning but still
    /// occupies its position, so positions stay stable across damage.
    fn scan_from(&self, from: usize) -> Result<Scan<Self::Record>>;

    fn scan(&self) -> Result<Scan<Self::Record>> {
        self.scan_from(0)
    }

    /// Drop a partial record left at the end by an interrupted writer.
    ///
    /// Called under the exclusive lock before positions are computed for a
    /// new record.
    fn repair_tail(&self) -> Result<()> {
        Ok(())
    }
}

/// A [`RecordLog`] stored as a CSV file with a header row.
#[derive(Debug, Clone)]
pub struct CsvLog<R> {
    path: PathBuf,
    header: &'static [&'static str],
    _record: PhantomData<fn() -> R>,
}

impl<R> CsvLog<R> {
    pub fn new(path: impl Into<PathBuf>, header: &'static [&'static str]) -> Self {
        Self {
            path: path.into(),
            header,
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the header if the file is missing or empty.
    ///
    /// Must run under the exclusive store lock: it never truncates, but two
    /// unlocked callers could both see an empty file.
    pub fn ensure_header(&self) -> Result<()> {
        let needs_init = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(e) => {
                return Err(CrumbsError::io(
                    format!("Failed to stat {}", self.path.display()),
                    e,
                ))
            }
        };

        if needs_init {
            let mut line = self.header.join(",");
            line.push('\n');
            let mut file = self.open_append()?;
            file.write_all(line.as_bytes())
                .io_context(|| format!("Failed to write header: {}", self.path.display()))?;
            file.sync_data()
                .io_context(|| format!("Failed to sync {}", self.path.display()))?;
            debug!(path = %self.path.display(), "initialized log");
        }
        Ok(())
    }

    fn open_append(&self) -> Result<File> {
        OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .io_context(|| format!("Failed to open {} for append", self.path.display()))
    }

    /// True when the file is non-empty and its last byte is not a newline,
    /// i.e. a previous writer died halfway through a row.
    fn has_torn_tail(&self) -> Result<bool> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => {
                return Err(CrumbsError::io(
                    format!("Failed to open {}", self.path.display()),
                    e,
                ))
            }
        };

        let len = file
            .metadata()
            .io_context(|| format!("Failed to stat {}", self.path.display()))?
            .len();
        if len == 0 {
            return Ok(false);
        }

        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1))
            .and_then(|_| file.read_exact(&mut last))
            .io_context(|| format!("Failed to read tail of {}", self.path.display()))?;
        Ok(last[0] != b'\n')
    }

    /// Byte offset where the last record in the file starts.
    fn last_record_start(&self) -> Result<u64> {
        let file = File::open(&self.path)
            .io_context(|| format!("Failed to open {}", self.path.display()))?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let mut record = csv::ByteRecord::new();
        let mut last_start = 0;
        loop {
            let start = reader.position().byte();
            match reader.read_byte_record(&mut record) {
                Ok(false) => break,
                Ok(true) => last_start = start,
                Err(e) if e.is_io_error() => {
                    return Err(CrumbsError::io(
                        format!("Failed to read {}", self.path.display()),
                        e,
                    ))
                }
                Err(_) => {
                    last_start = start;
                    if reader.position().byte() == start {
                        break;
                    }
                }
            }
        }
        Ok(last_start)
    }
}

impl<R> RecordLog for CsvLog<R>
where
    R: Serialize + DeserializeOwned,
{
    type Record = R;

    fn append(&self, record: &R) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer
            .serialize(record)
            .io_context(|| format!("Failed to encode row for {}", self.path.display()))?;
        let mut row = writer.into_inner().map_err(|e| {
            let source = std::io::Error::new(e.error().kind(), e.error().to_string());
            CrumbsError::io(
                format!("Failed to encode row for {}", self.path.display()),
                source,
            )
        })?;

        self.repair_tail()?;
        self.ensure_header()?;

        // One write of the complete row, then fsync: a later read sees the
        // whole row or none of it.
        let mut file = self.open_append()?;
        file.write_all(&row)
            .io_context(|| format!("Failed to append to {}", self.path.display()))?;
        file.flush()
            .io_context(|| format!("Failed to flush {}", self.path.display()))?;
        file.sync_data()
            .io_context(|| format!("Failed to sync {}", self.path.display()))?;
        Ok(())
    }

    fn scan_from(&self, from: usize) -> Result<Scan<R>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Scan::default()),
            Err(e) => {
                return Err(CrumbsError::io(
                    format!("Failed to open {}", self.path.display()),
                    e,
                ))
            }
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let mut scan = Scan::default();
        for (position, row) in reader.byte_records().enumerate() {
            scan.total = position + 1;

            let row = match row {
                Ok(row) => row,
                Err(e) if e.is_io_error() => {
                    return Err(CrumbsError::io(
                        format!("Failed to read {}", self.path.display()),
                        e,
                    ))
                }
                Err(e) => {
                    warn!(path = %self.path.display(), position, "skipping unreadable row: {e}");
                    scan.skipped.push(position);
                    continue;
                }
            };

            if position < from {
                continue;
            }

            match row.deserialize::<R>(None) {
                Ok(record) => scan.records.push(Positioned { position, record }),
                Err(e) => {
                    warn!(path = %self.path.display(), position, "skipping malformed row: {e}");
                    scan.skipped.push(position);
                }
            }
        }

        Ok(scan)
    }

    /// Cut a row that lacks its trailing newline back to the end of the
    /// previous record. Complete rows always end with a newline; a partial
    /// one may stop inside an open quoted field, so it is removed rather than
    /// terminated.
    fn repair_tail(&self) -> Result<()> {
        if !self.has_torn_tail()? {
            return Ok(());
        }

        let keep = self.last_record_start()?;
        let file = OpenOptions::new()
            .write(true)
            .open(&self.path)
            .io_context(|| format!("Failed to open {} for repair", self.path.display()))?;
        file.set_len(keep)
            .io_context(|| format!("Failed to truncate {}", self.path.display()))?;
        file.sync_data()
            .io_context(|| format!("Failed to sync {}", self.path.display()))?;

        warn!(
            path = %self.path.display(),
            offset = keep,
            "dropped partial row left by an interrupted write"
        );
        Ok(())
    }
}
