//! CSV trade reader
//!
//! Each record is `timestamp,symbol,quantity,price`. Surrounding whitespace of
//! every field is ignored, blank lines are skipped, and records that do not
//! convert to a trade are dropped without being reported to the caller.

use super::TradeSource;
use crate::error::{AggregatorError, AggregatorResult};
use common::{Px, Qty, Symbol, Trade, Ts};
use csv::{ByteRecord, Position, ReaderBuilder, Trim};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};

/// Read buffer size
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Convert one CSV record into a trade
///
/// Returns `None` for malformed records. Fields after the fourth are ignored.
#[must_use]
pub fn parse_trade_record(record: &ByteRecord) -> Option<Trade> {
    let field = |i: usize| {
        record
            .get(i)
            .and_then(|raw| std::str::from_utf8(raw).ok())
            .map(str::trim)
    };

    let ts = field(0)?.parse::<u64>().ok()?;
    let symbol = field(1)?;
    if symbol.is_empty() {
        return None;
    }
    let quantity = field(2)?.parse::<u32>().ok()?;
    let price = field(3)?.parse::<u32>().ok()?;

    Some(Trade::new(
        Ts::from_micros(ts),
        Symbol::new(symbol),
        Qty::new(quantity),
        Px::new(price),
    ))
}

/// CSV reader configured for trade input
fn csv_reader<R: Read>(rdr: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .buffer_capacity(READ_BUFFER_SIZE)
        .from_reader(rdr)
}

/// Trade source over CSV data, by default a file
#[derive(Debug)]
pub struct CsvTradeReader<R = File> {
    path: Option<PathBuf>,
    /// Only `None` while being rebuilt by `reset`
    reader: Option<csv::Reader<R>>,
    record: ByteRecord,
    /// Set after an I/O error until the next successful rewind
    failed: bool,
    skipped: u64,
}

impl CsvTradeReader<File> {
    /// Open a CSV trade file
    pub fn open(path: impl AsRef<Path>) -> AggregatorResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| AggregatorError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Opened trade input {}", path.display());

        let mut reader = Self::from_reader(file);
        reader.path = Some(path.to_path_buf());
        Ok(reader)
    }
}

impl<R: Read> CsvTradeReader<R> {
    /// Read trades from any byte stream
    pub fn from_reader(rdr: R) -> Self {
        Self {
            path: None,
            reader: Some(csv_reader(rdr)),
            record: ByteRecord::new(),
            failed: false,
            skipped: 0,
        }
    }

    /// Path this reader was opened from, if it is file backed
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn origin(&self) -> String {
        self.path
            .as_ref()
            .map_or_else(|| "trade stream".to_owned(), |p| p.display().to_string())
    }
}

impl<R: Read + Seek> TradeSource for CsvTradeReader<R> {
    fn read_next(&mut self) -> Option<Trade> {
        if self.failed {
            return None;
        }

        loop {
            let reader = self.reader.as_mut()?;
            match reader.read_byte_record(&mut self.record) {
                Ok(true) => match parse_trade_record(&self.record) {
                    Some(trade) => return Some(trade),
                    None => {
                        self.skipped += 1;
                        trace!(
                            "Skipping malformed record at line {}",
                            self.record.position().map_or(0, Position::line)
                        );
                    }
                },
                Ok(false) => {
                    if self.skipped > 0 {
                        debug!("Skipped {} malformed records in {}", self.skipped, self.origin());
                        self.skipped = 0;
                    }
                    return None;
                }
                Err(e) if e.is_io_error() => {
                    warn!("Read error on {}, treating as end of input: {}", self.origin(), e);
                    self.failed = true;
                    return None;
                }
                Err(e) => {
                    self.skipped += 1;
                    trace!("Skipping unreadable record: {}", e);
                }
            }
        }
    }

    /// Rewind to the first record; also clears an earlier read failure
    ///
    /// The csv reader keeps its I/O error state across `seek`, so the
    /// underlying stream is rewound and wrapped in a fresh reader.
    fn reset(&mut self) {
        self.skipped = 0;
        let Some(reader) = self.reader.take() else {
            return;
        };

        let mut inner = reader.into_inner();
        match inner.seek(SeekFrom::Start(0)) {
            Ok(_) => self.failed = false,
            Err(e) => {
                warn!("Cannot rewind {}: {}", self.origin(), e);
                self.failed = true;
            }
        }
        self.reader = Some(csv_reader(inner));
    }
}
