//! CSV statistics writer
//!
//! Output goes to a temporary file beside the destination and is renamed
//! into place only once every row has been written, so a failed run never
//! leaves a truncated file behind.

use super::StatsSink;
use crate::error::{AggregatorError, AggregatorResult};
use common::SymbolStats;
use csv::{QuoteStyle, WriterBuilder};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Columns of the standard output
pub const STATS_COLUMNS: [&str; 5] = [
    "symbol",
    "MaxTimeGap",
    "Volume",
    "WeightedAveragePrice",
    "MaxPrice",
];

/// Columns appended when extended columns are enabled
pub const EXTENDED_COLUMNS: [&str; 2] = ["MinPrice", "TradeCount"];

/// Write header and one row per entry, in the given order
pub fn write_stats_csv<W: Write>(
    out: W,
    stats: &[SymbolStats],
    extended_columns: bool,
) -> io::Result<()> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .from_writer(out);

    if extended_columns {
        wtr.write_record(STATS_COLUMNS.iter().chain(EXTENDED_COLUMNS.iter()))?;
    } else {
        wtr.write_record(STATS_COLUMNS)?;
    }

    for s in stats {
        let row = (
            s.symbol.as_str(),
            s.max_time_gap,
            s.total_volume,
            s.weighted_avg_price,
            s.max_price,
        );
        if extended_columns {
            let extra = s.extended.unwrap_or_default();
            wtr.serialize((row.0, row.1, row.2, row.3, row.4, extra.min_price, extra.trade_count))?;
        } else {
            wtr.serialize(row)?;
        }
    }

    wtr.flush()
}

/// Staging file beside the destination
///
/// A new output gets the mode a plain create would give it (umask applies);
/// an existing output keeps its current permissions.
fn staging_file(path: &Path, dir: &Path) -> io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".trade-stats").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let staged = builder.tempfile_in(dir)?;

    if let Ok(existing) = fs::metadata(path) {
        staged.as_file().set_permissions(existing.permissions())?;
    }
    Ok(staged)
}

/// Statistics sink backed by a CSV file
#[derive(Debug)]
pub struct CsvStatsWriter {
    path: PathBuf,
    /// Staging file, taken once the result is persisted
    pending: Option<NamedTempFile>,
    extended_columns: bool,
}

impl CsvStatsWriter {
    /// Prepare to write statistics to `path`
    ///
    /// Fails if the destination directory is not writable.
    pub fn create(path: impl AsRef<Path>) -> AggregatorResult<Self> {
        let path = path.as_ref();
        let unavailable = |source| AggregatorError::SinkUnavailable {
            path: path.to_path_buf(),
            source,
        };

        if path.is_dir() {
            return Err(unavailable(io::Error::other("destination is a directory")));
        }

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let pending = staging_file(path, dir).map_err(unavailable)?;
        debug!("Staging output for {} at {}", path.display(), pending.path().display());

        Ok(Self {
            path: path.to_path_buf(),
            pending: Some(pending),
            extended_columns: false,
        })
    }

    /// Also emit the `MinPrice,TradeCount` columns
    #[must_use]
    pub fn with_extended_columns(mut self, enabled: bool) -> Self {
        self.extended_columns = enabled;
        self
    }

    /// Destination path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StatsSink for CsvStatsWriter {
    fn write_stats(&mut self, stats: &[SymbolStats]) -> AggregatorResult<()> {
        let mut staged = self.pending.take().ok_or(AggregatorError::SinkClosed)?;

        write_stats_csv(staged.as_file_mut(), stats, self.extended_columns)?;
        staged.as_file().sync_all()?;
        staged.persist(&self.path).map_err(|e| e.error)?;

        info!("Wrote {} symbol rows to {}", stats.len(), self.path.display());
        Ok(())
    }
}
