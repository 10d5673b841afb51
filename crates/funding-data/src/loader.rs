//! CSV loading for the funding dataset.
//!
//! Reads the dataset once into a [`FundingTable`]. Unparseable dates and
//! amounts become `None`; only an unreadable file, malformed CSV or a missing
//! required column is fatal.

use std::io::Read;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use funding_core::coerce::{optional_text, parse_amount, parse_date};
use funding_core::error::{DashboardError, Result};
use funding_core::models::{FundingRecord, FundingTable};
use tracing::{debug, info};

/// Columns the dataset must provide, in no particular order.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "date",
    "startup",
    "vertical",
    "city",
    "investors",
    "round",
    "amount",
];

/// Counters gathered while reading, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub rows: usize,
    pub null_dates: usize,
    pub null_amounts: usize,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the funding CSV at `path`.
pub fn load_funding_table(path: &Path) -> Result<FundingTable> {
    let file = std::fs::File::open(path).map_err(|source| DashboardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let (table, stats) = read_with_stats(file, path)?;

    info!(
        "Loaded {} funding rows from {}",
        stats.rows,
        path.display()
    );
    debug!(
        "{} dates and {} amounts could not be parsed and were set to null",
        stats.null_dates, stats.null_amounts
    );

    Ok(table)
}

/// Read a funding table from any reader. `source` names the input in errors.
pub fn read_funding_table<R: Read>(reader: R, source: &Path) -> Result<FundingTable> {
    read_with_stats(reader, source).map(|(table, _)| table)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Positions of the required columns within a CSV row.
struct ColumnIndex {
    date: usize,
    startup: usize,
    vertical: usize,
    city: usize,
    investors: usize,
    round: usize,
    amount: usize,
}

impl ColumnIndex {
    /// Locate every required column in `headers`, or report all missing ones.
    fn resolve(headers: &StringRecord, source: &Path) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|name| find(*name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DashboardError::MissingColumns {
                path: source.to_path_buf(),
                columns: missing,
            });
        }

        // All present, checked above.
        let at = |name: &str| find(name).unwrap_or_default();
        Ok(Self {
            date: at("date"),
            startup: at("startup"),
            vertical: at("vertical"),
            city: at("city"),
            investors: at("investors"),
            round: at("round"),
            amount: at("amount"),
        })
    }
}

fn read_with_stats<R: Read>(reader: R, source: &Path) -> Result<(FundingTable, LoadStats)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let columns = ColumnIndex::resolve(&headers, source)?;

    let mut stats = LoadStats::default();
    let mut records = Vec::new();

    for row in csv_reader.records() {
        let row = row?;
        let record = map_row(&row, &columns);

        stats.rows += 1;
        if record.date.is_none() {
            stats.null_dates += 1;
        }
        if record.amount.is_none() {
            stats.null_amounts += 1;
        }
        records.push(record);
    }

    Ok((FundingTable::from_records(records), stats))
}

/// Map one CSV row to a [`FundingRecord`].
fn map_row(row: &StringRecord, columns: &ColumnIndex) -> FundingRecord {
    let cell = |idx: usize| row.get(idx).unwrap_or("");

    FundingRecord {
        date: parse_date(cell(columns.date)),
        startup: cell(columns.startup).to_string(),
        vertical: optional_text(cell(columns.vertical)),
        city: optional_text(cell(columns.city)),
        investors: cell(columns.investors).to_string(),
        round: optional_text(cell(columns.round)),
        amount: parse_amount(cell(columns.amount)),
    }
}

/// Placeholder source name for in-memory readers.
pub fn in_memory_source() -> PathBuf {
    PathBuf::from("<memory>")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
