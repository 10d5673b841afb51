//! Aggregation queries over a [`FundingTable`].
//!
//! Every function is pure and takes the table by reference. Null amounts are
//! excluded from sums (a group made only of null amounts does not appear),
//! and an empty input gives an empty or zero result instead of an error.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use funding_core::models::{FundingRecord, FundingTable, MomMode};
use serde::Serialize;

/// Default row count for the recent and top investment lists.
pub const DEFAULT_LIST_LEN: usize = 5;

// ── Result types ──────────────────────────────────────────────────────────────

/// Summed funding for one startup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartupTotal {
    pub startup: String,
    pub amount: f64,
}

/// One (year, month) bucket of the month-over-month series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodPoint {
    pub year: i32,
    pub month: u32,
    pub value: f64,
}

impl PeriodPoint {
    /// Axis label in `"{month}-{year}"` form, e.g. `"1-2020"`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.month, self.year)
    }
}

// ── Overall queries ───────────────────────────────────────────────────────────

/// Sum of every non-null amount.
pub fn total_invested(table: &FundingTable) -> f64 {
    table.iter().filter_map(|r| r.amount).sum()
}

/// Startup with the largest summed funding.
///
/// Ties go to the startup that appears first in the table.
pub fn max_single_startup_funding(table: &FundingTable) -> Option<StartupTotal> {
    ranked_startups(table).into_iter().next()
}

/// Mean of the per-startup summed amounts (not of raw rows).
pub fn average_funding_per_startup(table: &FundingTable) -> f64 {
    let totals = sum_by_startup(table);
    if totals.is_empty() {
        return 0.0;
    }
    totals.iter().map(|t| t.amount).sum::<f64>() / totals.len() as f64
}

/// Number of distinct non-blank startup names.
pub fn distinct_startup_count(table: &FundingTable) -> usize {
    table
        .iter()
        .filter_map(FundingRecord::startup_key)
        .collect::<BTreeSet<_>>()
        .len()
}

/// Month-over-month series, ascending by (year, month).
///
/// Rows without a date are skipped. `Total` sums amounts, `Count` counts rows.
pub fn month_over_month(table: &FundingTable, mode: MomMode) -> Vec<PeriodPoint> {
    #[derive(Default)]
    struct Bucket {
        sum: f64,
        amounts: usize,
        rows: usize,
    }

    let mut buckets: BTreeMap<(i32, u32), Bucket> = BTreeMap::new();
    for record in table {
        let (Some(year), Some(month)) = (record.year(), record.month()) else {
            continue;
        };
        let bucket = buckets.entry((year, month)).or_default();
        bucket.rows += 1;
        if let Some(amount) = record.amount {
            bucket.sum += amount;
            bucket.amounts += 1;
        }
    }

    buckets
        .into_iter()
        .filter_map(|((year, month), bucket)| {
            let value = match mode {
                MomMode::Total if bucket.amounts == 0 => return None,
                MomMode::Total => bucket.sum,
                MomMode::Count => bucket.rows as f64,
            };
            Some(PeriodPoint { year, month, value })
        })
        .collect()
}

// ── Investor queries ──────────────────────────────────────────────────────────

/// Rows whose investors field contains `investor` as a substring.
pub fn investor_filter(table: &FundingTable, investor: &str) -> FundingTable {
    table.filter(|r| r.has_investor(investor))
}

/// First `n` rows in table order. The table is not sorted by date first.
pub fn recent_investments(table: &FundingTable, n: usize) -> Vec<FundingRecord> {
    table.iter().take(n).cloned().collect()
}

/// Startups with the largest summed funding, descending, at most `n`.
pub fn top_investments(table: &FundingTable, n: usize) -> Vec<StartupTotal> {
    let mut ranked = ranked_startups(table);
    ranked.truncate(n);
    ranked
}

/// Summed funding per vertical. Rows missing either field are dropped, so an
/// empty map is a normal result.
pub fn sector_distribution(table: &FundingTable) -> BTreeMap<String, f64> {
    let mut sectors: BTreeMap<String, f64> = BTreeMap::new();
    for record in table {
        if let (Some(vertical), Some(amount)) = (&record.vertical, record.amount) {
            *sectors.entry(vertical.clone()).or_insert(0.0) += amount;
        }
    }
    sectors
}

/// Summed funding per year, ascending.
pub fn year_over_year(table: &FundingTable) -> Vec<(i32, f64)> {
    let mut years: BTreeMap<i32, f64> = BTreeMap::new();
    for record in table {
        if let (Some(year), Some(amount)) = (record.year(), record.amount) {
            *years.entry(year).or_insert(0.0) += amount;
        }
    }
    years.into_iter().collect()
}

/// Every investor name obtained by splitting the investors fields on `,`,
/// deduplicated and sorted.
///
/// Pieces keep their surrounding whitespace; only blank pieces are dropped.
pub fn distinct_investors(table: &FundingTable) -> Vec<String> {
    table
        .iter()
        .flat_map(|r| r.investors.split(','))
        .filter(|name| !name.trim().is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// ── Private ───────────────────────────────────────────────────────────────────

/// Per-startup sums in order of first appearance. Blank startups and startups
/// without any amount are left out.
fn sum_by_startup(table: &FundingTable) -> Vec<StartupTotal> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<StartupTotal> = Vec::new();

    for record in table {
        let (Some(startup), Some(amount)) = (record.startup_key(), record.amount) else {
            continue;
        };
        match index.get(startup) {
            Some(&i) => totals[i].amount += amount,
            None => {
                index.insert(startup, totals.len());
                totals.push(StartupTotal {
                    startup: startup.to_string(),
                    amount,
                });
            }
        }
    }

    totals
}

/// [`sum_by_startup`] sorted descending; the sort is stable so ties keep
/// first-appearance order.
fn ranked_startups(table: &FundingTable) -> Vec<StartupTotal> {
    let mut totals = sum_by_startup(table);
    totals.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    totals
}

// ── Tests ─────────────────────────────────────────────────────────────────────
