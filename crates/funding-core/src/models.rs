use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One row of the funding dataset.
///
/// `date` and `amount` are `None` when the source cell could not be coerced;
/// the row itself is always kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingRecord {
    /// Calendar date of the funding round.
    pub date: Option<NaiveDate>,
    /// Startup name. Empty when the source cell was blank.
    pub startup: String,
    /// Business-sector category.
    pub vertical: Option<String>,
    /// City the startup is based in.
    pub city: Option<String>,
    /// Comma-separated investor names, verbatim from the source.
    pub investors: String,
    /// Funding round label (e.g. "Seed Round", "Series A").
    pub round: Option<String>,
    /// Amount raised, in crore.
    pub amount: Option<f64>,
}

impl FundingRecord {
    /// Calendar month (1-12) of `date`.
    pub fn month(&self) -> Option<u32> {
        self.date.map(|d| d.month())
    }

    /// Calendar year of `date`.
    pub fn year(&self) -> Option<i32> {
        self.date.map(|d| d.year())
    }

    /// `true` when the investors field contains `investor` as a substring.
    ///
    /// This is deliberately not an exact match against the split names: a
    /// short name also matches every longer name that contains it.
    pub fn has_investor(&self, investor: &str) -> bool {
        self.investors.contains(investor)
    }

    /// The startup name, or `None` when blank.
    pub fn startup_key(&self) -> Option<&str> {
        if self.startup.is_empty() {
            None
        } else {
            Some(&self.startup)
        }
    }
}

/// Value plotted by the month-over-month chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MomMode {
    /// Sum of amounts per month.
    #[default]
    Total,
    /// Number of funding rows per month.
    Count,
}

impl MomMode {
    /// Display name, as used in chart titles.
    pub fn label(self) -> &'static str {
        match self {
            MomMode::Total => "Total",
            MomMode::Count => "Count",
        }
    }

    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            MomMode::Total => MomMode::Count,
            MomMode::Count => MomMode::Total,
        }
    }

    /// Parse a case-insensitive mode name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "total" => Some(MomMode::Total),
            "count" => Some(MomMode::Count),
            _ => None,
        }
    }
}

impl std::fmt::Display for MomMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Immutable, in-memory funding table in load order.
///
/// Built once by the loader and then only borrowed; filtering produces a new
/// table owned by the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FundingTable {
    records: Vec<FundingRecord>,
}

impl FundingTable {
    /// Wrap `records`, preserving their order.
    pub fn from_records(records: Vec<FundingRecord>) -> Self {
        Self { records }
    }

    /// All rows in load order.
    pub fn records(&self) -> &[FundingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate rows in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, FundingRecord> {
        self.records.iter()
    }

    /// New table holding the rows for which `predicate` returns `true`.
    pub fn filter<F>(&self, predicate: F) -> FundingTable
    where
        F: Fn(&FundingRecord) -> bool,
    {
        FundingTable {
            records: self.records.iter().filter(|r| predicate(r)).cloned().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FundingTable {
    type Item = &'a FundingRecord;
    type IntoIter = std::slice::Iter<'a, FundingRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
