//! Display-ready report bundles for the two dashboard views.
//!
//! Nothing here renders; the bundles are handed to the terminal UI or
//! serialized for an external renderer.

use funding_core::error::Result;
use funding_core::formatting::percentage;
use funding_core::models::{FundingRecord, FundingTable, MomMode};
use serde::Serialize;
use tracing::debug;

use crate::aggregator::{self, StartupTotal, DEFAULT_LIST_LEN};

// ── Chart shapes ──────────────────────────────────────────────────────────────

/// One labelled value of an ordered chart series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

/// An ordered, labelled series for a line or bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<SeriesPoint>,
}

impl ChartSeries {
    fn new(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            points: Vec::new(),
        }
    }

    fn with_points(mut self, points: impl IntoIterator<Item = (String, f64)>) -> Self {
        self.points = points
            .into_iter()
            .map(|(label, value)| SeriesPoint { label, value })
            .collect();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Largest value in the series, `0.0` when empty.
    pub fn max_value(&self) -> f64 {
        self.points.iter().map(|p| p.value).fold(0.0, f64::max)
    }
}

/// One slice of the sector share chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorShare {
    pub vertical: String,
    pub amount: f64,
    /// Share of the investor's total, rounded to one decimal.
    pub percentage: f64,
}

/// Sector breakdown of an investor's funding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "shares", rename_all = "snake_case")]
pub enum SectorDistribution {
    /// No row has both a vertical and an amount.
    NoData,
    /// Slices ordered by vertical name.
    Shares(Vec<SectorShare>),
}

impl SectorDistribution {
    pub fn is_no_data(&self) -> bool {
        matches!(self, SectorDistribution::NoData)
    }
}

// ── Report bundles ────────────────────────────────────────────────────────────

/// Knobs shared by both views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub mom_mode: MomMode,
    pub top_n: usize,
    pub recent_n: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            mom_mode: MomMode::Total,
            top_n: DEFAULT_LIST_LEN,
            recent_n: DEFAULT_LIST_LEN,
        }
    }
}

/// Market-wide summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallReport {
    /// Sum of all amounts, in crore.
    pub total: f64,
    /// Startup with the largest summed funding.
    pub max_funding: Option<StartupTotal>,
    /// Mean funding per startup, in crore.
    pub avg_funding: f64,
    /// Number of distinct funded startups.
    pub startup_count: usize,
    pub mom_mode: MomMode,
    pub month_over_month: ChartSeries,
}

/// Drill-down for a single investor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestorReport {
    pub investor: String,
    /// Rows whose investors field matched.
    pub matched_rows: usize,
    pub recent_investments: Vec<FundingRecord>,
    pub top_investments: ChartSeries,
    pub sector_distribution: SectorDistribution,
    pub year_over_year: ChartSeries,
}

/// The bundle produced for one view selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Report {
    Overall(OverallReport),
    Investor(InvestorReport),
}

impl Report {
    /// Pretty JSON for `--output json`.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ── Builders ──────────────────────────────────────────────────────────────────

/// Assemble the overall market summary.
pub fn build_overall_report(table: &FundingTable, options: &ReportOptions) -> OverallReport {
    let mode = options.mom_mode;
    let month_over_month = ChartSeries::new(
        format!("Month-over-Month {}", mode.label()),
        "Month-Year",
        format!("{} (Cr)", mode.label()),
    )
    .with_points(
        aggregator::month_over_month(table, mode)
            .into_iter()
            .map(|p| (p.label(), p.value)),
    );

    let report = OverallReport {
        total: aggregator::total_invested(table),
        max_funding: aggregator::max_single_startup_funding(table),
        avg_funding: aggregator::average_funding_per_startup(table),
        startup_count: aggregator::distinct_startup_count(table),
        mom_mode: mode,
        month_over_month,
    };

    debug!(
        "Overall report: {} startups, {} MoM points ({})",
        report.startup_count,
        report.month_over_month.points.len(),
        mode
    );
    report
}

/// Assemble the drill-down for `investor`.
pub fn build_investor_report(
    table: &FundingTable,
    investor: &str,
    options: &ReportOptions,
) -> InvestorReport {
    let subtable = aggregator::investor_filter(table, investor);

    let top_investments = ChartSeries::new("Top Startups by Investment", "Startup", "Amount (Cr)")
        .with_points(
            aggregator::top_investments(&subtable, options.top_n)
                .into_iter()
                .map(|t| (t.startup, t.amount)),
        );

    let year_over_year = ChartSeries::new("Year-over-Year Investment", "Year", "Amount (Cr)")
        .with_points(
            aggregator::year_over_year(&subtable)
                .into_iter()
                .map(|(year, amount)| (year.to_string(), amount)),
        );

    let report = InvestorReport {
        investor: investor.to_string(),
        matched_rows: subtable.len(),
        recent_investments: aggregator::recent_investments(&subtable, options.recent_n),
        top_investments,
        sector_distribution: sector_shares(&subtable),
        year_over_year,
    };

    debug!(
        "Investor report for {:?}: {} matching rows",
        report.investor, report.matched_rows
    );
    report
}

fn sector_shares(table: &FundingTable) -> SectorDistribution {
    let sectors = aggregator::sector_distribution(table);
    if sectors.is_empty() {
        return SectorDistribution::NoData;
    }
    let total: f64 = sectors.values().sum();
    SectorDistribution::Shares(
        sectors
            .into_iter()
            .map(|(vertical, amount)| SectorShare {
                percentage: percentage(amount, total, 1),
                vertical,
                amount,
            })
            .collect(),
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(date: (i32, u32, u32), startup: &str, vertical: Option<&str>, investors: &str, amount: Option<f64>) -> FundingRecord {
        FundingRecord {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
            startup: startup.to_string(),
            vertical: vertical.map(str::to_string),
            city: Some("Bengaluru".to_string()),
            investors: investors.to_string(),
            round: Some("Seed".to_string()),
            amount,
        }
    }

    fn table() -> FundingTable {
        FundingTable::from_records(vec![
            row((2019, 3, 1), "Acme", Some("FinTech"), "Accel, Sequoia Capital", Some(75.0)),
            row((2020, 1, 1), "Beta", Some("EdTech"), "Sequoia Capital", Some(25.0)),
            row((2020, 6, 1), "Gamma", None, "Sequoia Capital India", Some(10.0)),
            row((2020, 6, 9), "Delta", Some("Food"), "Kalaari", None),
        ])
    }

    // ── Overall ───────────────────────────────────────────────────────────────

    #[test]
    fn test_overall_report_metrics() {
        let report = build_overall_report(&table(), &ReportOptions::default());
        assert!((report.total - 110.0).abs() < 1e-9);
        assert_eq!(report.startup_count, 4);
        assert_eq!(report.max_funding.as_ref().unwrap().startup, "Acme");
        assert!((report.avg_funding - 110.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_overall_report_mom_series_total() {
        let report = build_overall_report(&table(), &ReportOptions::default());
        let series = &report.month_over_month;
        assert_eq!(series.title, "Month-over-Month Total");
        assert_eq!(series.x_label, "Month-Year");
        assert_eq!(series.y_label, "Total (Cr)");
        let labels: Vec<&str> = series.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["3-2019", "1-2020", "6-2020"]);
        assert_eq!(series.max_value(), 75.0);
    }

    #[test]
    fn test_overall_report_mom_series_count() {
        let options = ReportOptions {
            mom_mode: MomMode::Count,
            ..Default::default()
        };
        let report = build_overall_report(&table(), &options);
        assert_eq!(report.mom_mode, MomMode::Count);
        assert_eq!(report.month_over_month.title, "Month-over-Month Count");
        let last = report.month_over_month.points.last().unwrap();
        assert_eq!((last.label.as_str(), last.value), ("6-2020", 2.0));
    }

    #[test]
    fn test_overall_report_empty_table() {
        let report = build_overall_report(&FundingTable::default(), &ReportOptions::default());
        assert_eq!(report.total, 0.0);
        assert!(report.max_funding.is_none());
        assert_eq!(report.avg_funding, 0.0);
        assert_eq!(report.startup_count, 0);
        assert!(report.month_over_month.is_empty());
    }

    // ── Investor ──────────────────────────────────────────────────────────────

    #[test]
    fn test_investor_report_substring_matching() {
        let report = build_investor_report(&table(), "Sequoia Capital", &ReportOptions::default());
        // "Sequoia Capital India" also contains the name.
        assert_eq!(report.matched_rows, 3);
        let recent: Vec<&str> = report
            .recent_investments
            .iter()
            .map(|r| r.startup.as_str())
            .collect();
        assert_eq!(recent, vec!["Acme", "Beta", "Gamma"]);
    }

    #[test]
    fn test_investor_report_top_and_yoy() {
        let report = build_investor_report(&table(), "Sequoia", &ReportOptions::default());
        let top: Vec<(&str, f64)> = report
            .top_investments
            .points
            .iter()
            .map(|p| (p.label.as_str(), p.value))
            .collect();
        assert_eq!(top, vec![("Acme", 75.0), ("Beta", 25.0), ("Gamma", 10.0)]);

        let yoy: Vec<(&str, f64)> = report
            .year_over_year
            .points
            .iter()
            .map(|p| (p.label.as_str(), p.value))
            .collect();
        assert_eq!(yoy, vec![("2019", 75.0), ("2020", 35.0)]);
        assert_eq!(report.year_over_year.x_label, "Year");
    }

    #[test]
    fn test_investor_report_sector_shares() {
        let report = build_investor_report(&table(), "Sequoia", &ReportOptions::default());
        let SectorDistribution::Shares(shares) = &report.sector_distribution else {
            panic!("expected shares");
        };
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].vertical, "EdTech");
        assert_eq!(shares[0].percentage, 25.0);
        assert_eq!(shares[1].vertical, "FinTech");
        assert_eq!(shares[1].percentage, 75.0);
    }

    #[test]
    fn test_investor_report_sector_no_data() {
        let report = build_investor_report(&table(), "Kalaari", &ReportOptions::default());
        assert_eq!(report.matched_rows, 1);
        assert!(report.sector_distribution.is_no_data());
        assert!(report.top_investments.is_empty());
    }

    #[test]
    fn test_investor_report_respects_list_lengths() {
        let options = ReportOptions {
            top_n: 1,
            recent_n: 2,
            ..Default::default()
        };
        let report = build_investor_report(&table(), "Sequoia", &options);
        assert_eq!(report.top_investments.points.len(), 1);
        assert_eq!(report.recent_investments.len(), 2);
    }

    // ── Serialization ─────────────────────────────────────────────────────────

    #[test]
    fn test_report_serializes_with_view_tag() {
        let report = Report::Investor(build_investor_report(
            &table(),
            "Kalaari",
            &ReportOptions::default(),
        ));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["view"], "investor");
        assert_eq!(json["investor"], "Kalaari");
        assert_eq!(json["sector_distribution"]["status"], "no_data");
        assert_eq!(json["recent_investments"][0]["date"], "2020-06-09");
        assert!(json["recent_investments"][0]["amount"].is_null());
    }

    #[test]
    fn test_report_to_json_pretty() {
        let report = Report::Overall(build_overall_report(&table(), &ReportOptions::default()));
        let json = report.to_json_pretty().unwrap();

        assert!(json.contains('\n'), "pretty output spans lines");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["view"], "overall");
        assert_eq!(value["startup_count"], 4);
    }
}
