//! View selection: which report to build for a user choice.

use funding_core::error::{DashboardError, Result};
use funding_core::models::FundingTable;
use tracing::info;

use crate::aggregator::distinct_investors;
use crate::report::{build_investor_report, build_overall_report, Report, ReportOptions};

/// The two dashboard views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Market-wide summary.
    Overall,
    /// Drill-down for the named investor.
    Investor(String),
}

impl View {
    /// Build a view from a view name and an optional investor, as given on
    /// the command line.
    pub fn from_parts(view: &str, investor: Option<&str>) -> Result<Self> {
        match view {
            "overall" => Ok(View::Overall),
            "investor" => Ok(View::Investor(investor.unwrap_or_default().to_string())),
            other => Err(DashboardError::Config(format!("unknown view: {other}"))),
        }
    }

    /// Sidebar caption.
    pub fn title(&self) -> &str {
        match self {
            View::Overall => "Overall Analysis",
            View::Investor(name) => name,
        }
    }
}

/// Holds the selectable investor names for a table and dispatches a [`View`]
/// to the matching report builder.
#[derive(Debug, Clone)]
pub struct ViewSelector {
    investors: Vec<String>,
}

impl ViewSelector {
    pub fn new(table: &FundingTable) -> Self {
        let investors = distinct_investors(table);
        info!("{} distinct investors available", investors.len());
        Self { investors }
    }

    /// Investor names in sorted order.
    pub fn investors(&self) -> &[String] {
        &self.investors
    }

    /// `true` when `name` is one of the split investor names.
    pub fn contains(&self, name: &str) -> bool {
        self.investors
            .binary_search_by(|probe| probe.as_str().cmp(name))
            .is_ok()
    }

    /// Check that `view` can be built.
    pub fn validate(&self, view: &View) -> Result<()> {
        match view {
            View::Overall => Ok(()),
            View::Investor(name) if name.trim().is_empty() => Err(DashboardError::EmptyInvestor),
            View::Investor(name) if !self.contains(name) => {
                Err(DashboardError::UnknownInvestor(name.clone()))
            }
            View::Investor(_) => Ok(()),
        }
    }

    /// Validate `view` and build its report from `table`.
    pub fn build(
        &self,
        view: &View,
        table: &FundingTable,
        options: &ReportOptions,
    ) -> Result<Report> {
        self.validate(view)?;
        let report = match view {
            View::Overall => Report::Overall(build_overall_report(table, options)),
            View::Investor(name) => Report::Investor(build_investor_report(table, name, options)),
        };
        Ok(report)
    }
}
