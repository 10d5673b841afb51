//! Data layer for the Startup Funding Dashboard.
//!
//! Loads the funding CSV into an immutable table, answers the aggregation
//! queries behind both views, and shapes their results into report bundles.

pub mod aggregator;
pub mod loader;
pub mod report;
pub mod view;

pub use funding_core as core;
