//! Terminal UI layer for the startup funding dashboard.
//!
//! Provides themes, the header, metric card and chart components, the
//! overall and investor views, and the application event loop built on top
//! of [`ratatui`].

pub mod app;
pub mod components;
pub mod investor_view;
pub mod overall_view;
pub mod themes;

pub use funding_core as core;
