//! Core types shared by every Startup Funding Dashboard crate.
//!
//! Holds the funding record model, the immutable funding table, field
//! coercion for dates and amounts, number formatting, the error type and the
//! command-line settings.

pub mod coerce;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
