//! Core types for importtime-chart.
//!
//! Defines the timing-record and import-node data model shared by the parsing
//! and rendering layers, the workspace error type, duration formatting
//! helpers, and CLI settings with last-used-parameter persistence.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{ChartError, Result};
