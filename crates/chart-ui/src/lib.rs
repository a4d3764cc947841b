//! Terminal UI layer for importtime-chart.
//!
//! Provides themes, the stacked bar component, chart and table views, and the
//! main application event loop built on top of [`ratatui`] for rendering
//! import-time breakdowns in the terminal.

pub mod app;
pub mod chart_view;
pub mod components;
pub mod table_view;
pub mod themes;

pub use chart_core as core;
