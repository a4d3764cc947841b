//! Data layer for importtime-chart.
//!
//! Responsible for discovering and reading import-time log files, parsing
//! timing lines, reconstructing the nested import forest, flattening it into
//! duration records, aggregating chart rows and running the top-level
//! analysis pipeline.

pub mod aggregator;
pub mod analysis;
pub mod export;
pub mod parser;
pub mod reader;
pub mod tree;

pub use chart_core as core;
