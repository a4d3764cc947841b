//! Main analysis pipeline for importtime-chart.
//!
//! Orchestrates reading, parsing, tree reconstruction, flattening and
//! aggregation, returning an [`AnalysisResult`] ready for the UI or export
//! layer.

use std::path::Path;

use chrono::Utc;

use chart_core::error::Result;
use chart_core::models::{ChartRow, ChartTotals, FlatRecord, SortMode};

use crate::aggregator::ChartAggregator;
use crate::parser::LineParser;
use crate::reader::read_log_lines;
use crate::tree::{build_forest, flatten_forest};

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the analysis result.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this result was generated.
    pub generated_at: String,
    /// Path of the log file that was analysed.
    pub source: String,
    /// Total number of lines read from the log, matching or not.
    pub lines_scanned: usize,
    /// Number of lines that parsed into timing records.
    pub records_parsed: usize,
    /// Number of top-level import trees reconstructed.
    pub trees_built: usize,
    /// Number of flattened duration records produced.
    pub records_flattened: usize,
    /// Wall-clock seconds spent reading the log file.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent parsing, tree building and flattening.
    pub parse_time_seconds: f64,
}

/// The complete output of [`analyze_log`].
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Flattened duration records in log order.
    pub records: Vec<FlatRecord>,
    /// Aggregated chart rows, sorted per the requested mode.
    pub rows: Vec<ChartRow>,
    /// Totals across all records.
    pub totals: ChartTotals,
    /// Metadata about this analysis run.
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full analysis pipeline over one log file.
///
/// 1. Read the log lines from `path`.
/// 2. Parse matching lines into timing records.
/// 3. Rebuild the import forest from the indentation depths.
/// 4. Flatten each tree into per-package duration records.
/// 5. Aggregate into chart rows and totals.
///
/// Only the read step can fail; a log with no matching lines yields an empty
/// result rather than an error.
pub fn analyze_log(path: &Path, sort: SortMode) -> Result<AnalysisResult> {
    // ── Step 1: Read lines ────────────────────────────────────────────────────
    let load_start = std::time::Instant::now();
    let lines = read_log_lines(path)?;
    let load_time = load_start.elapsed().as_secs_f64();

    // ── Step 2-4: Parse, rebuild trees, flatten ───────────────────────────────
    let parse_start = std::time::Instant::now();
    let parser = LineParser::new();
    let records = parser.parse_lines(&lines);
    let forest = build_forest(&records);
    let flattened = flatten_forest(&forest);
    let parse_time = parse_start.elapsed().as_secs_f64();

    // ── Step 5: Aggregate ─────────────────────────────────────────────────────
    let rows = ChartAggregator::aggregate(&flattened, sort);
    let totals = ChartAggregator::calculate_totals(&flattened);

    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        source: path.display().to_string(),
        lines_scanned: lines.len(),
        records_parsed: records.len(),
        trees_built: forest.len(),
        records_flattened: flattened.len(),
        load_time_seconds: load_time,
        parse_time_seconds: parse_time,
    };

    Ok(AnalysisResult {
        records: flattened,
        rows,
        totals,
        metadata,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
