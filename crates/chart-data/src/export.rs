//! Chart JSON export.
//!
//! Serializes an analysis result into a self-contained chart document, so the
//! same picture the TUI draws can be rendered by external chart tooling.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use chart_core::error::{ChartError, Result};

use crate::analysis::AnalysisResult;

/// Chart title shared by the JSON document and the TUI header.
pub const CHART_TITLE: &str = "Time required to import a package";

/// Pixel dimensions of the rendered chart.
const CHART_WIDTH: u32 = 1920;
const CHART_HEIGHT: u32 = 2160;

// ── Document types ────────────────────────────────────────────────────────────

/// Axis labels of the chart document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisLabels {
    pub x: String,
    pub y: String,
}

/// Pixel layout of the rendered chart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChartLayout {
    pub width: u32,
    pub height: u32,
}

/// One data point: a package's duration within its top-level import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPoint {
    pub parent_import: String,
    pub package: String,
    /// Duration in milliseconds.
    pub duration_ms: f64,
}

/// A complete chart description ready for serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartDocument {
    pub title: String,
    pub labels: AxisLabels,
    pub layout: ChartLayout,
    pub data: Vec<ChartPoint>,
}

impl ChartDocument {
    /// Build a chart document from an analysis result.
    ///
    /// One data point per flattened record, in log order, with durations
    /// converted from microseconds to milliseconds.
    pub fn from_analysis(analysis: &AnalysisResult) -> Self {
        let data = analysis
            .records
            .iter()
            .map(|record| ChartPoint {
                parent_import: record.parent_import.clone(),
                package: record.package.clone(),
                duration_ms: record.duration_micros as f64 * 0.001,
            })
            .collect();

        ChartDocument {
            title: CHART_TITLE.to_string(),
            labels: AxisLabels {
                x: "Duration (ms)".to_string(),
                y: "Parent Import".to_string(),
            },
            layout: ChartLayout {
                width: CHART_WIDTH,
                height: CHART_HEIGHT,
            },
            data,
        }
    }

    /// Write the document as pretty-printed JSON to any writer.
    pub fn export<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Write the document as compact single-line JSON, newline-terminated.
    pub fn export_compact<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer(&mut writer, self)?;
        writeln!(writer)?;
        Ok(())
    }
}

// ── Public function ───────────────────────────────────────────────────────────

/// Export `analysis` as a chart document to `target`.
///
/// `"-"` writes compact JSON to stdout; anything else is treated as a file
/// path and written pretty-printed.
pub fn write_chart_json(analysis: &AnalysisResult, target: &str) -> Result<()> {
    let document = ChartDocument::from_analysis(analysis);

    if target == "-" {
        let stdout = std::io::stdout();
        return document.export_compact(stdout.lock());
    }

    let path = Path::new(target);
    let file = std::fs::File::create(path).map_err(|source| ChartError::ExportWrite {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = std::io::BufWriter::new(file);
    document.export(&mut writer)?;
    writer.flush().map_err(|source| ChartError::ExportWrite {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        "Wrote chart JSON with {} data points to {}",
        document.data.len(),
        path.display()
    );
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
