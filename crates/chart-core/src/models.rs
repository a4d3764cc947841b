use serde::{Deserialize, Serialize};

/// Ordering applied to chart rows before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Keep top-level imports in the order they appear in the log.
    Input,
    /// Sort top-level imports by total duration, longest first.
    Duration,
}

impl SortMode {
    /// Resolve a CLI argument string into a sort mode.
    pub fn from_name(name: &str) -> Option<SortMode> {
        match name {
            "input" => Some(SortMode::Input),
            "duration" => Some(SortMode::Duration),
            _ => None,
        }
    }
}

/// One timing entry parsed from a single log line.
///
/// Ephemeral: produced per matching line and consumed immediately by the tree
/// builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingRecord {
    /// Time spent importing this package itself, in microseconds.
    pub self_micros: u64,
    /// Time including all nested imports, in microseconds.
    pub cumulative_micros: u64,
    /// Nesting level derived from the indentation width after the second pipe.
    pub depth: usize,
    /// Package name, trimmed of surrounding whitespace.
    pub name: String,
}

/// A node in the reconstructed import forest.
///
/// Children are exclusively owned by their parent; top-level nodes are owned
/// by the forest returned from construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportNode {
    /// Package name.
    pub name: String,
    /// Self time in microseconds.
    pub self_micros: u64,
    /// Cumulative time in microseconds.
    pub cumulative_micros: u64,
    /// Indentation depth the record carried in the log.
    pub depth: usize,
    /// Nested imports in discovery order.
    #[serde(default)]
    pub children: Vec<ImportNode>,
}

impl ImportNode {
    /// A node with no nested imports contributes a leaf record when flattened.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl From<&TimingRecord> for ImportNode {
    fn from(record: &TimingRecord) -> Self {
        ImportNode {
            name: record.name.clone(),
            self_micros: record.self_micros,
            cumulative_micros: record.cumulative_micros,
            depth: record.depth,
            children: Vec::new(),
        }
    }
}

/// One flattened duration record, ready for aggregation or export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRecord {
    /// Name of the top-level ancestor import.
    pub parent_import: String,
    /// Name of the contributing node (a leaf, or the top-level node itself).
    pub package: String,
    /// The contributing node's self time in microseconds.
    pub duration_micros: u64,
}

/// One colored slice of a chart bar: a package's share of its parent's bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSegment {
    /// Package name.
    pub package: String,
    /// Summed self time in microseconds.
    pub micros: u64,
}

/// One horizontal bar of the chart: a top-level import and its segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRow {
    /// Top-level import name (the bar's label).
    pub parent_import: String,
    /// Sum of all segment durations in microseconds.
    pub total_micros: u64,
    /// Per-package slices in first-seen order.
    #[serde(default)]
    pub segments: Vec<ChartSegment>,
}

/// Workspace-wide totals for one analysed log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartTotals {
    /// Sum of all flattened durations in microseconds.
    pub total_micros: u64,
    /// Number of distinct top-level imports.
    pub parent_count: usize,
    /// Number of distinct packages across all rows.
    pub package_count: usize,
    /// Number of flattened records aggregated.
    pub record_count: usize,
}
