//! Aggregation of flattened import records into chart rows.
//!
//! Groups records by top-level import while keeping first-seen order, so the
//! chart reads in the same order the interpreter finished the imports.

use std::collections::{HashMap, HashSet};

use chart_core::models::{ChartRow, ChartSegment, ChartTotals, FlatRecord, SortMode};

// ── ChartAggregator ───────────────────────────────────────────────────────────

/// Stateless helper that groups flattened records into chart rows.
pub struct ChartAggregator;

impl ChartAggregator {
    /// Group `records` into one row per top-level import.
    ///
    /// Rows and their segments keep first-seen order; a repeated
    /// (parent, package) pair sums its durations into one segment. With
    /// [`SortMode::Duration`] rows are reordered by total duration, longest
    /// first.
    pub fn aggregate(records: &[FlatRecord], sort: SortMode) -> Vec<ChartRow> {
        let mut rows: Vec<ChartRow> = Vec::new();
        let mut row_index: HashMap<String, usize> = HashMap::new();

        for record in records {
            let idx = match row_index.get(&record.parent_import) {
                Some(&idx) => idx,
                None => {
                    row_index.insert(record.parent_import.clone(), rows.len());
                    rows.push(ChartRow {
                        parent_import: record.parent_import.clone(),
                        total_micros: 0,
                        segments: Vec::new(),
                    });
                    rows.len() - 1
                }
            };

            let row = &mut rows[idx];
            row.total_micros += record.duration_micros;
            match row
                .segments
                .iter_mut()
                .find(|s| s.package == record.package)
            {
                Some(segment) => segment.micros += record.duration_micros,
                None => row.segments.push(ChartSegment {
                    package: record.package.clone(),
                    micros: record.duration_micros,
                }),
            }
        }

        if sort == SortMode::Duration {
            // Stable sort, so equal totals keep their first-seen order.
            rows.sort_by(|a, b| b.total_micros.cmp(&a.total_micros));
        }

        rows
    }

    /// Sum up `records` into a single [`ChartTotals`].
    pub fn calculate_totals(records: &[FlatRecord]) -> ChartTotals {
        let mut parents: HashSet<&str> = HashSet::new();
        let mut packages: HashSet<&str> = HashSet::new();
        let mut total_micros = 0u64;

        for record in records {
            parents.insert(record.parent_import.as_str());
            packages.insert(record.package.as_str());
            total_micros += record.duration_micros;
        }

        ChartTotals {
            total_micros,
            parent_count: parents.len(),
            package_count: packages.len(),
            record_count: records.len(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
