//! Timing-line parser for importtime-chart.
//!
//! Recognises the `import time: <self> | <cumulative> | <name>` lines that
//! Python's `-X importtime` tracer writes to stderr and turns each one into a
//! [`TimingRecord`]. Everything else in the log (the header line, interleaved
//! program output, blank lines) is skipped.

use chart_core::models::TimingRecord;
use regex::Regex;
use tracing::debug;

// ── LineParser ────────────────────────────────────────────────────────────────

/// Parses individual log lines into [`TimingRecord`]s.
pub struct LineParser {
    /// Matches `import time:<ws>+<int><ws>*|<ws>*<int><ws>*|<ws>+<name>`.
    /// The third capture is the indentation run whose width encodes depth.
    line_re: Regex,
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser {
    /// Create a parser with the timing-line pattern compiled once.
    pub fn new() -> Self {
        Self {
            line_re: Regex::new(r"^import time:\s+(\d+)\s*\|\s*(\d+)\s*\|(\s+)(.+)$")
                .expect("regex is valid"),
        }
    }

    /// Parse one line.
    ///
    /// Returns `None` for anything that is not a timing line; that is the
    /// expected outcome for a large share of real log lines and never an
    /// error. An integer field too large for `u64` is treated the same way.
    pub fn parse_line(&self, line: &str) -> Option<TimingRecord> {
        let caps = self.line_re.captures(line)?;

        let self_micros = caps[1].parse::<u64>().ok()?;
        let cumulative_micros = caps[2].parse::<u64>().ok()?;
        let depth = caps[3].chars().count();
        let name = caps[4].trim().to_string();

        Some(TimingRecord {
            self_micros,
            cumulative_micros,
            depth,
            name,
        })
    }

    /// Parse a sequence of lines in order, keeping only timing records.
    pub fn parse_lines<S: AsRef<str>>(&self, lines: &[S]) -> Vec<TimingRecord> {
        let mut records = Vec::new();
        let mut skipped = 0usize;

        for line in lines {
            match self.parse_line(line.as_ref()) {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        }

        debug!(
            "LineParser: {} timing records, {} non-data lines skipped",
            records.len(),
            skipped
        );
        records
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
