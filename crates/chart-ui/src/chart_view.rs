//! Stacked bar chart view for the importtime-chart TUI.
//!
//! One horizontal bar per top-level import, sliced into coloured per-package
//! segments, with a legend of the heaviest packages underneath.

use std::collections::HashMap;

use ratatui::{
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use chart_core::formatting;
use chart_core::models::{ChartRow, ChartTotals};

use crate::components::bar::SegmentBar;
use crate::themes::Theme;

/// Width of the parent-import name column.
const NAME_WIDTH: usize = 22;
/// Columns reserved for the duration label after each bar.
const LABEL_WIDTH: usize = 14;
/// Fixed lines around the bar rows: header (2), separator, legend, hints.
const CHROME_LINES: usize = 5;
/// Maximum number of packages shown in the legend.
const LEGEND_MAX: usize = 5;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Column/row budget derived from the target area before line building.
struct ChartGeometry {
    line_width: usize,
    bar_width: u16,
    max_bars: usize,
}

impl ChartGeometry {
    fn fit(inner: Rect) -> Self {
        let line_width = inner.width as usize;
        let bar_width = line_width
            .saturating_sub(NAME_WIDTH + LABEL_WIDTH + 2)
            .max(10) as u16;
        let max_bars = (inner.height as usize).saturating_sub(CHROME_LINES);
        Self {
            line_width,
            bar_width,
            max_bars,
        }
    }
}

// ── Main render ───────────────────────────────────────────────────────────────

/// Render the chart view into `area`.
///
/// `scroll` is the index of the first visible row; rows beyond the area
/// height are cut off and reachable by scrolling.
pub fn render_chart_view(
    frame: &mut Frame,
    area: Rect,
    rows: &[ChartRow],
    totals: &ChartTotals,
    source: &str,
    scroll: usize,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.table_border)
        .title(Span::styled(
            " Time required to import a package ",
            theme.header,
        ));
    let inner = block.inner(area);
    let geometry = ChartGeometry::fit(inner);

    let lines = build_chart_lines(rows, totals, source, scroll, &geometry, theme);
    frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

/// Render a "no data" placeholder when the log yielded no import timings.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No import timings found", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Generate a log with: python -X importtime your_script.py 2> import.log",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" importtime-chart "),
        ),
        area,
    );
}

// ── Line builders ─────────────────────────────────────────────────────────────

/// Build the full `Vec<Line>` for the chart view (extracted for testability).
fn build_chart_lines<'a>(
    rows: &[ChartRow],
    totals: &ChartTotals,
    source: &str,
    scroll: usize,
    geometry: &ChartGeometry,
    theme: &'a Theme,
) -> Vec<Line<'a>> {
    let mut lines: Vec<Line<'a>> = Vec::with_capacity(geometry.max_bars + CHROME_LINES);
    let slots = package_slots(rows);

    // ── Header ────────────────────────────────────────────────────────────────
    lines.push(Line::from(vec![
        Span::styled("source: ", theme.label),
        Span::styled(source.to_string(), theme.value),
        Span::raw("   "),
        Span::styled(
            format!(
                "{} parents | {} packages | total {} ms",
                totals.parent_count,
                totals.package_count,
                formatting::format_ms(totals.total_micros)
            ),
            theme.label,
        ),
    ]));
    lines.push(Line::from(Span::styled(
        "─".repeat(geometry.line_width),
        theme.separator,
    )));

    // ── Bars ──────────────────────────────────────────────────────────────────
    // All bars share one scale so their lengths stay comparable.
    let scale = rows.iter().map(|r| r.total_micros).max().unwrap_or(0);

    for row in rows.iter().skip(scroll).take(geometry.max_bars) {
        let name = truncate_name(&row.parent_import, NAME_WIDTH);
        let segments: Vec<(usize, u64)> = row
            .segments
            .iter()
            .map(|s| (slots.get(&s.package).copied().unwrap_or(0), s.micros))
            .collect();
        let bar = SegmentBar {
            segments,
            scale_micros: scale,
            theme,
            width: geometry.bar_width,
        };

        let mut spans = vec![
            Span::styled(format!("{:<width$}", name, width = NAME_WIDTH), theme.text),
            Span::raw(" "),
        ];
        spans.extend(bar.to_line().spans);
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("{} ms", formatting::format_ms(row.total_micros)),
            theme.bar_label,
        ));
        lines.push(Line::from(spans));
    }

    // ── Legend and hints ──────────────────────────────────────────────────────
    lines.push(Line::from(Span::styled(
        "─".repeat(geometry.line_width),
        theme.separator,
    )));
    lines.push(build_legend(rows, &slots, theme));
    lines.push(Line::from(Span::styled(
        "q: quit   c: chart   t: table   s: sort   ↑/↓: scroll",
        theme.dim,
    )));

    lines
}

/// Legend of the heaviest packages, one coloured swatch per entry.
fn build_legend<'a>(
    rows: &[ChartRow],
    slots: &HashMap<String, usize>,
    theme: &'a Theme,
) -> Line<'a> {
    let mut by_package: HashMap<&str, u64> = HashMap::new();
    for row in rows {
        for segment in &row.segments {
            *by_package.entry(segment.package.as_str()).or_insert(0) += segment.micros;
        }
    }

    let mut entries: Vec<(&str, u64)> = by_package.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries.truncate(LEGEND_MAX);

    let mut spans: Vec<Span<'a>> = Vec::with_capacity(entries.len() * 2);
    for (package, micros) in entries {
        let slot = slots.get(package).copied().unwrap_or(0);
        spans.push(Span::styled("█ ", theme.package_style(slot)));
        spans.push(Span::styled(
            format!("{} ({})  ", package, formatting::format_duration(micros)),
            theme.label,
        ));
    }
    Line::from(spans)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Assign each package a stable palette slot in first-seen order.
fn package_slots(rows: &[ChartRow]) -> HashMap<String, usize> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    for row in rows {
        for segment in &row.segments {
            let next = slots.len();
            slots.entry(segment.package.clone()).or_insert(next);
        }
    }
    slots
}

/// Cut `name` down to at most `max_width` display columns, appending `…`
/// when anything was removed.
fn truncate_name(name: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(name) <= max_width {
        return name.to_string();
    }

    let budget = max_width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0usize;
    for ch in name.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
