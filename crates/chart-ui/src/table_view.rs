//! Per-package table view for the importtime-chart TUI.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with one row per
//! (parent import, package) pair plus a highlighted totals row at the bottom.

use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use chart_core::formatting;
use chart_core::models::{ChartRow, ChartTotals};

use crate::themes::Theme;

/// Data for a single row in the package table.
#[derive(Debug, Clone)]
pub struct PackageRowData {
    /// Top-level import this package was loaded under.
    pub parent: String,
    /// Package (module) name.
    pub package: String,
    /// Time attributed to this package under this parent, in microseconds.
    pub micros: u64,
    /// Share of the grand total, in percent.
    pub share: f64,
}

/// Flatten chart rows into table rows, keeping chart order.
///
/// Each segment becomes one table row; `share` is its percentage of
/// `totals.total_micros`.
pub fn build_table_rows(rows: &[ChartRow], totals: &ChartTotals) -> Vec<PackageRowData> {
    let mut out = Vec::new();
    for row in rows {
        for segment in &row.segments {
            out.push(PackageRowData {
                parent: row.parent_import.clone(),
                package: segment.package.clone(),
                micros: segment.micros,
                share: formatting::percentage(segment.micros, totals.total_micros),
            });
        }
    }
    out
}

/// Render the package table into `area`.
///
/// The table has one data row per [`PackageRowData`] entry, followed by a
/// highlighted totals row, all within a bordered block.
pub fn render_table_view(
    frame: &mut Frame,
    area: Rect,
    rows: &[PackageRowData],
    totals: &ChartTotals,
    theme: &Theme,
) {
    let header_cells = ["Parent Import", "Package", "Duration (ms)", "Share"]
        .iter()
        .map(|h| Cell::from(*h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let data_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                Cell::from(row.parent.clone()),
                Cell::from(row.package.clone()),
                Cell::from(formatting::format_ms(row.micros)),
                Cell::from(format!("{:.1}%", row.share)),
            ])
            .style(style)
        })
        .collect();

    // Totals row stands apart from the zebra striping.
    let total_row = Row::new(vec![
        Cell::from("TOTAL"),
        Cell::from(format!("{} packages", totals.package_count)),
        Cell::from(formatting::format_ms(totals.total_micros)),
        Cell::from(format!(
            "{:.1}%",
            formatting::percentage(totals.total_micros, totals.total_micros)
        )),
    ])
    .style(theme.table_total);

    let mut all_rows = data_rows;
    all_rows.push(total_row);

    let widths = [
        Constraint::Length(24),
        Constraint::Length(28),
        Constraint::Length(14),
        Constraint::Length(8),
    ];

    let table = Table::new(all_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Import timings "),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chart_core::models::ChartSegment;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn make_rows() -> Vec<ChartRow> {
        vec![
            ChartRow {
                parent_import: "encodings".to_string(),
                total_micros: 450,
                segments: vec![
                    ChartSegment {
                        package: "_codecs".to_string(),
                        micros: 200,
                    },
                    ChartSegment {
                        package: "encodings.utf_8".to_string(),
                        micros: 150,
                    },
                    ChartSegment {
                        package: "encodings".to_string(),
                        micros: 100,
                    },
                ],
            },
            ChartRow {
                parent_import: "abc".to_string(),
                total_micros: 80,
                segments: vec![ChartSegment {
                    package: "abc".to_string(),
                    micros: 80,
                }],
            },
        ]
    }

    fn make_totals() -> ChartTotals {
        ChartTotals {
            total_micros: 530,
            parent_count: 2,
            package_count: 4,
            record_count: 4,
        }
    }

    // ── build_table_rows ─────────────────────────────────────────────────────

    #[test]
    fn test_build_table_rows_keeps_chart_order() {
        let data = build_table_rows(&make_rows(), &make_totals());

        assert_eq!(data.len(), 4);
        assert_eq!(data[0].parent, "encodings");
        assert_eq!(data[0].package, "_codecs");
        assert_eq!(data[1].package, "encodings.utf_8");
        assert_eq!(data[2].package, "encodings");
        assert_eq!(data[3].parent, "abc");
    }

    #[test]
    fn test_build_table_rows_share_of_total() {
        let data = build_table_rows(&make_rows(), &make_totals());

        assert!((data[0].share - 37.7).abs() < 1e-9, "share = {}", data[0].share);
        assert!((data[1].share - 28.3).abs() < 1e-9);
        assert!((data[3].share - 15.1).abs() < 1e-9);
    }

    #[test]
    fn test_build_table_rows_zero_total() {
        let rows = vec![ChartRow {
            parent_import: "x".to_string(),
            total_micros: 0,
            segments: vec![ChartSegment {
                package: "x".to_string(),
                micros: 0,
            }],
        }];
        let data = build_table_rows(&rows, &ChartTotals::default());
        assert_eq!(data[0].share, 0.0);
    }

    // ── Render (does not panic) ───────────────────────────────────────────────

    #[test]
    fn test_render_table_view_does_not_panic() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let data = build_table_rows(&make_rows(), &make_totals());
        let totals = make_totals();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_table_view(frame, area, &data, &totals, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_table_view_empty_rows_does_not_panic() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let data: Vec<PackageRowData> = vec![];

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_table_view(frame, area, &data, &ChartTotals::default(), &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_table_view_light_theme_does_not_panic() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::light();
        let data = build_table_rows(&make_rows(), &make_totals());
        let totals = make_totals();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_table_view(frame, area, &data, &totals, &theme);
            })
            .unwrap();
    }
}
