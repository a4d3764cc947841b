//! Main application state and TUI event loop for importtime-chart.
//!
//! [`App`] owns the theme, view mode, sort order, and the analysed log.
//! It drives a synchronous crossterm event loop and dispatches rendering
//! to the chart or table view.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

use chart_core::models::SortMode;
use chart_data::aggregator::ChartAggregator;
use chart_data::analysis::AnalysisResult;

use crate::chart_view;
use crate::table_view;
use crate::themes::Theme;

// ── ViewMode ──────────────────────────────────────────────────────────────────

/// Which view the TUI is currently rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    /// Stacked bar chart, one bar per top-level import.
    Chart,
    /// Flat per-package table.
    Table,
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the importtime-chart TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Current view mode.
    pub view_mode: ViewMode,
    /// Current row sort order.
    pub sort: SortMode,
    /// Index of the first visible chart row.
    pub scroll: usize,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    /// Analysed log data; `rows` is re-aggregated when the sort changes.
    pub analysis: AnalysisResult,
}

impl App {
    /// Construct a new application around an analysed log.
    pub fn new(
        theme_name: &str,
        view_mode: ViewMode,
        sort: SortMode,
        analysis: AnalysisResult,
    ) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            view_mode,
            sort,
            scroll: 0,
            should_quit: false,
            analysis,
        }
    }

    // ── Public event loop ─────────────────────────────────────────────────────

    /// Run the TUI until the user quits.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout so redraws stay
    /// responsive without spinning. The loop exits on `q`, `Q`, `Esc`, or
    /// `Ctrl+C`.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        loop {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }

            if self.should_quit {
                break;
            }
        }

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    // ── Key handling (extracted for testability) ──────────────────────────────

    /// Apply one key event to the application state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') => self.view_mode = ViewMode::Chart,
            KeyCode::Char('t') => self.view_mode = ViewMode::Table,
            KeyCode::Char('s') => self.toggle_sort(),
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll = (self.scroll + 1).min(self.max_scroll()),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll = (self.scroll + 10).min(self.max_scroll()),
            _ => {}
        }
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    /// Flip the sort order and rebuild the chart rows from the flat records.
    fn toggle_sort(&mut self) {
        self.sort = match self.sort {
            SortMode::Input => SortMode::Duration,
            SortMode::Duration => SortMode::Input,
        };
        self.analysis.rows = ChartAggregator::aggregate(&self.analysis.records, self.sort);
        self.scroll = self.scroll.min(self.max_scroll());
    }

    fn max_scroll(&self) -> usize {
        self.analysis.rows.len().saturating_sub(1)
    }

    /// Render the current application state into `frame`.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        if self.analysis.rows.is_empty() {
            chart_view::render_no_data(frame, area, &self.theme);
            return;
        }

        match self.view_mode {
            ViewMode::Chart => chart_view::render_chart_view(
                frame,
                area,
                &self.analysis.rows,
                &self.analysis.totals,
                &self.analysis.metadata.source,
                self.scroll,
                &self.theme,
            ),
            ViewMode::Table => {
                let rows = table_view::build_table_rows(&self.analysis.rows, &self.analysis.totals);
                table_view::render_table_view(frame, area, &rows, &self.analysis.totals, &self.theme);
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
