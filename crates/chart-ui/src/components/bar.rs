use crate::themes::Theme;
use ratatui::text::{Line, Span};

// ── SegmentBar ────────────────────────────────────────────────────────────────

/// A proportional multi-coloured bar visualising per-package time within one
/// top-level import.
///
/// Each package is rendered as a contiguous run of `█` whose width is its
/// share of `scale_micros`; the remainder up to the full width is drawn as
/// `░`, so bars of different rows stay visually comparable.
pub struct SegmentBar<'a> {
    /// Ordered `(palette slot, microseconds)` pairs, one per package segment.
    pub segments: Vec<(usize, u64)>,
    /// Value that maps to the full bar width (usually the longest row total).
    pub scale_micros: u64,
    /// Theme from which segment colours are taken.
    pub theme: &'a Theme,
    /// Total width of the bar in terminal columns.
    pub width: u16,
}

impl<'a> SegmentBar<'a> {
    /// Construct a new bar with the default width.
    pub fn new(segments: Vec<(usize, u64)>, scale_micros: u64, theme: &'a Theme) -> Self {
        Self {
            segments,
            scale_micros,
            theme,
            width: 40,
        }
    }

    /// Render the bar as a [`Line`] suitable for embedding in any ratatui
    /// widget that accepts `Line` values.
    pub fn to_line(&self) -> Line<'a> {
        let mut spans: Vec<Span<'a>> = Vec::new();
        let width = self.width as usize;
        let mut used = 0usize;

        if self.scale_micros > 0 {
            for (slot, micros) in &self.segments {
                let share = *micros as f64 / self.scale_micros as f64;
                // Per-segment rounding can overshoot; never draw past the bar.
                let chars = ((share * width as f64).round() as usize).min(width - used);
                if chars > 0 {
                    spans.push(Span::styled(
                        "█".repeat(chars),
                        self.theme.package_style(*slot),
                    ));
                    used += chars;
                }
            }
        }

        if used < width {
            spans.push(Span::styled("░".repeat(width - used), self.theme.bar_empty));
        }

        Line::from(spans)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::themes::Theme;

    #[test]
    fn test_segment_bar_half_width() {
        let theme = Theme::dark();
        let bar = SegmentBar::new(vec![(0, 500)], 1000, &theme);
        let line = bar.to_line();

        assert_eq!(line.spans.len(), 2, "expected segment + filler");
        assert_eq!(line.spans[0].content.chars().count(), 20);
        assert!(line.spans[0].content.chars().all(|c| c == '█'));
        assert_eq!(line.spans[1].content.chars().count(), 20);
        assert!(line.spans[1].content.chars().all(|c| c == '░'));
    }

    #[test]
    fn test_segment_bar_full_width_has_no_filler() {
        let theme = Theme::dark();
        let bar = SegmentBar::new(vec![(0, 1000)], 1000, &theme);
        let line = bar.to_line();

        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].content.chars().count(), 40);
    }

    #[test]
    fn test_segment_bar_proportional_segments() {
        let theme = Theme::dark();
        let bar = SegmentBar::new(vec![(0, 500), (1, 250), (2, 250)], 1000, &theme);
        let line = bar.to_line();

        let widths: Vec<usize> = line
            .spans
            .iter()
            .map(|s| s.content.chars().count())
            .collect();
        assert_eq!(widths, vec![20, 10, 10]);
    }

    #[test]
    fn test_segment_bar_zero_scale_is_all_filler() {
        let theme = Theme::dark();
        let bar = SegmentBar::new(vec![(0, 500)], 0, &theme);
        let line = bar.to_line();

        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].content.chars().count(), 40);
        assert!(line.spans[0].content.chars().all(|c| c == '░'));
    }

    #[test]
    fn test_segment_bar_empty_segments_is_all_filler() {
        let theme = Theme::dark();
        let bar = SegmentBar::new(vec![], 1000, &theme);
        let line = bar.to_line();

        assert_eq!(line.spans.len(), 1);
        assert!(line.spans[0].content.chars().all(|c| c == '░'));
    }

    #[test]
    fn test_segment_bar_rounding_never_exceeds_width() {
        let theme = Theme::dark();
        // 0.6 + 0.6 of the width rounds to 24 + 24 > 40 without clamping.
        let bar = SegmentBar::new(vec![(0, 600), (1, 600)], 1000, &theme);
        let line = bar.to_line();

        let total: usize = line.spans.iter().map(|s| s.content.chars().count()).sum();
        assert_eq!(total, 40);
    }

    #[test]
    fn test_segment_bar_tiny_segment_skipped() {
        let theme = Theme::dark();
        let bar = SegmentBar::new(vec![(0, 1), (1, 999)], 1000, &theme);
        let line = bar.to_line();

        // The 1 µs slice rounds to zero columns and is dropped.
        assert!(line.spans.iter().all(|s| !s.content.is_empty()));
        let total: usize = line.spans.iter().map(|s| s.content.chars().count()).sum();
        assert_eq!(total, 40);
    }
}
