/// Format a microsecond count as milliseconds with one decimal place and
/// thousands separators, without a unit suffix.
///
/// # Examples
///
/// ```
/// use chart_core::formatting::format_ms;
///
/// assert_eq!(format_ms(1_234), "1.2");
/// assert_eq!(format_ms(5_678_900), "5,678.9");
/// assert_eq!(format_ms(0), "0.0");
/// ```
pub fn format_ms(micros: u64) -> String {
    // Round to tenths of a millisecond in integer space so values like
    // 1_250 µs land on "1.3" regardless of binary float representation.
    let tenths = (micros + 50) / 100;
    format!("{}.{}", group_thousands(tenths / 10), tenths % 10)
}

/// Format a microsecond count as a compact human-readable duration, picking
/// the unit by magnitude.
///
/// * `< 1 ms` → `"456 µs"`
/// * `< 1 s` → `"45.6 ms"`
/// * `≥ 1 s` → `"1.23 s"`
///
/// # Examples
///
/// ```
/// use chart_core::formatting::format_duration;
///
/// assert_eq!(format_duration(456), "456 µs");
/// assert_eq!(format_duration(45_600), "45.6 ms");
/// assert_eq!(format_duration(1_234_567), "1.23 s");
/// ```
pub fn format_duration(micros: u64) -> String {
    if micros < 1_000 {
        format!("{} µs", micros)
    } else if micros < 1_000_000 {
        let tenths = (micros + 50) / 100;
        format!("{}.{} ms", tenths / 10, tenths % 10)
    } else {
        let hundredths = (micros + 5_000) / 10_000;
        format!(
            "{}.{:02} s",
            group_thousands(hundredths / 100),
            hundredths % 100
        )
    }
}

/// Calculate `part` as a percentage of `whole`, rounded to one decimal place.
///
/// Returns `0.0` when `whole` is zero.
///
/// # Examples
///
/// ```
/// use chart_core::formatting::percentage;
///
/// assert!((percentage(50, 200) - 25.0).abs() < 1e-9);
/// assert_eq!(percentage(10, 0), 0.0);
/// ```
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let raw = part as f64 * 100.0 / whole as f64;
    (raw * 10.0).round() / 10.0
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Render an integer with a comma every three digits.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = Vec::with_capacity(digits.len() + digits.len() / 3);
    for (i, byte) in digits.bytes().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(b',');
        }
        out.push(byte);
    }
    out.reverse();
    // Built from ASCII digits and commas only.
    String::from_utf8(out).unwrap_or(digits)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── format_ms ────────────────────────────────────────────────────────────

    #[test]
    fn test_format_ms_zero() {
        assert_eq!(format_ms(0), "0.0");
    }

    #[test]
    fn test_format_ms_sub_millisecond() {
        assert_eq!(format_ms(456), "0.5");
        assert_eq!(format_ms(49), "0.0");
    }

    #[test]
    fn test_format_ms_basic() {
        assert_eq!(format_ms(1_234), "1.2");
        assert_eq!(format_ms(1_250), "1.3");
    }

    #[test]
    fn test_format_ms_with_thousands() {
        assert_eq!(format_ms(5_678_900), "5,678.9");
        assert_eq!(format_ms(1_000_000_000), "1,000,000.0");
    }

    // ── format_duration ──────────────────────────────────────────────────────

    #[test]
    fn test_format_duration_micros() {
        assert_eq!(format_duration(0), "0 µs");
        assert_eq!(format_duration(999), "999 µs");
    }

    #[test]
    fn test_format_duration_millis() {
        assert_eq!(format_duration(1_000), "1.0 ms");
        assert_eq!(format_duration(45_600), "45.6 ms");
        assert_eq!(format_duration(999_949), "999.9 ms");
    }

    #[test]
    fn test_format_duration_seconds() {
        assert_eq!(format_duration(1_000_000), "1.00 s");
        assert_eq!(format_duration(1_234_567), "1.23 s");
        assert_eq!(format_duration(62_500_000), "62.50 s");
    }

    #[test]
    fn test_format_duration_large_seconds_grouped() {
        assert_eq!(format_duration(1_234_000_000), "1,234.00 s");
    }

    // ── percentage ───────────────────────────────────────────────────────────

    #[test]
    fn test_percentage_basic() {
        let p = percentage(50, 200);
        assert!((p - 25.0).abs() < 1e-9, "percentage = {p}");
    }

    #[test]
    fn test_percentage_zero_whole() {
        assert_eq!(percentage(10, 0), 0.0);
    }

    #[test]
    fn test_percentage_full() {
        let p = percentage(100, 100);
        assert!((p - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentage_rounds_to_one_decimal() {
        let p = percentage(1, 3);
        assert!((p - 33.3).abs() < 1e-9, "percentage = {p}");
    }

    // ── group_thousands (via format_ms) ──────────────────────────────────────

    #[test]
    fn test_group_thousands_short() {
        assert_eq!(format_ms(5_000), "5.0");
    }

    #[test]
    fn test_group_thousands_four_digits() {
        assert_eq!(format_ms(1_234_000), "1,234.0");
    }

    #[test]
    fn test_group_thousands_seven_digits() {
        assert_eq!(format_ms(1_234_567_000), "1,234,567.0");
    }
}
