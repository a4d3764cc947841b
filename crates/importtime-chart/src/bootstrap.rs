use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure the standard `~/.importtime-chart/` directory hierarchy exists.
///
/// Creates the following directories if absent (including any missing parents):
/// - `~/.importtime-chart/` (persisted last-used settings)
/// - `~/.importtime-chart/logs/`
pub fn ensure_directories() -> anyhow::Result<()> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let chart_dir = home.join(".importtime-chart");
    std::fs::create_dir_all(&chart_dir)?;
    std::fs::create_dir_all(chart_dir.join("logs"))?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
///
/// Output goes to `log_file` when given, otherwise to stderr; stdout stays
/// clean for `--export -`.
pub fn setup_logging(log_level: &str, log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(normalise_level(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            let layer = fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_ansi(false)
                .with_writer(std::sync::Arc::new(file));
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
        None => {
            let layer = fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
    }

    Ok(())
}

/// Map Python log-level names to tracing filter directives (lowercase).
fn normalise_level(log_level: &str) -> String {
    let upper = log_level.to_uppercase();
    match upper.as_str() {
        "DEBUG" | "CRITICAL" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" => "error".to_string(),
        _ => log_level.to_lowercase(),
    }
}

// ── Log-target discovery ───────────────────────────────────────────────────────

/// Resolve where to look for a log when no `FILE` argument was given.
///
/// Prefers an `uploads/` directory under the working directory when one
/// exists, falling back to the working directory itself.
pub fn default_log_target() -> PathBuf {
    default_log_target_in(Path::new("."))
}

/// Same as [`default_log_target`] but rooted at `base` (used for testing).
pub fn default_log_target_in(base: &Path) -> PathBuf {
    let uploads = base.join("uploads");
    if uploads.is_dir() {
        uploads
    } else {
        base.to_path_buf()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ── test_ensure_directories ───────────────────────────────────────────────

    #[test]
    fn test_ensure_directories() {
        let tmp = TempDir::new().expect("tempdir");

        // Override HOME so that dirs::home_dir() resolves to our temp dir.
        let original_home = std::env::var_os("HOME");
        std::env::set_var("HOME", tmp.path());

        let result = ensure_directories();

        // Restore HOME.
        match original_home {
            Some(v) => std::env::set_var("HOME", v),
            None => std::env::remove_var("HOME"),
        }

        result.expect("ensure_directories should succeed");

        let chart_dir = tmp.path().join(".importtime-chart");
        assert!(chart_dir.is_dir(), ".importtime-chart dir must exist");
        assert!(chart_dir.join("logs").is_dir(), "logs subdir must exist");
    }

    // ── test_default_log_target ───────────────────────────────────────────────

    #[test]
    fn test_default_log_target_prefers_uploads_dir() {
        let tmp = TempDir::new().expect("tempdir");
        let uploads = tmp.path().join("uploads");
        std::fs::create_dir_all(&uploads).expect("create uploads dir");

        assert_eq!(default_log_target_in(tmp.path()), uploads);
    }

    #[test]
    fn test_default_log_target_falls_back_to_base() {
        let tmp = TempDir::new().expect("tempdir");
        assert_eq!(default_log_target_in(tmp.path()), tmp.path());
    }

    #[test]
    fn test_default_log_target_ignores_uploads_file() {
        let tmp = TempDir::new().expect("tempdir");
        // A plain file named "uploads" is not a search directory.
        std::fs::write(tmp.path().join("uploads"), "not a dir").expect("write");

        assert_eq!(default_log_target_in(tmp.path()), tmp.path());
    }

    // ── test_normalise_level ──────────────────────────────────────────────────

    #[test]
    fn test_normalise_level_python_names() {
        assert_eq!(normalise_level("DEBUG"), "debug");
        assert_eq!(normalise_level("INFO"), "info");
        assert_eq!(normalise_level("WARNING"), "warn");
        assert_eq!(normalise_level("ERROR"), "error");
        assert_eq!(normalise_level("CRITICAL"), "debug");
    }

    #[test]
    fn test_normalise_level_passes_through_tracing_directives() {
        assert_eq!(normalise_level("trace"), "trace");
        assert_eq!(normalise_level("WARN"), "warn");
    }
}
