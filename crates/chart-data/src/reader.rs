//! Import-time log discovery and reading for importtime-chart.
//!
//! Locates log files on disk and supplies their lines to the parsing layer.
//! Only this module touches the filesystem; line parsing and tree building
//! stay free of I/O.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use chart_core::error::{ChartError, Result};
use tracing::{debug, info, warn};

// ── Public API ────────────────────────────────────────────────────────────────

/// Find all `.log` and `.txt` files recursively under `dir`, sorted by path.
pub fn find_log_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        warn!("Log directory does not exist: {}", dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "log" || ext == "txt")
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Resolve `path` to the log file to analyse.
///
/// A file path is used as-is. A directory is searched recursively and the
/// most recently modified log file wins, so pointing the tool at a folder of
/// captured runs picks up the latest one.
pub fn discover_log_path(path: &Path) -> Result<PathBuf> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }
    if !path.exists() {
        return Err(ChartError::LogPathNotFound(path.to_path_buf()));
    }

    let files = find_log_files(path);
    let count = files.len();
    let newest = files
        .into_iter()
        .max_by_key(|f| std::fs::metadata(f).and_then(|m| m.modified()).ok());

    match newest {
        Some(file) => {
            info!(
                "Using log file {} (newest of {} in {})",
                file.display(),
                count,
                path.display()
            );
            Ok(file)
        }
        None => Err(ChartError::NoLogFound(path.to_path_buf())),
    }
}

/// Read the log file into a vector of lines.
///
/// Lines that cannot be decoded as UTF-8 are skipped; any other read failure
/// aborts with an error and no partial result.
pub fn read_log_lines(path: &Path) -> Result<Vec<String>> {
    let file = std::fs::File::open(path).map_err(|source| ChartError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let reader = std::io::BufReader::new(file);
    let mut lines: Vec<String> = Vec::new();
    let mut undecodable = 0usize;

    for line_result in reader.lines() {
        match line_result {
            Ok(line) => lines.push(line),
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                undecodable += 1;
            }
            Err(e) => {
                return Err(ChartError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        }
    }

    debug!(
        "Read {} lines from {} ({} undecodable skipped)",
        lines.len(),
        path.display(),
        undecodable
    );

    Ok(lines)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    // ── find_log_files ────────────────────────────────────────────────────────

    #[test]
    fn test_find_log_files_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(find_log_files(dir.path()).is_empty());
    }

    #[test]
    fn test_find_log_files_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(find_log_files(&missing).is_empty());
    }

    #[test]
    fn test_find_log_files_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "b.log", &["x"]);
        write_file(dir.path(), "a.txt", &["x"]);
        write_file(dir.path(), "ignored.jsonl", &["x"]);
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        write_file(&dir.path().join("sub"), "c.log", &["x"]);

        let files = find_log_files(dir.path());
        let names: Vec<_> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["a.txt", "b.log", "c.log"]);
    }

    // ── discover_log_path ─────────────────────────────────────────────────────

    #[test]
    fn test_discover_log_path_plain_file() {
        let dir = TempDir::new().unwrap();
        let file = write_file(dir.path(), "run.log", &["import time: 1 | 1 |  os"]);

        let resolved = discover_log_path(&file).unwrap();
        assert_eq!(resolved, file);
    }

    #[test]
    fn test_discover_log_path_missing() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.log");
        let err = discover_log_path(&missing).unwrap_err();
        assert!(matches!(err, ChartError::LogPathNotFound(_)));
    }

    #[test]
    fn test_discover_log_path_directory_without_logs() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "notes.md", &["not a log"]);

        let err = discover_log_path(dir.path()).unwrap_err();
        assert!(matches!(err, ChartError::NoLogFound(_)));
    }

    #[test]
    fn test_discover_log_path_picks_newest() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "old.log", &["x"]);
        // Ensure a measurable mtime difference between the two files.
        std::thread::sleep(std::time::Duration::from_millis(20));
        let newer = write_file(dir.path(), "a-newer.log", &["x"]);

        let resolved = discover_log_path(dir.path()).unwrap();
        assert_eq!(resolved, newer);
    }

    // ── read_log_lines ────────────────────────────────────────────────────────

    #[test]
    fn test_read_log_lines_round_trip() {
        let dir = TempDir::new().unwrap();
        let file = write_file(
            dir.path(),
            "run.log",
            &[
                "import time: self [us] | cumulative | imported package",
                "import time:       151 |        151 |   _codecs",
            ],
        );

        let lines = read_log_lines(&file).unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("_codecs"));
    }

    #[test]
    fn test_read_log_lines_empty_file() {
        let dir = TempDir::new().unwrap();
        let file = write_file(dir.path(), "empty.log", &[]);
        let lines = read_log_lines(&file).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_read_log_lines_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_log_lines(&dir.path().join("absent.log")).unwrap_err();
        assert!(matches!(err, ChartError::FileRead { .. }));
        assert!(err.to_string().contains("Failed to read log file"));
    }

    #[test]
    fn test_read_log_lines_skips_undecodable_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mixed.log");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"import time: 1 | 1 |  os\n").unwrap();
        file.write_all(&[0xff, 0xfe, b'\n']).unwrap();
        file.write_all(b"import time: 2 | 3 | encodings\n").unwrap();
        drop(file);

        let lines = read_log_lines(&path).unwrap();
        assert_eq!(lines.len(), 2);
    }
}
