use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by importtime-chart.
#[derive(Error, Debug)]
pub enum ChartError {
    /// The log file could not be opened or read from disk.
    #[error("Failed to read log file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The given log path does not exist.
    #[error("Log path not found: {0}")]
    LogPathNotFound(PathBuf),

    /// No import-time log files were found under the given directory.
    #[error("No import-time log found in {0}")]
    NoLogFound(PathBuf),

    /// The chart document could not be written to its destination.
    #[error("Failed to write chart JSON to {path}: {source}")]
    ExportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed or serialized.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the chart crates.
pub type Result<T> = std::result::Result<T, ChartError>;
