mod bootstrap;

use anyhow::Result;
use chart_core::models::SortMode;
use chart_core::settings::Settings;
use chart_data::analysis::{analyze_log, AnalysisResult};
use chart_data::export;
use chart_data::reader;
use chart_ui::app::{App, ViewMode};

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("importtime-chart v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "View: {}, Theme: {}, Sort: {}",
        settings.view,
        settings.theme,
        settings.sort
    );

    // The value parser restricts --sort to known names; fall back anyway.
    let sort = SortMode::from_name(&settings.sort).unwrap_or(SortMode::Input);

    // Read and analyse the log up front; the UI works from the finished result.
    let analysis = match load_analysis(&settings, sort) {
        Ok(analysis) => analysis,
        Err(e) => {
            eprintln!("Error processing file: {e}");
            std::process::exit(1);
        }
    };

    if let Some(target) = settings.export.as_deref() {
        if let Err(e) = export::write_chart_json(&analysis, target) {
            eprintln!("Error processing file: {e}");
            std::process::exit(1);
        }
        return Ok(());
    }

    let view_mode = if settings.view == "table" {
        ViewMode::Table
    } else {
        ViewMode::Chart
    };

    let app = App::new(&settings.theme, view_mode, sort, analysis);
    app.run()?;

    Ok(())
}

/// Resolve the log path and run the analysis pipeline.
///
/// With no `FILE` argument the search falls back to `uploads/` or the working
/// directory; a directory argument is searched for the newest log file.
fn load_analysis(settings: &Settings, sort: SortMode) -> chart_core::error::Result<AnalysisResult> {
    let target = settings
        .file
        .clone()
        .unwrap_or_else(bootstrap::default_log_target);
    let path = reader::discover_log_path(&target)?;
    analyze_log(&path, sort)
}
