mod bootstrap;

use std::io::Write;

use anyhow::{Context, Result};
use funding_core::settings::Settings;
use funding_data::loader::load_funding_table;
use funding_data::report::ReportOptions;
use funding_data::view::{View, ViewSelector};
use funding_ui::app::App;

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    let home = bootstrap::ensure_directories()?;

    // The TUI owns the terminal, so it always logs to a file.
    let tui = !settings.is_json_output() && !settings.list_investors;
    let log_file = match (&settings.log_file, tui) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => Some(bootstrap::default_log_path_in(&home)),
        (None, false) => None,
    };
    bootstrap::setup_logging(&settings.log_level, log_file.as_deref())?;
    for warning in &settings.startup_warnings {
        tracing::warn!("{warning}");
    }

    tracing::info!("Funding Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "View: {}, MoM: {}, Theme: {}, Output: {}",
        settings.view,
        settings.mom_mode,
        settings.theme,
        settings.output
    );

    let data_path =
        bootstrap::discover_data_path_in(&settings.data, &home).unwrap_or_else(|| settings.data.clone());
    let table = load_funding_table(&data_path)
        .with_context(|| format!("Could not load dataset {}", data_path.display()))?;

    let selector = ViewSelector::new(&table);

    if settings.list_investors {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for name in selector.investors() {
            writeln!(out, "{name}")?;
        }
        return Ok(());
    }

    let view = View::from_parts(&settings.view, settings.investor.as_deref())?;
    let options = ReportOptions {
        mom_mode: settings.mom_mode(),
        top_n: usize::from(settings.top_n),
        recent_n: usize::from(settings.recent_n),
    };

    if settings.is_json_output() {
        let report = selector.build(&view, &table, &options)?;
        println!("{}", report.to_json_pretty()?);
        return Ok(());
    }

    let dataset = data_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| data_path.display().to_string());

    tracing::info!("Starting dashboard on {} rows", table.len());
    App::new(&settings.theme, dataset, table, selector, options, view).run()?;
    tracing::info!("Dashboard closed");

    Ok(())
}
