use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use funding_core::settings::APP_DIR_NAME;
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, EnvFilter};

/// File name of the TUI-mode log under `~/.funding-dashboard/logs/`.
pub const LOG_FILE_NAME: &str = "funding-dashboard.log";

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// The user's home directory, or `.` when it cannot be determined.
pub fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Ensure `~/.funding-dashboard/` and its `logs/` subdirectory exist.
///
/// Returns the home directory the hierarchy was created under.
pub fn ensure_directories() -> anyhow::Result<PathBuf> {
    let home = home_dir();
    ensure_directories_in(&home)?;
    Ok(home)
}

/// Create `<home>/.funding-dashboard/logs/`, including missing parents.
pub fn ensure_directories_in(home: &Path) -> anyhow::Result<()> {
    let app_dir = home.join(APP_DIR_NAME);
    std::fs::create_dir_all(app_dir.join("logs"))?;
    Ok(())
}

/// Default TUI log file under `home`.
pub fn default_log_path_in(home: &Path) -> PathBuf {
    home.join(APP_DIR_NAME).join("logs").join(LOG_FILE_NAME)
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a Python-style level name to a tracing filter directive.
///
/// Unknown names are passed through lowercased so that full `EnvFilter`
/// directives still work.
pub fn level_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_lowercase(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// With `log_file` set, output is appended to that file without ANSI colours
/// (the TUI owns the terminal). Otherwise it goes to stderr. Falls back to
/// `"info"` if the level string is not a valid filter.
pub fn setup_logging(log_level: &str, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(level_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    let (writer, ansi) = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    let layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_ansi(ansi)
        .with_writer(writer);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()?;

    Ok(())
}

// ── Data-path discovery ────────────────────────────────────────────────────────

/// Locate the dataset named by `requested`.
///
/// Checks the following paths in order and returns the first that exists:
/// 1. `requested` itself
/// 2. for a relative path, `<home>/.funding-dashboard/<requested>`
///
/// Returns `None` when neither exists.
pub fn discover_data_path_in(requested: &Path, home: &Path) -> Option<PathBuf> {
    let mut candidates = vec![requested.to_path_buf()];
    if requested.is_relative() {
        candidates.push(home.join(APP_DIR_NAME).join(requested));
    }
    candidates.into_iter().find(|p| p.is_file())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
