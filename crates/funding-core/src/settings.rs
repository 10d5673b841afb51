use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use crate::models::MomMode;

/// Name of the per-user directory under `$HOME`.
pub const APP_DIR_NAME: &str = ".funding-dashboard";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Analytical dashboard over a startup funding dataset
#[derive(Parser, Debug, Clone)]
#[command(
    name = "funding-dashboard",
    about = "Analytical dashboard over a startup funding dataset",
    version
)]
pub struct Settings {
    /// Path to the funding CSV
    #[arg(long, default_value = "startup_cleaned.csv", env = "FUNDING_DATA")]
    pub data: PathBuf,

    /// Analysis to show
    #[arg(long, default_value = "overall", value_parser = ["overall", "investor"])]
    pub view: String,

    /// Investor to drill into (investor view)
    #[arg(long)]
    pub investor: Option<String>,

    /// Month-over-month chart value
    #[arg(long, default_value = "total", value_parser = ["total", "count"])]
    pub mom_mode: String,

    /// Number of startups in the biggest-investments chart (1-50)
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u16).range(1..=50))]
    pub top_n: u16,

    /// Number of rows in the recent-investments table (1-50)
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u16).range(1..=50))]
    pub recent_n: u16,

    /// Output mode
    #[arg(long, default_value = "tui", value_parser = ["tui", "json"])]
    pub output: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "purple", "auto"])]
    pub theme: String,

    /// Print the selectable investor names and exit
    #[arg(long)]
    pub list_investors: bool,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,

    /// Problems met while merging saved settings. Logged by the caller once
    /// logging is up.
    #[arg(skip)]
    pub startup_warnings: Vec<String>,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.funding-dashboard/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mom_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(APP_DIR_NAME).join("last_used.json")
    }

    /// Read persisted params. An absent or unreadable file gives `Default`;
    /// a file that is not valid JSON is an error.
    pub fn load_from(path: &Path) -> serde_json::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Atomically write params to an explicit path, creating parent
    /// directories if needed.
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec_pretty(self).map_err(io::Error::other)?;
        let staged = path.with_extension("json.tmp");
        std::fs::write(&staged, json)?;
        std::fs::rename(&staged, path)
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &Path) -> io::Result<()> {
        match std::fs::remove_file(path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Full implementation; accepts args and an explicit config path so that
    /// tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(
        args: Vec<OsString>,
        config_path: &Path,
    ) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                settings
                    .startup_warnings
                    .push(format!("Could not clear {}: {}", config_path.display(), e));
            }
            return Self::apply_debug(settings);
        }

        let last = LastUsedParams::load_from(config_path).unwrap_or_else(|e| {
            settings.startup_warnings.push(format!(
                "Ignoring unreadable settings file {}: {}",
                config_path.display(),
                e
            ));
            LastUsedParams::default()
        });

        // CLI always wins. clap keys args by field name, not flag spelling.
        // FUNDING_DATA also beats the saved path.
        let data_from_env =
            matches.value_source("data") == Some(clap::parser::ValueSource::EnvVariable);
        if !is_arg_explicitly_set(&matches, "data") && !data_from_env {
            if let Some(v) = last.data {
                settings.data = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "view") {
            if let Some(v) = last.view {
                settings.view = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "investor") && settings.investor.is_none() {
            settings.investor = last.investor;
        }
        if !is_arg_explicitly_set(&matches, "mom_mode") {
            if let Some(v) = last.mom_mode {
                settings.mom_mode = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme {
                settings.theme = v;
            }
        }

        // An explicit --investor implies the investor view.
        if is_arg_explicitly_set(&matches, "investor") && !is_arg_explicitly_set(&matches, "view")
        {
            settings.view = "investor".to_string();
        }

        settings = Self::apply_debug(settings);

        let params = LastUsedParams::from(&settings);
        if let Err(e) = params.save_to(config_path) {
            settings.startup_warnings.push(format!(
                "Could not persist settings to {}: {}",
                config_path.display(),
                e
            ));
        }

        settings
    }

    /// `--debug` overrides the log level.
    fn apply_debug(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Typed month-over-month mode; unknown names fall back to `Total`.
    pub fn mom_mode(&self) -> MomMode {
        MomMode::from_name(&self.mom_mode).unwrap_or_default()
    }

    /// `true` when a JSON report should be printed instead of the TUI.
    pub fn is_json_output(&self) -> bool {
        self.output == "json"
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            data: Some(s.data.clone()),
            view: Some(s.view.clone()),
            investor: s.investor.clone(),
            mom_mode: Some(s.mom_mode.clone()),
            theme: Some(s.theme.clone()),
        }
    }
}

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
