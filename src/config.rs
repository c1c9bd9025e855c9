//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--config`, `--root-label`, `--output-dir`)
//! 2. `$FAVEDIT_CONFIG` environment variable (path to config file)
//! 3. Project-local `.favedit.toml` in the current working directory
//! 4. Global `~/.config/favedit/config.toml`
//! 5. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::favorites::{macos, windows, ExportSettings, DEFAULT_ROOT_LABEL};

// ── Section configs ──────────────────────────────────────────────────────────

/// General editor settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Root label of a new, empty tree.
    pub root_label: Option<String>,
    /// Ask before deleting a node.
    pub confirm_delete: Option<bool>,
    /// Show the model preview pane on start.
    pub show_preview: Option<bool>,
}

/// Export settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory exported documents are written to.
    pub output_dir: Option<String>,
    /// Display name of the Windows configuration policy.
    pub policy_name: Option<String>,
    /// `PayloadIdentifier` of the macOS profile.
    pub profile_identifier: Option<String>,
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LogConfig {
    /// "off", "error", "warn", "info", "debug" or "trace".
    pub level: Option<String>,
    /// Log file used by the editor.
    pub file: Option<String>,
}

/// Color overrides on top of the dark palette.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeColorsConfig {
    pub folder_fg: Option<String>,
    pub link_fg: Option<String>,
    pub url_fg: Option<String>,
    pub selected_bg: Option<String>,
    pub marked_fg: Option<String>,
    pub border_fg: Option<String>,
    pub status_bg: Option<String>,
    pub dialog_bg: Option<String>,
}

/// Theme configuration section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color scheme: "dark", "light", "custom".
    pub scheme: Option<String>,
    pub custom: Option<ThemeColorsConfig>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so partial configs from different sources can be
/// merged together.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub export: ExportConfig,
    pub log: LogConfig,
    pub theme: ThemeConfig,
}

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ── Config file locator ──────────────────────────────────────────────────────

/// Candidate config file paths in priority order, excluding `--config`.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = std::env::var("FAVEDIT_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".favedit.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("favedit").join("config.toml"));
    }

    paths
}

/// Read and parse a TOML config file. `None` if the file doesn't exist or
/// can't be parsed (with a warning printed to stderr; logging is not set up
/// yet at this point).
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            eprintln!(
                "Warning: failed to parse config file {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self`; `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                root_label: other.general.root_label.clone().or(self.general.root_label),
                confirm_delete: other.general.confirm_delete.or(self.general.confirm_delete),
                show_preview: other.general.show_preview.or(self.general.show_preview),
            },
            export: ExportConfig {
                output_dir: other.export.output_dir.clone().or(self.export.output_dir),
                policy_name: other.export.policy_name.clone().or(self.export.policy_name),
                profile_identifier: other
                    .export
                    .profile_identifier
                    .clone()
                    .or(self.export.profile_identifier),
            },
            log: LogConfig {
                level: other.log.level.clone().or(self.log.level),
                file: other.log.file.clone().or(self.log.file),
            },
            theme: ThemeConfig {
                scheme: other.theme.scheme.clone().or(self.theme.scheme),
                custom: other.theme.custom.clone().or(self.theme.custom),
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit file from `--config`; `cli_overrides`
    /// are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        let mut config = AppConfig::default();

        // Lowest priority first so higher sources overwrite.
        for path in candidate_paths().iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(cli_path) = cli_config_path {
            match load_file(cli_path) {
                Some(file_cfg) => config = config.merge(&file_cfg),
                None => eprintln!("Warning: config file {} not loaded", cli_path.display()),
            }
        }

        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    /// Root label for a new tree. Blank values fall back to the default.
    pub fn root_label(&self) -> &str {
        self.general
            .root_label
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .unwrap_or(DEFAULT_ROOT_LABEL)
    }

    pub fn confirm_delete(&self) -> bool {
        self.general.confirm_delete.unwrap_or(true)
    }

    pub fn show_preview(&self) -> bool {
        self.general.show_preview.unwrap_or(true)
    }

    /// Output directory for exports, defaulting to the working directory.
    pub fn output_dir(&self) -> PathBuf {
        self.export
            .output_dir
            .as_deref()
            .map(expand_home)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn export_settings(&self) -> ExportSettings {
        ExportSettings {
            policy_name: self
                .export
                .policy_name
                .clone()
                .unwrap_or_else(|| windows::DEFAULT_POLICY_NAME.to_string()),
            profile_identifier: self
                .export
                .profile_identifier
                .clone()
                .unwrap_or_else(|| macos::DEFAULT_PROFILE_IDENTIFIER.to_string()),
        }
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Editor log file, defaulting to `<cache dir>/favedit/favedit.log`.
    pub fn log_file(&self) -> Option<PathBuf> {
        match self.log.file.as_deref() {
            Some(file) => Some(expand_home(file)),
            None => dirs::cache_dir().map(|dir| dir.join("favedit").join("favedit.log")),
        }
    }

    /// Theme scheme: "dark", "light", or "custom".
    pub fn theme_scheme(&self) -> &str {
        self.theme.scheme.as_deref().unwrap_or("dark")
    }
}

/// Expand a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
