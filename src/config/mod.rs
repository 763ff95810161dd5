//! Configuration for theme sync
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/ide-theme-sync/config.toml)
//! 3. Built-in defaults (lowest priority)
//!
//! The command line `--themes-dir` flag is applied on top by main.

use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::registry::{ThemeRegistry, DEFAULT_PALETTE_FILE};
use crate::sync::EditorTarget;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod logging;
mod serialization;

#[cfg(test)]
mod tests;

pub use logging::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Env var overriding the themes directory
pub const THEMES_DIR_ENV: &str = "THEME_SYNC_THEMES_DIR";

/// Editors targeted out of the box: (config key, display name, settings path under ~/.config)
const BUILTIN_EDITORS: [(&str, &str, &str); 2] = [
    ("vscode", "VS Code", "Code/User/settings.json"),
    ("cursor", "Cursor", "Cursor/User/settings.json"),
];

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Root holding one directory per theme
    pub themes_dir: PathBuf,

    /// Symlink the theme switcher points at the active theme
    pub current_theme_link: PathBuf,

    /// Where `hooks install` writes the switcher scripts
    pub hooks_dir: PathBuf,

    /// Palette file name inside each theme directory
    pub palette_file: String,

    /// Editors receiving the theme, in apply order
    pub editors: Vec<EditorConfig>,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// One editor settings target
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Key under `[editors.<key>]`
    pub key: String,
    pub name: String,
    pub settings_path: PathBuf,
    pub enabled: bool,
}

impl Config {
    /// Built-in defaults relative to a home directory
    pub fn with_home(home: &Path) -> Self {
        let omarchy = home.join(".config").join("omarchy");
        Self {
            themes_dir: omarchy.join("themes"),
            current_theme_link: omarchy.join("current").join("theme"),
            hooks_dir: omarchy.join("hooks"),
            palette_file: DEFAULT_PALETTE_FILE.to_string(),
            editors: BUILTIN_EDITORS
                .iter()
                .map(|(key, name, path)| EditorConfig {
                    key: key.to_string(),
                    name: name.to_string(),
                    settings_path: home.join(".config").join(path),
                    enabled: true,
                })
                .collect(),
            logging: LoggingConfig::with_home(home),
        }
    }

    pub fn registry(&self) -> ThemeRegistry {
        ThemeRegistry::new(&self.themes_dir, self.palette_file.clone())
    }

    /// Enabled editors as apply targets
    pub fn editor_targets(&self) -> Vec<EditorTarget> {
        self.editors
            .iter()
            .filter(|editor| editor.enabled)
            .map(|editor| EditorTarget::new(&editor.name, &editor.settings_path))
            .collect()
    }

    /// The theme the switcher currently points at, if the link resolves
    pub fn current_theme(&self) -> Option<String> {
        let target = std::fs::read_link(&self.current_theme_link).ok()?;
        let name = target.file_name()?.to_str()?.to_string();
        tracing::debug!(
            "Current theme link {} -> {}",
            self.current_theme_link.display(),
            target.display()
        );
        Some(name)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub themes_dir: Option<String>,
    pub current_theme_link: Option<String>,
    pub hooks_dir: Option<String>,
    pub palette_file: Option<String>,

    /// Optional [editors.X] sections
    #[serde(default)]
    pub editors: BTreeMap<String, FileEditor>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileEditor {
    pub name: Option<String>,
    pub settings_path: Option<String>,
    pub enabled: Option<bool>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/ide-theme-sync/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("ide-theme-sync").join("config.toml"))
    }

    /// Load file config if it exists.
    ///
    /// A missing file means defaults. A file that exists but cannot be read
    /// or parsed is an error: silently falling back would apply themes to
    /// the wrong places.
    pub(crate) fn load_file_config(path: &Path) -> anyhow::Result<FileConfig> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("failed to parse config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e).with_context(|| format!("cannot read config file {}", path.display())),
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> anyhow::Result<Self> {
        let home = dirs::home_dir().context("cannot determine home directory")?;
        let file = match Self::config_path() {
            Some(path) => Self::load_file_config(&path)?,
            None => FileConfig::default(),
        };
        Ok(Self::resolve(file, &home, |key| std::env::var(key).ok()))
    }

    /// Merge the layers. `env` looks up an environment variable.
    pub(crate) fn resolve(
        file: FileConfig,
        home: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let defaults = Self::with_home(home);
        let path = |value: String| expand_home(&value, home);

        // Themes directory: env > file > default
        let themes_dir = env(THEMES_DIR_ENV)
            .filter(|v| !v.is_empty())
            .or(file.themes_dir)
            .map(path)
            .unwrap_or(defaults.themes_dir);

        // Everything else: file > default
        let current_theme_link = file
            .current_theme_link
            .map(path)
            .unwrap_or(defaults.current_theme_link);
        let hooks_dir = file.hooks_dir.map(path).unwrap_or(defaults.hooks_dir);
        let palette_file = file.palette_file.unwrap_or(defaults.palette_file);

        let editors = merge_editors(defaults.editors, file.editors, home);
        let logging = LoggingConfig::from_file(file.logging, home);

        Self {
            themes_dir,
            current_theme_link,
            hooks_dir,
            palette_file,
            editors,
            logging,
        }
    }
}

/// Built-in editors keep their position; file entries override them by key
/// and unknown keys are appended in key order.
fn merge_editors(
    mut editors: Vec<EditorConfig>,
    overrides: BTreeMap<String, FileEditor>,
    home: &Path,
) -> Vec<EditorConfig> {
    for (key, file) in overrides {
        match editors.iter_mut().find(|editor| editor.key == key) {
            Some(editor) => {
                if let Some(name) = file.name {
                    editor.name = name;
                }
                if let Some(settings_path) = file.settings_path {
                    editor.settings_path = expand_home(&settings_path, home);
                }
                if let Some(enabled) = file.enabled {
                    editor.enabled = enabled;
                }
            }
            None => {
                let Some(settings_path) = file.settings_path else {
                    tracing::warn!("Ignoring [editors.{}]: no settings_path", key);
                    continue;
                };
                editors.push(EditorConfig {
                    name: file.name.unwrap_or_else(|| key.clone()),
                    key,
                    settings_path: expand_home(&settings_path, home),
                    enabled: file.enabled.unwrap_or(true),
                });
            }
        }
    }
    editors
}

/// Expand a leading `~` against `home`
pub(crate) fn expand_home(value: &str, home: &Path) -> PathBuf {
    match value.strip_prefix('~') {
        Some("") => home.to_path_buf(),
        Some(rest) if rest.starts_with('/') => home.join(&rest[1..]),
        _ => PathBuf::from(value),
    }
}
