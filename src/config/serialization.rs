//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Serialize the editor list to `[editors.X]` sections
    pub(super) fn editors_to_toml(&self) -> String {
        let mut output = String::new();
        for editor in &self.editors {
            output.push_str(&format!("[editors.{}]\n", editor.key));
            output.push_str(&format!("name = {}\n", quote(&editor.name)));
            output.push_str(&format!(
                "settings_path = {}\n",
                quote(&editor.settings_path.display().to_string())
            ));
            output.push_str(&format!("enabled = {}\n\n", editor.enabled));
        }
        output
    }

    /// Render the full configuration as a commented config file
    pub fn to_toml(&self) -> String {
        format!(
            r#"# ide-theme-sync configuration

# Root directory with one subdirectory per theme
# ({env} overrides this)
themes_dir = {themes_dir}

# Symlink pointing at the active theme (used by `apply` without a name)
current_theme_link = {current_link}

# Where `hooks install` writes the theme switcher scripts
hooks_dir = {hooks_dir}

# Terminal palette file inside each theme directory
palette_file = {palette_file}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level}
# JSON file logging (in addition to stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix}

# Editors receiving the theme. Add a section to target another
# VS Code based editor (e.g. [editors.vscodium]).
{editors}"#,
            env = super::THEMES_DIR_ENV,
            themes_dir = quote(&self.themes_dir.display().to_string()),
            current_link = quote(&self.current_theme_link.display().to_string()),
            hooks_dir = quote(&self.hooks_dir.display().to_string()),
            palette_file = quote(&self.palette_file),
            log_level = quote(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = quote(&self.logging.file_dir.display().to_string()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = quote(&self.logging.file_prefix),
            editors = self.editors_to_toml(),
        )
    }
}

/// TOML basic string with escaping (paths may contain backslashes or quotes)
fn quote(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}
