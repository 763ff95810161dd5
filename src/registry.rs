// Theme registry
//
// The theme switcher keeps one directory per theme under a common root:
//
//   ~/.config/omarchy/themes/
//     tokyo-night/
//       alacritty.toml                    <- palette (input)
//       tokyo-night-theme-sync.json       <- generated document (output)
//
// Everything here is path arithmetic plus a directory listing; nothing is
// cached, so every call reflects what is on disk right now.

use crate::error::{SyncError, SyncResult};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Palette file name inside each theme directory
pub const DEFAULT_PALETTE_FILE: &str = "alacritty.toml";

/// Suffix of the generated document: `<name>-theme-sync.json`
pub const DOCUMENT_SUFFIX: &str = "-theme-sync.json";

/// Root directory holding one subdirectory per theme
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    root: PathBuf,
    palette_file: String,
}

/// A single theme, identified by name and backed by a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeEntry {
    pub name: String,
    pub dir: PathBuf,
    palette_file: String,
}

impl ThemeRegistry {
    pub fn new(root: impl Into<PathBuf>, palette_file: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            palette_file: palette_file.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Look up a theme by name. The directory need not exist yet.
    pub fn theme(&self, name: &str) -> SyncResult<ThemeEntry> {
        let name = validate_theme_name(name)?;
        Ok(ThemeEntry::at(
            name,
            self.root.join(name),
            self.palette_file.clone(),
        ))
    }

    /// A theme living at an explicit directory, possibly outside the root
    pub fn theme_at(&self, name: &str, dir: impl Into<PathBuf>) -> SyncResult<ThemeEntry> {
        let name = validate_theme_name(name)?;
        Ok(ThemeEntry::at(name, dir, self.palette_file.clone()))
    }

    /// Every theme directory under the root, sorted by name.
    /// A missing or unreadable root yields an empty list.
    pub fn entries(&self) -> Vec<ThemeEntry> {
        let Ok(read_dir) = std::fs::read_dir(&self.root) else {
            tracing::debug!("Themes directory not readable: {}", self.root.display());
            return Vec::new();
        };

        let mut entries: Vec<ThemeEntry> = read_dir
            .flatten()
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                if name.starts_with('.') {
                    return None;
                }
                Some(ThemeEntry::at(&name, entry.path(), self.palette_file.clone()))
            })
            .collect();

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }

    /// Themes that have a palette file, i.e. can be generated
    pub fn with_palettes(&self) -> Vec<ThemeEntry> {
        self.entries()
            .into_iter()
            .filter(ThemeEntry::has_palette)
            .collect()
    }

    /// The theme whose generated document was written most recently
    pub fn latest_generated(&self) -> Option<ThemeEntry> {
        self.entries()
            .into_iter()
            .filter_map(|entry| {
                let modified = entry.document_modified()?;
                Some((modified, entry))
            })
            .max_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, entry)| entry)
    }
}

impl ThemeEntry {
    pub fn at(name: &str, dir: impl Into<PathBuf>, palette_file: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            dir: dir.into(),
            palette_file: palette_file.into(),
        }
    }

    pub fn palette_path(&self) -> PathBuf {
        self.dir.join(&self.palette_file)
    }

    pub fn document_path(&self) -> PathBuf {
        self.dir.join(format!("{}{}", self.name, DOCUMENT_SUFFIX))
    }

    pub fn has_palette(&self) -> bool {
        self.palette_path().is_file()
    }

    pub fn has_document(&self) -> bool {
        self.document_path().is_file()
    }

    fn document_modified(&self) -> Option<SystemTime> {
        std::fs::metadata(self.document_path())
            .and_then(|meta| meta.modified())
            .ok()
    }
}

/// Reject names that cannot be a single directory component.
pub fn validate_theme_name(name: &str) -> SyncResult<&str> {
    let trimmed = name.trim();
    let bad = trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains(['/', '\\', '\0']);

    if bad {
        return Err(SyncError::InvalidThemeName(name.to_string()));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn registry_with(themes: &[(&str, bool, bool)]) -> (tempfile::TempDir, ThemeRegistry) {
        let dir = tempfile::tempdir().unwrap();
        for (name, palette, document) in themes {
            let theme_dir = dir.path().join(name);
            fs::create_dir_all(&theme_dir).unwrap();
            if *palette {
                fs::write(theme_dir.join(DEFAULT_PALETTE_FILE), "background = \"#000000\"\n")
                    .unwrap();
            }
            if *document {
                fs::write(theme_dir.join(format!("{name}{DOCUMENT_SUFFIX}")), "{}").unwrap();
            }
        }
        let registry = ThemeRegistry::new(dir.path(), DEFAULT_PALETTE_FILE);
        (dir, registry)
    }

    #[test]
    fn test_paths_are_deterministic() {
        let registry = ThemeRegistry::new("/themes", DEFAULT_PALETTE_FILE);
        let entry = registry.theme("tokyo-night").unwrap();
        assert_eq!(entry.palette_path(), PathBuf::from("/themes/tokyo-night/alacritty.toml"));
        assert_eq!(
            entry.document_path(),
            PathBuf::from("/themes/tokyo-night/tokyo-night-theme-sync.json")
        );
    }

    #[test]
    fn test_entries_sorted_and_hidden_skipped() {
        let (dir, registry) = registry_with(&[("nord", true, false), ("catppuccin", false, false)]);
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join("README.md"), "not a theme").unwrap();

        let names: Vec<String> = registry.entries().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["catppuccin", "nord"]);

        let with_palettes: Vec<String> =
            registry.with_palettes().into_iter().map(|e| e.name).collect();
        assert_eq!(with_palettes, vec!["nord"]);
    }

    #[test]
    fn test_missing_root_is_empty() {
        let registry = ThemeRegistry::new("/nonexistent/theme/root", DEFAULT_PALETTE_FILE);
        assert!(registry.entries().is_empty());
        assert!(registry.latest_generated().is_none());
    }

    #[test]
    fn test_latest_generated_picks_a_theme_with_document() {
        let (_dir, registry) = registry_with(&[("nord", true, false), ("rose-pine", true, true)]);
        assert_eq!(registry.latest_generated().unwrap().name, "rose-pine");
    }

    #[test]
    fn test_invalid_names_rejected() {
        for name in ["", "  ", ".", "..", "../etc", "a/b", "a\\b"] {
            assert!(
                matches!(validate_theme_name(name), Err(SyncError::InvalidThemeName(_))),
                "{name:?} should be rejected"
            );
        }
        assert_eq!(validate_theme_name(" nord ").unwrap(), "nord");
    }
}
