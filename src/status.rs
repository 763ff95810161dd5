// Theme inventory
//
// Read-only view of which themes have a palette and which have already been
// generated. Used by `status` and by the hooks to decide whether a theme
// needs generating before it can be applied.

use crate::registry::ThemeRegistry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeStatus {
    pub name: String,
    pub has_palette: bool,
    pub has_generated_document: bool,
}

impl ThemeStatus {
    pub fn is_complete(&self) -> bool {
        self.has_palette && self.has_generated_document
    }
}

/// One entry per theme directory, sorted by name. Never touches the disk
/// beyond stat calls.
pub fn status(registry: &ThemeRegistry) -> Vec<ThemeStatus> {
    registry
        .entries()
        .into_iter()
        .map(|entry| ThemeStatus {
            has_palette: entry.has_palette(),
            has_generated_document: entry.has_document(),
            name: entry.name,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{DEFAULT_PALETTE_FILE, DOCUMENT_SUFFIX};
    use std::fs;
    use std::path::Path;

    fn snapshot(root: &Path) -> Vec<(String, u64)> {
        let mut files = Vec::new();
        for theme in fs::read_dir(root).unwrap().flatten() {
            for file in fs::read_dir(theme.path()).unwrap().flatten() {
                files.push((
                    file.path().display().to_string(),
                    file.metadata().unwrap().len(),
                ));
            }
        }
        files.sort();
        files
    }

    #[test]
    fn test_status_reports_each_theme() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["gruvbox", "nord", "kanagawa"] {
            fs::create_dir_all(dir.path().join(name)).unwrap();
        }
        fs::write(dir.path().join("gruvbox").join(DEFAULT_PALETTE_FILE), "x").unwrap();
        fs::write(dir.path().join("nord").join(DEFAULT_PALETTE_FILE), "x").unwrap();
        fs::write(
            dir.path().join("nord").join(format!("nord{DOCUMENT_SUFFIX}")),
            "{}",
        )
        .unwrap();

        let registry = ThemeRegistry::new(dir.path(), DEFAULT_PALETTE_FILE);
        let before = snapshot(dir.path());
        let first = status(&registry);
        let second = status(&registry);

        assert_eq!(first, second);
        assert_eq!(before, snapshot(dir.path()));

        let names: Vec<&str> = first.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["gruvbox", "kanagawa", "nord"]);
        assert!(first[0].has_palette && !first[0].has_generated_document);
        assert!(!first[1].has_palette && !first[1].is_complete());
        assert!(first[2].is_complete());
    }

    #[test]
    fn test_status_missing_root() {
        let registry = ThemeRegistry::new("/nonexistent/themes", DEFAULT_PALETTE_FILE);
        assert!(status(&registry).is_empty());
    }
}
