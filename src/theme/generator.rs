// Palette file → theme document file
//
// Generation is a pure function of the palette contents: the same
// alacritty.toml always produces the same bytes, and the output is written
// unconditionally (no "already generated" shortcut).

use super::ThemeDocument;
use crate::error::{SyncError, SyncResult};
use crate::palette::{Palette, PaletteIssue};
use crate::registry::{ThemeEntry, ThemeRegistry};
use std::path::PathBuf;

/// Outcome of generating one theme
#[derive(Debug)]
pub struct GenerateReport {
    pub theme: String,
    pub path: PathBuf,
    pub customization_count: usize,
    pub token_rule_count: usize,
    pub is_light: bool,
    pub issues: Vec<PaletteIssue>,
}

/// Outcome of generating every theme in a registry
#[derive(Debug, Default)]
pub struct BatchReport {
    pub generated: Vec<GenerateReport>,
    pub failed: Vec<(String, SyncError)>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.generated.len() + self.failed.len()
    }

    /// A batch counts as successful when at least one theme was written
    pub fn is_success(&self) -> bool {
        !self.generated.is_empty()
    }
}

/// Generate the theme document for one theme and write it next to its palette.
pub fn generate(entry: &ThemeEntry) -> SyncResult<GenerateReport> {
    let parsed = Palette::load(&entry.name, &entry.palette_path())?;
    for issue in &parsed.issues {
        tracing::debug!("{}: {}", entry.name, issue);
    }

    let document = ThemeDocument::from_palette(&entry.name, &parsed.palette);
    let json = document.to_json_string()?;

    let path = entry.document_path();
    crate::util::write_atomic(&path, json.as_bytes()).map_err(|e| SyncError::io(&path, e))?;

    tracing::info!(
        theme = %entry.name,
        colors = document.colors.len(),
        issues = parsed.issues.len(),
        "Generated {}",
        path.display()
    );

    Ok(GenerateReport {
        theme: entry.name.clone(),
        path,
        customization_count: document.colors.len(),
        token_rule_count: document.token_colors.text_mate_rules.len(),
        is_light: parsed.palette.is_light(),
        issues: parsed.issues,
    })
}

/// Generate every theme that has a palette, in name order.
///
/// A failing theme is logged and recorded; the rest of the batch still runs.
pub fn generate_all(registry: &ThemeRegistry) -> BatchReport {
    let mut report = BatchReport::default();

    for entry in registry.with_palettes() {
        match generate(&entry) {
            Ok(generated) => report.generated.push(generated),
            Err(e) => {
                tracing::warn!("Skipping theme '{}': {}", entry.name, e);
                report.failed.push((entry.name, e));
            }
        }
    }

    tracing::info!(
        "Generated {}/{} themes from {}",
        report.generated.len(),
        report.total(),
        registry.root().display()
    );
    report
}
