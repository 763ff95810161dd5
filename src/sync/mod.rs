// Theme applier
//
// Copies a generated ThemeDocument into every installed editor's
// settings.json. An editor counts as installed when its settings file
// exists; we never create one. Each editor is handled independently, so a
// broken settings file in one editor does not stop the others.

mod settings;

use settings::{merge_entries, parse_settings};

use crate::error::{SyncError, SyncResult};
use crate::registry::{ThemeEntry, ThemeRegistry};
use crate::theme::ThemeDocument;
use std::path::{Path, PathBuf};

/// An editor whose settings file receives the theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorTarget {
    pub name: String,
    pub settings_path: PathBuf,
}

impl EditorTarget {
    pub fn new(name: impl Into<String>, settings_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            settings_path: settings_path.into(),
        }
    }

    pub fn is_installed(&self) -> bool {
        self.settings_path.is_file()
    }
}

/// What happened to one editor during apply
#[derive(Debug)]
pub enum EditorOutcome {
    Updated,
    NotInstalled,
    Failed(SyncError),
}

#[derive(Debug)]
pub struct EditorResult {
    pub editor: String,
    pub settings_path: PathBuf,
    pub outcome: EditorOutcome,
}

#[derive(Debug)]
pub struct AppliedResult {
    pub theme: String,
    pub editors: Vec<EditorResult>,
}

impl AppliedResult {
    pub fn updated(&self) -> impl Iterator<Item = &EditorResult> {
        self.editors
            .iter()
            .filter(|r| matches!(r.outcome, EditorOutcome::Updated))
    }

    /// At least one editor received the theme
    pub fn is_success(&self) -> bool {
        self.updated().next().is_some()
    }
}

/// Apply the generated document of `name` to every installed editor.
///
/// Fails before touching any settings file when the document is missing or
/// invalid, or when no editor is installed at all.
pub fn apply(
    registry: &ThemeRegistry,
    editors: &[EditorTarget],
    name: &str,
) -> SyncResult<AppliedResult> {
    apply_entry(&registry.theme(name)?, editors)
}

/// Same as [`apply`], for a theme whose directory is already known.
pub fn apply_entry(entry: &ThemeEntry, editors: &[EditorTarget]) -> SyncResult<AppliedResult> {
    let document = ThemeDocument::load(&entry.name, &entry.document_path())?;
    let entries = document.settings_entries()?;

    if !editors.iter().any(EditorTarget::is_installed) {
        return Err(SyncError::NoEditorsFound {
            checked: editors.len(),
        });
    }

    let mut results = Vec::with_capacity(editors.len());
    for editor in editors {
        let outcome = if !editor.is_installed() {
            tracing::debug!(
                "{} not installed (no {})",
                editor.name,
                editor.settings_path.display()
            );
            EditorOutcome::NotInstalled
        } else {
            match apply_to_editor(editor, &entries) {
                Ok(()) => {
                    tracing::info!("Applied '{}' to {}", entry.name, editor.name);
                    EditorOutcome::Updated
                }
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", editor.name, e);
                    EditorOutcome::Failed(e)
                }
            }
        };

        results.push(EditorResult {
            editor: editor.name.clone(),
            settings_path: editor.settings_path.clone(),
            outcome,
        });
    }

    Ok(AppliedResult {
        theme: entry.name.clone(),
        editors: results,
    })
}

fn apply_to_editor(editor: &EditorTarget, entries: &[(&str, serde_json::Value)]) -> SyncResult<()> {
    let path: &Path = &editor.settings_path;
    let text = std::fs::read_to_string(path).map_err(|e| SyncError::io(path, e))?;

    let mut settings = parse_settings(&editor.name, path, &text)?;
    merge_entries(&mut settings, entries);

    let json = crate::util::to_pretty_json(&settings)?;
    crate::util::write_atomic(path, json.as_bytes()).map_err(|source| {
        SyncError::EditorSettingsUnwritable {
            editor: editor.name.clone(),
            path: path.to_path_buf(),
            source,
        }
    })
}
