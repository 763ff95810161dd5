// Editor theme documents
//
// A ThemeDocument is the editor-ready rendition of one palette. Its three
// top-level keys are exactly the keys the applier swaps into an editor's
// settings.json, so applying is a key-for-key copy:
//
//   {
//     "workbench.colorTheme": "<name>",
//     "workbench.colorCustomizations": { ...ui colors... },
//     "editor.tokenColorCustomizations": { "textMateRules": [ ... ] }
//   }
//
// Layers:
// - ui: palette → workbench color keys (chrome, diagnostics, terminal)
// - tokens: palette → TextMate syntax rules
// - generator: palette file on disk → document file on disk

mod generator;
mod tokens;
mod ui;

pub use generator::{generate, generate_all, GenerateReport};
pub use tokens::TokenRule;

use crate::error::{SyncError, SyncResult};
use crate::palette::{Palette, Rgb};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Settings key naming the active theme
pub const THEME_POINTER_KEY: &str = "workbench.colorTheme";
/// Settings key holding UI color overrides
pub const COLOR_CUSTOMIZATIONS_KEY: &str = "workbench.colorCustomizations";
/// Settings key holding syntax token overrides
pub const TOKEN_CUSTOMIZATIONS_KEY: &str = "editor.tokenColorCustomizations";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeDocument {
    #[serde(rename = "workbench.colorTheme")]
    pub color_theme: String,

    #[serde(rename = "workbench.colorCustomizations")]
    pub colors: Map<String, Value>,

    #[serde(rename = "editor.tokenColorCustomizations")]
    pub token_colors: TokenColorCustomizations,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenColorCustomizations {
    #[serde(rename = "textMateRules")]
    pub text_mate_rules: Vec<TokenRule>,
}

impl ThemeDocument {
    pub fn from_palette(name: &str, palette: &Palette) -> Self {
        Self {
            color_theme: name.to_string(),
            colors: ui::ui_colors(palette),
            token_colors: TokenColorCustomizations {
                text_mate_rules: tokens::token_rules(palette),
            },
        }
    }

    /// Read a generated document back from disk
    pub fn load(theme: &str, path: &Path) -> SyncResult<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SyncError::ThemeDocumentMissing {
                    theme: theme.to_string(),
                    path: path.to_path_buf(),
                })
            }
            Err(e) => return Err(SyncError::io(path, e)),
        };

        serde_json::from_str(&contents).map_err(|source| SyncError::ThemeDocumentInvalid {
            theme: theme.to_string(),
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn ui_color(&self, key: &str) -> Option<Rgb> {
        self.colors.get(key)?.as_str().and_then(Rgb::parse)
    }

    /// Foreground of the first rule that lists `scope`
    pub fn token_color(&self, scope: &str) -> Option<Rgb> {
        self.token_colors
            .text_mate_rules
            .iter()
            .find(|rule| rule.scope.iter().any(|s| s == scope))
            .map(|rule| rule.settings.foreground)
    }

    /// The managed settings entries, in document order
    pub fn settings_entries(&self) -> SyncResult<Vec<(&'static str, Value)>> {
        Ok(vec![
            (THEME_POINTER_KEY, Value::String(self.color_theme.clone())),
            (COLOR_CUSTOMIZATIONS_KEY, Value::Object(self.colors.clone())),
            (
                TOKEN_CUSTOMIZATIONS_KEY,
                serde_json::to_value(&self.token_colors)?,
            ),
        ])
    }

    pub fn to_json_string(&self) -> SyncResult<String> {
        Ok(crate::util::to_pretty_json(self)?)
    }
}
