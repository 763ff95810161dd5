// Error taxonomy for the sync pipeline
//
// Every operation boundary (generate, apply, hooks) turns these into a
// warning and a skip; only the CLI decides whether a batch failed as a whole.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type SyncResult<T> = std::result::Result<T, SyncError>;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("palette not found for theme '{theme}': {}", path.display())]
    PaletteNotFound { theme: String, path: PathBuf },

    #[error("failed to parse palette for theme '{theme}': {reason}")]
    PaletteParse { theme: String, reason: String },

    #[error("no generated theme document for '{theme}' (expected {}); run `generate {theme}` first", path.display())]
    ThemeDocumentMissing { theme: String, path: PathBuf },

    #[error("theme document for '{theme}' is not valid JSON: {}", path.display())]
    ThemeDocumentInvalid {
        theme: String,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{editor} settings are not a JSON object ({reason}): {}", path.display())]
    EditorSettingsInvalid {
        editor: String,
        path: PathBuf,
        reason: String,
    },

    #[error("failed to write {editor} settings: {}", path.display())]
    EditorSettingsUnwritable {
        editor: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no editor settings files found (checked {checked} location(s))")]
    NoEditorsFound { checked: usize },

    #[error("invalid theme name: {0:?}")]
    InvalidThemeName(String),

    #[error("I/O error at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize JSON")]
    Json(#[from] serde_json::Error),
}

impl SyncError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
