// Theme switcher integration
//
// Two halves:
// - Entry points the switcher calls after installing or switching a theme.
//   They run without a terminal, so they never fail: every problem becomes a
//   warning in the log and an entry in the HookReport.
// - Installer for the small shell scripts that wire the switcher to those
//   entry points. Scripts we write carry MANAGED_MARKER; anything without it
//   belongs to the user and is backed up once, never deleted.

use crate::error::{SyncError, SyncResult};
use crate::registry::{validate_theme_name, ThemeEntry, ThemeRegistry};
use crate::sync::{self, AppliedResult, EditorTarget};
use crate::theme::{self, GenerateReport};
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// First-line-after-shebang marker identifying scripts we own
pub const MANAGED_MARKER: &str = "# managed-by: ide-theme-sync";

/// Markup the switcher menus wrap around names, e.g. `<span>Nord</span>`
static MARKUP: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"<[^>]+>") {
    Ok(regex) => regex,
    Err(err) => panic!("invalid markup pattern: {err}"),
});

/// Normalize a theme name as handed over by the switcher.
///
/// Strips markup, lowercases, and turns spaces into dashes:
/// `"<b>Tokyo Night</b>"` → `"tokyo-night"`.
pub fn sanitize_theme_name(raw: &str) -> SyncResult<String> {
    let stripped = MARKUP.replace_all(raw, "");
    let name = stripped.trim().to_lowercase().replace(' ', "-");
    validate_theme_name(&name)?;
    Ok(name)
}

// ─────────────────────────────────────────────────────────────────────────────
// Event entry points
// ─────────────────────────────────────────────────────────────────────────────

/// Everything a hook invocation did, including what went wrong
#[derive(Debug, Default)]
pub struct HookReport {
    pub theme: Option<String>,
    pub generated: Option<GenerateReport>,
    pub applied: Option<AppliedResult>,
    pub errors: Vec<SyncError>,
}

impl HookReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    fn fail(mut self, error: SyncError) -> Self {
        tracing::warn!("Theme hook: {}", error);
        self.errors.push(error);
        self
    }
}

/// Called after the switcher installs a new theme into `theme_dir`.
pub fn on_theme_installed(
    registry: &ThemeRegistry,
    editors: &[EditorTarget],
    raw_name: &str,
    theme_dir: &Path,
) -> HookReport {
    tracing::info!("Theme installed: {} ({})", raw_name, theme_dir.display());
    let report = HookReport::default();

    let entry = match sanitize_theme_name(raw_name)
        .and_then(|name| registry.theme_at(&name, theme_dir))
    {
        Ok(entry) => entry,
        Err(e) => return report.fail(e),
    };
    generate_then_apply(entry, editors, report)
}

/// Called after the switcher makes `raw_name` the current theme.
pub fn on_theme_switched(
    registry: &ThemeRegistry,
    editors: &[EditorTarget],
    raw_name: &str,
) -> HookReport {
    tracing::info!("Theme switched: {}", raw_name);
    let report = HookReport::default();

    let entry = match sanitize_theme_name(raw_name).and_then(|name| registry.theme(&name)) {
        Ok(entry) => entry,
        Err(e) => return report.fail(e),
    };
    generate_then_apply(entry, editors, report)
}

fn generate_then_apply(
    entry: ThemeEntry,
    editors: &[EditorTarget],
    mut report: HookReport,
) -> HookReport {
    report.theme = Some(entry.name.clone());

    if !entry.has_document() {
        match theme::generate(&entry) {
            Ok(generated) => report.generated = Some(generated),
            Err(e) => return report.fail(e),
        }
    }

    match sync::apply_entry(&entry, editors) {
        Ok(applied) => {
            for result in &applied.editors {
                if let sync::EditorOutcome::Failed(e) = &result.outcome {
                    tracing::warn!("Theme hook: {}: {}", result.editor, e);
                }
            }
            report.applied = Some(applied);
            report
        }
        Err(e) => report.fail(e),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Script installer
// ─────────────────────────────────────────────────────────────────────────────

/// Hook script names inside the switcher's hooks directory
pub const THEME_SET_SCRIPT: &str = "theme-set";
pub const THEME_INSTALL_SCRIPT: &str = "theme-install";

/// A single filesystem change made by install/remove
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptChange {
    Installed(PathBuf),
    BackedUp { from: PathBuf, to: PathBuf },
    Removed(PathBuf),
    Restored(PathBuf),
    LeftForeign(PathBuf),
}

impl fmt::Display for ScriptChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Installed(path) => write!(f, "installed {}", path.display()),
            Self::BackedUp { from, to } => {
                write!(f, "backed up {} to {}", from.display(), to.display())
            }
            Self::Removed(path) => write!(f, "removed {}", path.display()),
            Self::Restored(path) => write!(f, "restored {}", path.display()),
            Self::LeftForeign(path) => {
                write!(f, "left {} alone (not managed by ide-theme-sync)", path.display())
            }
        }
    }
}

fn script_body(script: &str, binary: &Path) -> String {
    let call = match script {
        THEME_INSTALL_SCRIPT => "hook post-theme-install \"$1\" \"$2\"",
        _ => "hook post-theme-switch \"$1\"",
    };
    format!(
        "#!/bin/bash\n{MANAGED_MARKER}\n\n\"{}\" {call} || true\n",
        binary.display()
    )
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".backup");
    PathBuf::from(name)
}

fn is_managed(path: &Path) -> bool {
    std::fs::read_to_string(path)
        .map(|contents| contents.lines().any(|line| line == MANAGED_MARKER))
        .unwrap_or(false)
}

/// Write both hook scripts into `hooks_dir`, pointing at `binary`.
///
/// A pre-existing script of ours is overwritten; a foreign one is moved to
/// `<name>.backup` first. When that backup is already taken, the foreign
/// script is left in place and ours is not installed.
pub fn install(hooks_dir: &Path, binary: &Path) -> SyncResult<Vec<ScriptChange>> {
    std::fs::create_dir_all(hooks_dir).map_err(|e| SyncError::io(hooks_dir, e))?;
    let mut changes = Vec::new();

    for script in [THEME_SET_SCRIPT, THEME_INSTALL_SCRIPT] {
        let path = hooks_dir.join(script);

        if path.exists() && !is_managed(&path) {
            let backup = backup_path(&path);
            if backup.exists() {
                tracing::warn!(
                    "{} already exists, not replacing {}",
                    backup.display(),
                    path.display()
                );
                changes.push(ScriptChange::LeftForeign(path));
                continue;
            }
            std::fs::rename(&path, &backup).map_err(|e| SyncError::io(&path, e))?;
            changes.push(ScriptChange::BackedUp {
                from: path.clone(),
                to: backup,
            });
        }

        crate::util::write_atomic(&path, script_body(script, binary).as_bytes())
            .map_err(|e| SyncError::io(&path, e))?;
        make_executable(&path)?;
        changes.push(ScriptChange::Installed(path));
    }

    Ok(changes)
}

/// Remove our scripts from `hooks_dir` and put backed-up ones back.
pub fn remove(hooks_dir: &Path) -> SyncResult<Vec<ScriptChange>> {
    let mut changes = Vec::new();

    for script in [THEME_SET_SCRIPT, THEME_INSTALL_SCRIPT] {
        let path = hooks_dir.join(script);
        let backup = backup_path(&path);

        if path.exists() {
            if !is_managed(&path) {
                changes.push(ScriptChange::LeftForeign(path));
                continue;
            }
            std::fs::remove_file(&path).map_err(|e| SyncError::io(&path, e))?;
            changes.push(ScriptChange::Removed(path.clone()));
        }

        if backup.exists() {
            std::fs::rename(&backup, &path).map_err(|e| SyncError::io(&backup, e))?;
            changes.push(ScriptChange::Restored(path));
        }
    }

    Ok(changes)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> SyncResult<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .map_err(|e| SyncError::io(path, e))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> SyncResult<()> {
    Ok(())
}
