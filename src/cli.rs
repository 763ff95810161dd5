// CLI module - command-line argument parsing and handlers
//
// Subcommands:
// - generate / generate-all: palette → theme document
// - status: which themes have been generated
// - apply: theme document → editor settings
// - hook: entry points for the theme switcher (always exit 0)
// - hooks install / remove: wire the switcher to the hook entry points
// - config --show / --path

use crate::config::{Config, VERSION};
use crate::error::SyncError;
use crate::hooks::{self, HookReport};
use crate::registry::ThemeRegistry;
use crate::sync::{self, EditorOutcome};
use crate::{status, theme};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Sync terminal theme palettes to VS Code and Cursor
#[derive(Parser)]
#[command(name = "ide-theme-sync")]
#[command(version = VERSION)]
#[command(about = "Sync terminal theme palettes to VS Code and Cursor", long_about = None)]
pub struct Cli {
    /// Themes directory (overrides config and THEME_SYNC_THEMES_DIR)
    #[arg(long, global = true, value_name = "PATH")]
    pub themes_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the editor theme for one theme
    Generate {
        /// Theme directory name
        name: String,
    },

    /// Generate editor themes for every theme with a palette
    GenerateAll,

    /// Show which themes have generated editor themes
    Status,

    /// Apply a generated theme to every installed editor
    Apply {
        /// Theme name (defaults to the current theme)
        name: Option<String>,
    },

    /// Theme switcher callbacks
    Hook {
        #[command(subcommand)]
        event: HookEvent,
    },

    /// Install or remove the theme switcher hook scripts
    Hooks {
        #[command(subcommand)]
        action: HooksAction,
    },

    /// Inspect configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[derive(Subcommand)]
pub enum HookEvent {
    /// A theme was installed into a directory
    PostThemeInstall { name: String, dir: PathBuf },
    /// The current theme changed
    PostThemeSwitch { name: String },
}

#[derive(Subcommand)]
pub enum HooksAction {
    /// Write the hook scripts (backs up existing ones)
    Install {
        /// Hooks directory (defaults to config hooks_dir)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Remove the hook scripts (restores backups)
    Remove {
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

/// Run a parsed command against a loaded configuration.
pub fn run(command: Commands, config: &Config) -> ExitCode {
    exit_code(dispatch(command, config))
}

pub fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Returns whether the command succeeded
fn dispatch(command: Commands, config: &Config) -> bool {
    let registry = config.registry();

    match command {
        Commands::Generate { name } => handle_generate(&registry, &name),
        Commands::GenerateAll => handle_generate_all(&registry),
        Commands::Status => handle_status(&registry),
        Commands::Apply { name } => handle_apply(config, &registry, name),
        Commands::Hook { event } => {
            let editors = config.editor_targets();
            let report = match event {
                HookEvent::PostThemeInstall { name, dir } => {
                    hooks::on_theme_installed(&registry, &editors, &name, &dir)
                }
                HookEvent::PostThemeSwitch { name } => {
                    hooks::on_theme_switched(&registry, &editors, &name)
                }
            };
            print_hook_report(&report);
            true
        }
        Commands::Hooks { action } => handle_hooks(config, action),
        Commands::Config { show, path } => {
            if path {
                handle_config_path()
            } else if show {
                handle_config_show(config)
            } else {
                // No flag provided, show help
                println!("Usage: ide-theme-sync config [--show|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --path    Show config file path");
                true
            }
        }
    }
}

fn handle_generate(registry: &ThemeRegistry, name: &str) -> bool {
    let report = match registry.theme(name).and_then(|entry| theme::generate(&entry)) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("❌ {}", e);
            if matches!(e, SyncError::PaletteNotFound { .. }) {
                print_available(registry);
            }
            return false;
        }
    };

    if !report.issues.is_empty() {
        println!("⚠️  Palette issues in {} (fallback colors used):", report.theme);
        for issue in &report.issues {
            println!("   - {}", issue);
        }
    }
    println!("✓ Generated theme: {}", report.path.display());
    println!(
        "✓ {} color customizations, {} token rules",
        report.customization_count, report.token_rule_count
    );
    println!(
        "✓ Theme type: {}",
        if report.is_light { "light" } else { "dark" }
    );
    true
}

fn handle_generate_all(registry: &ThemeRegistry) -> bool {
    let report = theme::generate_all(registry);

    if report.total() == 0 {
        eprintln!("No themes with a palette found in {}", registry.root().display());
        return false;
    }

    for generated in &report.generated {
        println!("✓ {}", generated.theme);
    }
    for (name, e) in &report.failed {
        println!("✗ {}: {}", name, e);
    }
    println!();
    println!(
        "Generated themes for {}/{} themes",
        report.generated.len(),
        report.total()
    );

    report.is_success()
}

fn handle_status(registry: &ThemeRegistry) -> bool {
    let themes = status::status(registry);

    println!("Theme status ({})", registry.root().display());
    println!("{}", "=".repeat(50));
    for theme in &themes {
        if theme.is_complete() {
            println!("✅ {} - Complete", theme.name);
        } else if theme.has_palette {
            println!("❌ {} - Missing", theme.name);
        } else {
            println!("➖ {} - No palette", theme.name);
        }
    }

    let complete = themes.iter().filter(|t| t.is_complete()).count();
    println!();
    println!("{}/{} themes complete", complete, themes.len());
    true
}

fn handle_apply(config: &Config, registry: &ThemeRegistry, name: Option<String>) -> bool {
    let name = match name.or_else(|| resolve_current_theme(config, registry)) {
        Some(name) => name,
        None => {
            eprintln!("❌ No theme specified and no current theme found");
            return false;
        }
    };

    println!("Applying editor theme: {}", name);
    let applied = match sync::apply(registry, &config.editor_targets(), &name) {
        Ok(applied) => applied,
        Err(e) => {
            eprintln!("❌ {}", e);
            return false;
        }
    };

    for result in &applied.editors {
        match &result.outcome {
            EditorOutcome::Updated => println!(
                "✓ Applied {} theme ({})",
                result.editor,
                result.settings_path.display()
            ),
            EditorOutcome::NotInstalled => println!("⚠ {} not found", result.editor),
            EditorOutcome::Failed(e) => println!("✗ {}: {}", result.editor, e),
        }
    }

    applied.is_success()
}

/// Current-theme symlink first, then the most recently generated theme
fn resolve_current_theme(config: &Config, registry: &ThemeRegistry) -> Option<String> {
    if let Some(name) = config.current_theme() {
        tracing::info!("Using current theme '{}'", name);
        return Some(name);
    }
    let latest = registry.latest_generated()?;
    tracing::info!("Using most recently generated theme '{}'", latest.name);
    Some(latest.name)
}

fn handle_hooks(config: &Config, action: HooksAction) -> bool {
    let result = match action {
        HooksAction::Install { dir } => {
            let dir = dir.unwrap_or_else(|| config.hooks_dir.clone());
            let binary = match std::env::current_exe() {
                Ok(binary) => binary,
                Err(e) => {
                    eprintln!("❌ Cannot locate this executable: {}", e);
                    return false;
                }
            };
            hooks::install(&dir, &binary)
        }
        HooksAction::Remove { dir } => {
            hooks::remove(&dir.unwrap_or_else(|| config.hooks_dir.clone()))
        }
    };

    match result {
        Ok(changes) if changes.is_empty() => {
            println!("Nothing to do");
            true
        }
        Ok(changes) => {
            for change in changes {
                println!("✓ {}", change);
            }
            true
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            false
        }
    }
}

pub fn handle_config_path() -> bool {
    match Config::config_path() {
        Some(path) => {
            println!("{}", path.display());
            true
        }
        None => {
            eprintln!("Error: Could not determine config path");
            false
        }
    }
}

fn handle_config_show(config: &Config) -> bool {
    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    // Show source info
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
    true
}

fn print_available(registry: &ThemeRegistry) {
    let available = registry.with_palettes();
    if available.is_empty() {
        return;
    }
    eprintln!("Available themes:");
    for entry in available {
        eprintln!("  - {}", entry.name);
    }
}

fn print_hook_report(report: &HookReport) {
    let Some(theme) = &report.theme else {
        return;
    };
    if report.generated.is_some() {
        println!("Generated editor theme for {}", theme);
    }
    if let Some(applied) = &report.applied {
        for result in applied.updated() {
            println!("Applied {} to {}", applied.theme, result.editor);
        }
    }
}
