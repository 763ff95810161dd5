// IDE Theme Sync - terminal theme palettes → VS Code / Cursor themes
//
// The theme switcher keeps one directory per theme with an alacritty.toml
// palette. This tool turns each palette into an editor theme document and
// writes it into the editors' settings.json when the theme changes.
//
// Architecture:
// - Palette: parse alacritty.toml (nested or flat) into 18 resolved colors
// - Theme: palette → workbench colors + TextMate token rules, written as JSON
// - Registry/status: which themes exist and which are generated
// - Sync: merge the theme keys into each installed editor's settings
// - Hooks: switcher callbacks plus the script installer
// - Everything is synchronous and runs once per invocation

mod cli;
mod config;
mod error;
mod hooks;
mod logging;
mod palette;
mod registry;
mod status;
mod sync;
mod theme;
mod util;

use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // `config --path` must work even when the config file is broken
    if matches!(cli.command, Commands::Config { path: true, .. }) {
        return cli::exit_code(cli::handle_config_path());
    }

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            // Fatal: config exists but is invalid
            eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
            eprintln!("║  CONFIG ERROR - Failed to load configuration                 ║");
            eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
            eprintln!("  Error: {:#}\n", e);
            eprintln!("  Tip: Check for:\n");
            eprintln!("    - Missing quotes around string values");
            eprintln!("    - Invalid boolean values (use true/false)");
            eprintln!("    - Typos in section names\n");
            eprintln!("  To reset, delete the file and run again.\n");
            return ExitCode::FAILURE;
        }
    };

    if let Some(themes_dir) = cli.themes_dir {
        config.themes_dir = themes_dir;
    }

    // Flushes the file log on drop
    let _file_guard = logging::init(&config.logging);
    tracing::debug!("Themes directory: {}", config.themes_dir.display());

    cli::run(cli.command, &config)
}
