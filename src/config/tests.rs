//! Configuration tests
//!
//! Layering (env > file > defaults) and the TOML round trip. When a field is
//! added to Config, the round-trip test fails until `to_toml` writes it.

use super::*;
use std::collections::HashMap;

fn home() -> PathBuf {
    PathBuf::from("/home/tester")
}

fn no_env(_: &str) -> Option<String> {
    None
}

fn parse(toml_str: &str) -> FileConfig {
    toml::from_str(toml_str).unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Defaults
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_defaults_follow_home() {
    let config = Config::resolve(FileConfig::default(), &home(), no_env);

    assert_eq!(
        config.themes_dir,
        PathBuf::from("/home/tester/.config/omarchy/themes")
    );
    assert_eq!(
        config.current_theme_link,
        PathBuf::from("/home/tester/.config/omarchy/current/theme")
    );
    assert_eq!(
        config.hooks_dir,
        PathBuf::from("/home/tester/.config/omarchy/hooks")
    );
    assert_eq!(config.palette_file, "alacritty.toml");
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.file_enabled);

    let targets = config.editor_targets();
    assert_eq!(targets.len(), 2);
    assert_eq!(targets[0].name, "VS Code");
    assert_eq!(
        targets[0].settings_path,
        PathBuf::from("/home/tester/.config/Code/User/settings.json")
    );
    assert_eq!(
        targets[1].settings_path,
        PathBuf::from("/home/tester/.config/Cursor/User/settings.json")
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Layering
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_file_overrides_defaults() {
    let file = parse(
        r#"
themes_dir = "~/themes"
hooks_dir = "/opt/hooks"
palette_file = "colors.toml"

[logging]
level = "debug"
file_enabled = true
file_rotation = "hourly"
"#,
    );

    let config = Config::resolve(file, &home(), no_env);

    assert_eq!(config.themes_dir, PathBuf::from("/home/tester/themes"));
    assert_eq!(config.hooks_dir, PathBuf::from("/opt/hooks"));
    assert_eq!(config.palette_file, "colors.toml");
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.file_enabled);
    assert_eq!(config.logging.file_rotation, LogRotation::Hourly);
}

#[test]
fn test_env_overrides_file() {
    let env: HashMap<&str, &str> = [(THEMES_DIR_ENV, "/env/themes")].into_iter().collect();
    let file = parse(r#"themes_dir = "/file/themes""#);

    let config = Config::resolve(file, &home(), |key| env.get(key).map(|v| v.to_string()));

    assert_eq!(config.themes_dir, PathBuf::from("/env/themes"));
}

#[test]
fn test_empty_env_var_is_ignored() {
    let file = parse(r#"themes_dir = "/file/themes""#);
    let config = Config::resolve(file, &home(), |_| Some(String::new()));
    assert_eq!(config.themes_dir, PathBuf::from("/file/themes"));
}

#[test]
fn test_editor_sections() {
    let file = parse(
        r#"
[editors.cursor]
enabled = false

[editors.vscode]
settings_path = "~/.config/Code - OSS/User/settings.json"

[editors.vscodium]
name = "VSCodium"
settings_path = "~/.config/VSCodium/User/settings.json"

[editors.broken]
name = "No Path"
"#,
    );

    let config = Config::resolve(file, &home(), no_env);
    let keys: Vec<&str> = config.editors.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["vscode", "cursor", "vscodium"]);

    let targets = config.editor_targets();
    let names: Vec<&str> = targets.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["VS Code", "VSCodium"]);
    assert_eq!(
        targets[0].settings_path,
        PathBuf::from("/home/tester/.config/Code - OSS/User/settings.json")
    );
}

#[test]
fn test_rotation_parsing() {
    assert_eq!(LogRotation::from_str("HOURLY"), LogRotation::Hourly);
    assert_eq!(LogRotation::from_str("never"), LogRotation::Never);
    assert_eq!(LogRotation::from_str("weekly"), LogRotation::Daily);
}

#[test]
fn test_expand_home() {
    assert_eq!(expand_home("~", &home()), home());
    assert_eq!(expand_home("~/a/b", &home()), PathBuf::from("/home/tester/a/b"));
    assert_eq!(expand_home("/abs", &home()), PathBuf::from("/abs"));
    assert_eq!(expand_home("~other/x", &home()), PathBuf::from("~other/x"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Loading
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_missing_config_file_is_default() {
    let dir = tempfile::tempdir().unwrap();
    let file = Config::load_file_config(&dir.path().join("config.toml")).unwrap();
    assert!(file.themes_dir.is_none());
    assert!(file.editors.is_empty());
}

#[test]
fn test_broken_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "themes_dir = [unclosed").unwrap();

    let err = Config::load_file_config(&path).unwrap_err();
    assert!(format!("{err}").contains("failed to parse config file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

/// Serialized config parses back into the same Config.
#[test]
fn test_config_roundtrip_default() {
    let config = Config::with_home(&home());
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );
    assert_eq!(Config::resolve(parsed.unwrap(), &home(), no_env), config);
}

#[test]
fn test_config_roundtrip_with_custom_values() {
    let mut config = Config::with_home(&home());
    config.themes_dir = PathBuf::from("/srv/themes \"quoted\"");
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Never;
    config.editors[1].enabled = false;
    config.editors.push(EditorConfig {
        key: "vscodium".to_string(),
        name: "VSCodium".to_string(),
        settings_path: PathBuf::from("/home/tester/.config/VSCodium/User/settings.json"),
        enabled: true,
    });

    let parsed: FileConfig = toml::from_str(&config.to_toml()).unwrap();
    assert_eq!(Config::resolve(parsed, &home(), no_env), config);
}
