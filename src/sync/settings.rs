// Editor settings.json handling
//
// Settings files are treated as generic ordered maps. Only the managed
// theme keys are ever replaced; every other key keeps its value and its
// position. VS Code accepts comments and trailing commas in settings.json,
// so parsing falls back to JSON5 when strict JSON fails. Comments do not
// survive the rewrite.

use crate::error::{SyncError, SyncResult};
use serde_json::{Map, Value};
use std::path::Path;

/// Parse settings text into a key/value map.
///
/// An empty (or whitespace-only) file is an empty object.
pub fn parse_settings(editor: &str, path: &Path, text: &str) -> SyncResult<Map<String, Value>> {
    if text.trim().is_empty() {
        return Ok(Map::new());
    }

    let value = serde_json::from_str::<Value>(text)
        .or_else(|strict| {
            json5::from_str::<Value>(text).map_err(|lenient| {
                tracing::debug!("{} settings: strict JSON error: {}", editor, strict);
                lenient.to_string()
            })
        })
        .map_err(|reason| invalid(editor, path, reason))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(invalid(
            editor,
            path,
            format!("root is {}, expected an object", kind(&other)),
        )),
    }
}

/// Overwrite `entries` in `settings`, leaving everything else untouched.
///
/// Existing keys keep their position; new keys are appended.
pub fn merge_entries(settings: &mut Map<String, Value>, entries: &[(&str, Value)]) {
    for (key, value) in entries {
        settings.insert((*key).to_string(), value.clone());
    }
}

fn invalid(editor: &str, path: &Path, reason: String) -> SyncError {
    SyncError::EditorSettingsInvalid {
        editor: editor.to_string(),
        path: path.to_path_buf(),
        reason,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(text: &str) -> SyncResult<Map<String, Value>> {
        parse_settings("VS Code", Path::new("settings.json"), text)
    }

    #[test]
    fn test_empty_file_is_empty_object() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("  \n").unwrap().is_empty());
    }

    #[test]
    fn test_jsonc_with_comments_and_trailing_comma() {
        let text = r#"{
    // font settings
    "editor.fontSize": 14,
    /* block */
    "editor.fontFamily": "JetBrains Mono",
}"#;
        let map = parse(text).unwrap();
        assert_eq!(map["editor.fontSize"], 14);
        assert_eq!(map["editor.fontFamily"], "JetBrains Mono");
    }

    #[test]
    fn test_non_object_root_rejected() {
        for text in ["[]", "42", "\"x\"", "null"] {
            assert!(
                matches!(parse(text), Err(SyncError::EditorSettingsInvalid { .. })),
                "{text} should be rejected"
            );
        }
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            parse("{ \"a\": "),
            Err(SyncError::EditorSettingsInvalid { .. })
        ));
    }

    #[test]
    fn test_merge_keeps_order_and_other_keys() {
        let mut map = parse(
            r#"{"editor.fontSize": 14, "workbench.colorTheme": "Old", "files.autoSave": "off"}"#,
        )
        .unwrap();

        merge_entries(
            &mut map,
            &[
                ("workbench.colorTheme", json!("nord")),
                ("workbench.colorCustomizations", json!({"editor.background": "#2e3440"})),
            ],
        );

        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "editor.fontSize",
                "workbench.colorTheme",
                "files.autoSave",
                "workbench.colorCustomizations"
            ]
        );
        assert_eq!(map["workbench.colorTheme"], "nord");
        assert_eq!(map["files.autoSave"], "off");
    }
}
