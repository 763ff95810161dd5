// Palette file parser
//
// Two layouts are understood:
// - Alacritty: [colors.primary], [colors.normal], [colors.bright],
//   [colors.cursor], [colors.selection]
// - Flat: top-level `background`, `foreground`, `cursor`, named ANSI colors
//   (`red`, `bright_red`, ...) or indexed `color0` .. `color15`
//
// Values are kept raw here; normalization and fallbacks live in the parent
// module so every substitution can be reported.

use super::ANSI_NAMES;
use serde::Deserialize;

/// Root structure of a palette file
#[derive(Debug, Deserialize)]
pub struct PaletteFile {
    pub colors: Option<AlacrittyColors>,
    /// Everything else at the top level (flat layout, alacritty imports, ...)
    #[serde(flatten)]
    pub flat: toml::Table,
}

/// Alacritty `[colors]` table
#[derive(Debug, Default, Deserialize)]
pub struct AlacrittyColors {
    pub primary: Option<PrimaryColors>,
    pub normal: Option<AnsiTable>,
    pub bright: Option<AnsiTable>,
    pub cursor: Option<CursorColors>,
    pub selection: Option<SelectionColors>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PrimaryColors {
    pub background: Option<toml::Value>,
    pub foreground: Option<toml::Value>,
}

/// One bank of 8 ANSI colors
#[derive(Debug, Default, Deserialize)]
pub struct AnsiTable {
    pub black: Option<toml::Value>,
    pub red: Option<toml::Value>,
    pub green: Option<toml::Value>,
    pub yellow: Option<toml::Value>,
    pub blue: Option<toml::Value>,
    pub magenta: Option<toml::Value>,
    pub cyan: Option<toml::Value>,
    pub white: Option<toml::Value>,
}

impl AnsiTable {
    fn into_slots(self) -> [Option<toml::Value>; 8] {
        [
            self.black,
            self.red,
            self.green,
            self.yellow,
            self.blue,
            self.magenta,
            self.cyan,
            self.white,
        ]
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CursorColors {
    pub cursor: Option<toml::Value>,
    #[allow(dead_code)] // Part of the alacritty schema; editors have no cursor text color
    pub text: Option<toml::Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SelectionColors {
    pub background: Option<toml::Value>,
}

/// Raw, un-normalized color slots gathered from either layout.
///
/// Each slot holds the textual value as written in the file (integers are
/// rendered as hex), or `None` when the file does not define it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RawPalette {
    pub background: Option<String>,
    pub foreground: Option<String>,
    pub cursor: Option<String>,
    pub selection: Option<String>,
    pub normal: [Option<String>; 8],
    pub bright: [Option<String>; 8],
}

impl RawPalette {
    /// Parse palette file contents
    pub fn from_str(content: &str) -> Result<Self, toml::de::Error> {
        let file: PaletteFile = toml::from_str(content)?;
        Ok(Self::from_file(file))
    }

    /// Number of slots the file defined at all (valid or not)
    pub fn defined_slots(&self) -> usize {
        [
            &self.background,
            &self.foreground,
            &self.cursor,
            &self.selection,
        ]
        .into_iter()
        .chain(self.normal.iter())
        .chain(self.bright.iter())
        .filter(|slot| slot.is_some())
        .count()
    }

    fn from_file(file: PaletteFile) -> Self {
        let mut raw = Self::from_flat(&file.flat);

        // Alacritty sections win over flat keys when both are present
        let Some(colors) = file.colors else {
            return raw;
        };

        if let Some(primary) = colors.primary {
            override_slot(&mut raw.background, primary.background);
            override_slot(&mut raw.foreground, primary.foreground);
        }
        if let Some(cursor) = colors.cursor {
            override_slot(&mut raw.cursor, cursor.cursor);
        }
        if let Some(selection) = colors.selection {
            override_slot(&mut raw.selection, selection.background);
        }
        if let Some(normal) = colors.normal {
            for (slot, value) in raw.normal.iter_mut().zip(normal.into_slots()) {
                override_slot(slot, value);
            }
        }
        if let Some(bright) = colors.bright {
            for (slot, value) in raw.bright.iter_mut().zip(bright.into_slots()) {
                override_slot(slot, value);
            }
        }

        raw
    }

    fn from_flat(table: &toml::Table) -> Self {
        let get = |key: &str| table.get(key).map(value_text);

        let mut raw = Self {
            background: get("background"),
            foreground: get("foreground"),
            cursor: get("cursor"),
            selection: get("selection_background").or_else(|| get("selection")),
            ..Self::default()
        };

        for (index, name) in ANSI_NAMES.iter().enumerate() {
            raw.normal[index] = get(name).or_else(|| get(&format!("color{index}")));
            raw.bright[index] = get(&format!("bright_{name}"))
                .or_else(|| get(&format!("color{}", index + 8)));
        }

        raw
    }
}

fn override_slot(slot: &mut Option<String>, value: Option<toml::Value>) {
    if let Some(value) = value {
        *slot = Some(value_text(&value));
    }
}

/// Render a TOML value as the text a color parser can look at.
/// Integers in 0..=0xffffff are treated as packed RGB (`0x1a1b26` is valid TOML).
fn value_text(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) if (0..=0xff_ffff).contains(i) => format!("#{:06x}", i),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_alacritty_layout() {
        let toml = r##"
[colors.primary]
background = "#1a1b26"
foreground = "#c0caf5"

[colors.cursor]
cursor = "#c0caf5"
text = "#1a1b26"

[colors.normal]
black = "#15161e"
red = "#f7768e"
green = "#9ece6a"

[colors.bright]
red = "0xff7a93"
"##;

        let raw = RawPalette::from_str(toml).unwrap();
        assert_eq!(raw.background.as_deref(), Some("#1a1b26"));
        assert_eq!(raw.cursor.as_deref(), Some("#c0caf5"));
        assert_eq!(raw.normal[1].as_deref(), Some("#f7768e"));
        assert_eq!(raw.bright[1].as_deref(), Some("0xff7a93"));
        assert!(raw.normal[4].is_none());
        assert_eq!(raw.defined_slots(), 7);
    }

    #[test]
    fn test_parse_flat_layout() {
        let toml = r##"
background = "#1a1b26"
foreground = "#c0caf5"
red = "#f7768e"
color2 = "#9ece6a"
bright_blue = "#7aa2f7"
color14 = "#7dcfff"
"##;

        let raw = RawPalette::from_str(toml).unwrap();
        assert_eq!(raw.normal[1].as_deref(), Some("#f7768e"));
        assert_eq!(raw.normal[2].as_deref(), Some("#9ece6a"));
        assert_eq!(raw.bright[4].as_deref(), Some("#7aa2f7"));
        assert_eq!(raw.bright[6].as_deref(), Some("#7dcfff"));
    }

    #[test]
    fn test_alacritty_wins_over_flat() {
        let toml = r##"
background = "#000000"

[colors.primary]
background = "#1a1b26"
"##;

        let raw = RawPalette::from_str(toml).unwrap();
        assert_eq!(raw.background.as_deref(), Some("#1a1b26"));
    }

    #[test]
    fn test_integer_colors_become_hex() {
        let raw = RawPalette::from_str("background = 0x1a1b26\nforeground = true\n").unwrap();
        assert_eq!(raw.background.as_deref(), Some("#1a1b26"));
        assert_eq!(raw.foreground.as_deref(), Some("true"));
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(RawPalette::from_str("[colors.primary\nbackground = ").is_err());
    }
}
