// Terminal color palette
//
// This is the input side of the pipeline: a 16-color ANSI palette plus
// background/foreground/cursor/selection, read from a theme's terminal
// config (alacritty.toml). Every slot always resolves to a color: missing or
// unparseable values are replaced by a documented default and reported as a
// `PaletteIssue` so the user can see what was guessed.

mod color;
mod toml_format;

pub use color::Rgb;
pub use toml_format::RawPalette;

use crate::error::{SyncError, SyncResult};
use std::fmt;
use std::path::Path;

/// ANSI color names in slot order (color0..color7, and +8 for bright)
pub const ANSI_NAMES: [&str; 8] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

/// Contrast below this between background and foreground is reported
pub const MIN_READABLE_CONTRAST: f64 = 3.0;
/// Contrast below this replaces background and foreground with defaults
pub const MIN_ACCEPTABLE_CONTRAST: f64 = 2.0;

pub const DEFAULT_BACKGROUND: Rgb = Rgb::new(0x28, 0x2a, 0x36);
pub const DEFAULT_FOREGROUND: Rgb = Rgb::new(0xf8, 0xf8, 0xf2);

/// Chromatic fallbacks for the normal bank (Dracula)
const FALLBACK_NORMAL: AnsiColors = AnsiColors {
    black: Rgb::new(0x21, 0x22, 0x2c),
    red: Rgb::new(0xff, 0x55, 0x55),
    green: Rgb::new(0x50, 0xfa, 0x7b),
    yellow: Rgb::new(0xf1, 0xfa, 0x8c),
    blue: Rgb::new(0xbd, 0x93, 0xf9),
    magenta: Rgb::new(0xff, 0x79, 0xc6),
    cyan: Rgb::new(0x8b, 0xe9, 0xfd),
    white: Rgb::new(0xf8, 0xf8, 0xf2),
};

/// Chromatic fallbacks for the bright bank (Dracula)
const FALLBACK_BRIGHT: AnsiColors = AnsiColors {
    black: Rgb::new(0x62, 0x72, 0xa4),
    red: Rgb::new(0xff, 0x6e, 0x6e),
    green: Rgb::new(0x69, 0xff, 0x94),
    yellow: Rgb::new(0xff, 0xff, 0xa5),
    blue: Rgb::new(0xd6, 0xac, 0xff),
    magenta: Rgb::new(0xff, 0x92, 0xdf),
    cyan: Rgb::new(0xa4, 0xff, 0xff),
    white: Rgb::new(0xff, 0xff, 0xff),
};

/// One bank of the 8 standard ANSI colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnsiColors {
    pub black: Rgb,
    pub red: Rgb,
    pub green: Rgb,
    pub yellow: Rgb,
    pub blue: Rgb,
    pub magenta: Rgb,
    pub cyan: Rgb,
    pub white: Rgb,
}

impl AnsiColors {
    /// Colors in slot order
    pub fn to_array(&self) -> [Rgb; 8] {
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

    fn from_array(colors: [Rgb; 8]) -> Self {
        let [black, red, green, yellow, blue, magenta, cyan, white] = colors;
        Self {
            black,
            red,
            green,
            yellow,
            blue,
            magenta,
            cyan,
            white,
        }
    }
}

/// Fully resolved terminal palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub foreground: Rgb,
    pub cursor: Rgb,
    pub selection: Rgb,
    /// ANSI colors 0-7
    pub normal: AnsiColors,
    /// ANSI colors 8-15
    pub bright: AnsiColors,
}

/// What went wrong with a palette slot, and what was used instead
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteIssue {
    Missing { slot: String, used: Rgb },
    Invalid { slot: String, value: String, used: Rgb },
    LowContrast { ratio: f64 },
    ContrastReset,
}

impl fmt::Display for PaletteIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { slot, used } => write!(f, "missing {slot} color, using {used}"),
            Self::Invalid { slot, value, used } => {
                write!(f, "invalid {slot} color {value:?}, using {used}")
            }
            Self::LowContrast { ratio } => write!(
                f,
                "low contrast ratio ({ratio:.2}) between background and foreground"
            ),
            Self::ContrastReset => {
                write!(f, "contrast too low, background and foreground reset to defaults")
            }
        }
    }
}

/// A palette together with the fixes applied while resolving it
#[derive(Debug, Clone)]
pub struct ParsedPalette {
    pub palette: Palette,
    pub issues: Vec<PaletteIssue>,
}

impl Palette {
    /// Read and resolve the palette file of `theme`.
    pub fn load(theme: &str, path: &Path) -> SyncResult<ParsedPalette> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SyncError::PaletteNotFound {
                    theme: theme.to_string(),
                    path: path.to_path_buf(),
                })
            }
            Err(e) => {
                return Err(SyncError::PaletteParse {
                    theme: theme.to_string(),
                    reason: format!("cannot read {}: {}", path.display(), e),
                })
            }
        };

        Self::from_toml_str(theme, &contents)
    }

    /// Parse palette file contents and resolve every slot.
    pub fn from_toml_str(theme: &str, contents: &str) -> SyncResult<ParsedPalette> {
        let raw = RawPalette::from_str(contents).map_err(|e| SyncError::PaletteParse {
            theme: theme.to_string(),
            reason: e.message().trim().to_string(),
        })?;

        if raw.defined_slots() == 0 {
            return Err(SyncError::PaletteParse {
                theme: theme.to_string(),
                reason: "no color entries found".to_string(),
            });
        }

        Ok(Self::resolve(&raw))
    }

    /// Resolve raw slots into a complete palette.
    ///
    /// Order matters: background/foreground are settled (including the
    /// contrast guard) before anything derived from them.
    pub fn resolve(raw: &RawPalette) -> ParsedPalette {
        let mut issues = Vec::new();

        let mut background =
            resolve_slot("background", &raw.background, DEFAULT_BACKGROUND, &mut issues);
        let mut foreground =
            resolve_slot("foreground", &raw.foreground, DEFAULT_FOREGROUND, &mut issues);

        let ratio = background.contrast_ratio(foreground);
        if ratio < MIN_READABLE_CONTRAST {
            issues.push(PaletteIssue::LowContrast { ratio });
            if ratio < MIN_ACCEPTABLE_CONTRAST {
                background = DEFAULT_BACKGROUND;
                foreground = DEFAULT_FOREGROUND;
                issues.push(PaletteIssue::ContrastReset);
            }
        }

        let is_light = background.is_light();

        let cursor = resolve_slot("cursor", &raw.cursor, foreground, &mut issues);
        let selection = resolve_slot(
            "selection",
            &raw.selection,
            background.adjust_for_theme(is_light, 0.2),
            &mut issues,
        );

        let normal_defaults = AnsiColors {
            black: background.mix(foreground, 0.25),
            white: foreground,
            ..FALLBACK_NORMAL
        };
        let bright_defaults = AnsiColors {
            black: background.mix(foreground, 0.45),
            white: foreground.mix(Rgb::WHITE, 0.5),
            ..FALLBACK_BRIGHT
        };

        let normal = resolve_bank("normal", &raw.normal, &normal_defaults, &mut issues);
        let bright = resolve_bank("bright", &raw.bright, &bright_defaults, &mut issues);

        ParsedPalette {
            palette: Palette {
                background,
                foreground,
                cursor,
                selection,
                normal,
                bright,
            },
            issues,
        }
    }

    /// Light themes get darker accents for derived chrome
    pub fn is_light(&self) -> bool {
        self.background.is_light()
    }
}

fn resolve_slot(
    slot: &str,
    raw: &Option<String>,
    default: Rgb,
    issues: &mut Vec<PaletteIssue>,
) -> Rgb {
    match raw {
        Some(value) => Rgb::parse(value).unwrap_or_else(|| {
            issues.push(PaletteIssue::Invalid {
                slot: slot.to_string(),
                value: value.clone(),
                used: default,
            });
            default
        }),
        None => {
            issues.push(PaletteIssue::Missing {
                slot: slot.to_string(),
                used: default,
            });
            default
        }
    }
}

fn resolve_bank(
    bank: &str,
    raw: &[Option<String>; 8],
    defaults: &AnsiColors,
    issues: &mut Vec<PaletteIssue>,
) -> AnsiColors {
    let defaults = defaults.to_array();
    let mut resolved = defaults;
    for (index, name) in ANSI_NAMES.iter().enumerate() {
        resolved[index] = resolve_slot(
            &format!("{bank}.{name}"),
            &raw[index],
            defaults[index],
            issues,
        );
    }
    AnsiColors::from_array(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKYO_NIGHT: &str = r##"
[colors.primary]
background = "#1a1b26"
foreground = "#c0caf5"

[colors.cursor]
cursor = "#c0caf5"

[colors.selection]
background = "#33467c"

[colors.normal]
black = "#15161e"
red = "#f7768e"
green = "#9ece6a"
yellow = "#e0af68"
blue = "#7aa2f7"
magenta = "#bb9af7"
cyan = "#7dcfff"
white = "#a9b1d6"

[colors.bright]
black = "#414868"
red = "#f7768e"
green = "#9ece6a"
yellow = "#e0af68"
blue = "#7aa2f7"
magenta = "#bb9af7"
cyan = "#7dcfff"
white = "#c0caf5"
"##;

    #[test]
    fn test_complete_palette_has_no_issues() {
        let parsed = Palette::from_toml_str("tokyo-night", TOKYO_NIGHT).unwrap();
        assert!(parsed.issues.is_empty(), "{:?}", parsed.issues);

        let p = parsed.palette;
        assert_eq!(p.background.to_hex(), "#1a1b26");
        assert_eq!(p.foreground.to_hex(), "#c0caf5");
        assert_eq!(p.selection.to_hex(), "#33467c");
        assert_eq!(p.normal.red.to_hex(), "#f7768e");
        assert_eq!(p.bright.black.to_hex(), "#414868");
        assert!(!p.is_light());
    }

    #[test]
    fn test_missing_cursor_derives_from_foreground() {
        let parsed = Palette::from_toml_str(
            "t",
            "background = \"#1a1b26\"\nforeground = \"#c0caf5\"\n",
        )
        .unwrap();

        assert_eq!(parsed.palette.cursor, parsed.palette.foreground);
        assert!(parsed.issues.contains(&PaletteIssue::Missing {
            slot: "cursor".to_string(),
            used: parsed.palette.foreground,
        }));
    }

    #[test]
    fn test_missing_chromatic_slots_use_fallback_table() {
        let parsed = Palette::from_toml_str(
            "t",
            "background = \"#1a1b26\"\nforeground = \"#c0caf5\"\nred = \"#f7768e\"\n",
        )
        .unwrap();

        let p = parsed.palette;
        assert_eq!(p.normal.red.to_hex(), "#f7768e");
        assert_eq!(p.normal.green, FALLBACK_NORMAL.green);
        assert_eq!(p.bright.cyan, FALLBACK_BRIGHT.cyan);
    }

    #[test]
    fn test_missing_neutrals_derive_from_background_and_foreground() {
        let parsed = Palette::from_toml_str(
            "t",
            "background = \"#000000\"\nforeground = \"#c8c8c8\"\n",
        )
        .unwrap();

        let p = parsed.palette;
        assert_eq!(p.normal.black, Rgb::new(50, 50, 50));
        assert_eq!(p.normal.white, p.foreground);
        assert_eq!(p.bright.black, Rgb::new(90, 90, 90));
    }

    #[test]
    fn test_invalid_value_is_reported_and_replaced() {
        let parsed = Palette::from_toml_str(
            "t",
            "background = \"#1a1b26\"\nforeground = \"#c0caf5\"\nblue = \"not-a-color\"\n",
        )
        .unwrap();

        assert_eq!(parsed.palette.normal.blue, FALLBACK_NORMAL.blue);
        assert!(parsed.issues.iter().any(|issue| matches!(
            issue,
            PaletteIssue::Invalid { slot, value, .. } if slot == "normal.blue" && value == "not-a-color"
        )));
    }

    #[test]
    fn test_extremely_low_contrast_resets_to_defaults() {
        let parsed = Palette::from_toml_str(
            "t",
            "background = \"#202020\"\nforeground = \"#282828\"\n",
        )
        .unwrap();

        assert_eq!(parsed.palette.background, DEFAULT_BACKGROUND);
        assert_eq!(parsed.palette.foreground, DEFAULT_FOREGROUND);
        assert!(parsed.issues.contains(&PaletteIssue::ContrastReset));
    }

    #[test]
    fn test_palette_without_any_colors_is_a_parse_error() {
        let err = Palette::from_toml_str("empty", "[window]\nopacity = 0.9\n").unwrap_err();
        assert!(matches!(err, SyncError::PaletteParse { .. }));
    }

    #[test]
    fn test_malformed_palette_is_a_parse_error() {
        let err = Palette::from_toml_str("broken", "background = \"#1a1b26").unwrap_err();
        assert!(matches!(err, SyncError::PaletteParse { theme, .. } if theme == "broken"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Palette::load("ghost", &dir.path().join("alacritty.toml")).unwrap_err();
        assert!(matches!(err, SyncError::PaletteNotFound { .. }));
    }
}
