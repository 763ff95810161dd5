// Syntax token colors (editor.tokenColorCustomizations.textMateRules)
//
// The ANSI slots carry no syntax meaning of their own, so the assignment is
// a convention, not a translation:
// - red → invalid/error tokens
// - green → strings
// - blue → keywords (bright blue → functions)
// - yellow → types and classes
// - cyan → constants and support types
// - magenta → escapes, tags, regexps
// - bright black → comments and punctuation

use crate::palette::{Palette, Rgb};
use serde::{Deserialize, Serialize};

/// One TextMate rule: a set of scopes sharing a style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRule {
    pub name: String,
    pub scope: Vec<String>,
    pub settings: TokenSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSettings {
    pub foreground: Rgb,
    #[serde(rename = "fontStyle", default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
}

/// Palette slot a token rule draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ink {
    Foreground,
    Comment,
    Red,
    Green,
    Yellow,
    Blue,
    BrightBlue,
    Magenta,
    Cyan,
}

impl Ink {
    fn resolve(self, p: &Palette) -> Rgb {
        match self {
            Ink::Foreground => p.foreground,
            Ink::Comment => p.bright.black,
            Ink::Red => p.normal.red,
            Ink::Green => p.normal.green,
            Ink::Yellow => p.normal.yellow,
            Ink::Blue => p.normal.blue,
            Ink::BrightBlue => p.bright.blue,
            Ink::Magenta => p.normal.magenta,
            Ink::Cyan => p.normal.cyan,
        }
    }
}

struct RuleSpec {
    name: &'static str,
    scopes: &'static [&'static str],
    ink: Ink,
    font_style: Option<&'static str>,
}

const RULES: &[RuleSpec] = &[
    RuleSpec {
        name: "Comments",
        scopes: &["comment", "punctuation.definition.comment"],
        ink: Ink::Comment,
        font_style: Some("italic"),
    },
    RuleSpec {
        name: "Strings",
        scopes: &["string", "string.quoted", "string.template"],
        ink: Ink::Green,
        font_style: None,
    },
    RuleSpec {
        name: "Invalid",
        scopes: &[
            "invalid",
            "invalid.illegal",
            "invalid.deprecated",
            "message.error",
        ],
        ink: Ink::Red,
        font_style: None,
    },
    RuleSpec {
        name: "Keywords",
        scopes: &[
            "keyword",
            "keyword.control",
            "storage.type",
            "storage.modifier",
        ],
        ink: Ink::Blue,
        font_style: None,
    },
    RuleSpec {
        name: "Functions",
        scopes: &[
            "entity.name.function",
            "support.function",
            "meta.function-call",
        ],
        ink: Ink::BrightBlue,
        font_style: None,
    },
    RuleSpec {
        name: "Types",
        scopes: &[
            "entity.name.type",
            "entity.name.class",
            "support.class",
            "entity.other.inherited-class",
        ],
        ink: Ink::Yellow,
        font_style: None,
    },
    RuleSpec {
        name: "Constants",
        scopes: &[
            "constant.numeric",
            "constant.language",
            "support.constant",
            "support.type",
        ],
        ink: Ink::Cyan,
        font_style: None,
    },
    RuleSpec {
        name: "Escapes & Tags",
        scopes: &[
            "constant.character.escape",
            "entity.name.tag",
            "string.regexp",
        ],
        ink: Ink::Magenta,
        font_style: None,
    },
    RuleSpec {
        name: "Variables",
        scopes: &["variable", "variable.other", "variable.parameter"],
        ink: Ink::Foreground,
        font_style: None,
    },
    RuleSpec {
        name: "Punctuation",
        scopes: &["punctuation", "meta.brace"],
        ink: Ink::Comment,
        font_style: None,
    },
    RuleSpec {
        name: "Markup Headings",
        scopes: &["markup.heading"],
        ink: Ink::Blue,
        font_style: Some("bold"),
    },
    RuleSpec {
        name: "Markup Italic",
        scopes: &["markup.italic"],
        ink: Ink::Foreground,
        font_style: Some("italic"),
    },
    RuleSpec {
        name: "Markup Bold",
        scopes: &["markup.bold"],
        ink: Ink::Foreground,
        font_style: Some("bold"),
    },
];

/// Build the TextMate rule list for a palette.
pub fn token_rules(p: &Palette) -> Vec<TokenRule> {
    RULES
        .iter()
        .map(|spec| TokenRule {
            name: spec.name.to_string(),
            scope: spec.scopes.iter().map(|s| s.to_string()).collect(),
            settings: TokenSettings {
                foreground: spec.ink.resolve(p),
                font_style: spec.font_style.map(str::to_string),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokyo() -> Palette {
        Palette::from_toml_str(
            "t",
            r##"
background = "#1a1b26"
foreground = "#c0caf5"
red = "#f7768e"
green = "#9ece6a"
yellow = "#e0af68"
blue = "#7aa2f7"
magenta = "#bb9af7"
cyan = "#7dcfff"
bright_black = "#565f89"
bright_blue = "#89b4fa"
"##,
        )
        .unwrap()
        .palette
    }

    fn color_for(rules: &[TokenRule], scope: &str) -> Option<String> {
        rules
            .iter()
            .find(|r| r.scope.iter().any(|s| s == scope))
            .map(|r| r.settings.foreground.to_hex())
    }

    #[test]
    fn test_mapping_table() {
        let rules = token_rules(&tokyo());
        assert_eq!(color_for(&rules, "invalid").as_deref(), Some("#f7768e"));
        assert_eq!(color_for(&rules, "string").as_deref(), Some("#9ece6a"));
        assert_eq!(color_for(&rules, "keyword").as_deref(), Some("#7aa2f7"));
        assert_eq!(color_for(&rules, "entity.name.function").as_deref(), Some("#89b4fa"));
        assert_eq!(color_for(&rules, "entity.name.class").as_deref(), Some("#e0af68"));
        assert_eq!(color_for(&rules, "constant.numeric").as_deref(), Some("#7dcfff"));
        assert_eq!(color_for(&rules, "entity.name.tag").as_deref(), Some("#bb9af7"));
        assert_eq!(color_for(&rules, "comment").as_deref(), Some("#565f89"));
        assert_eq!(color_for(&rules, "variable").as_deref(), Some("#c0caf5"));
    }

    #[test]
    fn test_font_style_is_omitted_when_unset() {
        let rules = token_rules(&tokyo());
        let json = serde_json::to_value(&rules).unwrap();

        assert_eq!(json[0]["settings"]["fontStyle"], "italic");
        assert!(json[1]["settings"].get("fontStyle").is_none());
    }

    #[test]
    fn test_every_scope_appears_once() {
        let rules = token_rules(&tokyo());
        let mut scopes: Vec<&str> = rules
            .iter()
            .flat_map(|r| r.scope.iter().map(String::as_str))
            .collect();
        let total = scopes.len();
        scopes.sort_unstable();
        scopes.dedup();
        assert_eq!(scopes.len(), total);
    }
}
