// Semantic UI layer
//
// Maps a Palette onto editor chrome (workbench.colorCustomizations).
// Each editor color key is bound to a `Role`; roles resolve against the
// palette plus a handful of derived background shades. Keeping the binding
// as data means the full key set is visible in one place.
//
// Mapping philosophy:
// - Background/foreground map straight through to the editor surface
// - Chrome (sidebar, panels, tabs, inputs) uses shades derived from the
//   background: lighter on dark themes, darker on light themes
// - Red → errors, yellow → warnings, blue → focus/info, green → success

use crate::palette::{Palette, Rgb, ANSI_NAMES};
use serde_json::{Map, Value};

/// Background shades derived from the palette background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiShades {
    pub side_bg: Rgb,
    pub panel_bg: Rgb,
    pub tab_bg: Rgb,
    pub input_bg: Rgb,
    pub list_bg: Rgb,
    pub hover_bg: Rgb,
    pub border: Rgb,
}

impl UiShades {
    /// Light themes need a stronger step to stay distinguishable.
    pub fn from_palette(p: &Palette) -> Self {
        let is_light = p.is_light();
        let shade = |factor: f64| p.background.adjust_for_theme(is_light, factor);

        if is_light {
            Self {
                side_bg: shade(0.15),
                panel_bg: shade(0.2),
                tab_bg: shade(0.1),
                input_bg: shade(0.05),
                list_bg: shade(0.1),
                hover_bg: shade(0.2),
                border: shade(0.3),
            }
        } else {
            Self {
                side_bg: shade(0.1),
                panel_bg: shade(0.15),
                tab_bg: shade(0.05),
                input_bg: shade(0.05),
                list_bg: shade(0.1),
                hover_bg: shade(0.15),
                border: shade(0.2),
            }
        }
    }
}

/// Where an editor color comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Background,
    Foreground,
    Cursor,
    Selection,
    /// Secondary text: inactive tabs, placeholders, line numbers
    Muted,
    Side,
    Panel,
    Tab,
    Input,
    List,
    Hover,
    Border,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

impl Role {
    fn resolve(self, p: &Palette, shades: &UiShades) -> Rgb {
        match self {
            Role::Background => p.background,
            Role::Foreground => p.foreground,
            Role::Cursor => p.cursor,
            Role::Selection => p.selection,
            Role::Muted => p.bright.black,
            Role::Side => shades.side_bg,
            Role::Panel => shades.panel_bg,
            Role::Tab => shades.tab_bg,
            Role::Input => shades.input_bg,
            Role::List => shades.list_bg,
            Role::Hover => shades.hover_bg,
            Role::Border => shades.border,
            Role::Red => p.normal.red,
            Role::Green => p.normal.green,
            Role::Yellow => p.normal.yellow,
            Role::Blue => p.normal.blue,
            Role::Magenta => p.normal.magenta,
            Role::Cyan => p.normal.cyan,
        }
    }
}

use Role::*;

// ─── Editor ──────────────────────────────────────────────
const EDITOR: &[(&str, Role)] = &[
    ("editor.background", Background),
    ("editor.foreground", Foreground),
    ("editor.lineHighlightBackground", List),
    ("editor.lineHighlightBorder", List),
    ("editor.selectionBackground", Selection),
    ("editor.inactiveSelectionBackground", Hover),
    ("editor.findMatchBackground", Hover),
    ("editor.findMatchBorder", Yellow),
    ("editor.findMatchHighlightBackground", Tab),
    ("editor.rangeHighlightBackground", Hover),
    ("editor.wordHighlightBackground", Hover),
    ("editor.wordHighlightStrongBackground", Tab),
    ("editorCursor.foreground", Cursor),
    ("editorWhitespace.foreground", Border),
    ("editorIndentGuide.background1", Border),
    ("editorIndentGuide.activeBackground1", Muted),
    ("editorLineNumber.foreground", Muted),
    ("editorLineNumber.activeForeground", Foreground),
    ("editorBracketMatch.background", Border),
    ("editorBracketMatch.border", Blue),
    ("editorCodeLens.foreground", Muted),
    ("editorError.foreground", Red),
    ("editorWarning.foreground", Yellow),
    ("editorInfo.foreground", Blue),
    ("editorHint.foreground", Green),
    ("editorGutter.background", Background),
    ("editorGutter.modifiedBackground", Yellow),
    ("editorGutter.addedBackground", Green),
    ("editorGutter.deletedBackground", Red),
    ("editorSuggestWidget.background", Input),
    ("editorSuggestWidget.border", Border),
    ("editorSuggestWidget.selectedBackground", List),
    ("editorSuggestWidget.highlightForeground", Blue),
    ("editorHoverWidget.background", Input),
    ("editorHoverWidget.border", Border),
    ("editorWidget.background", Input),
    ("editorWidget.foreground", Foreground),
    ("editorWidget.border", Border),
];

// ─── Editor Groups & Breadcrumbs ─────────────────────────
const EDITOR_GROUPS: &[(&str, Role)] = &[
    ("editorGroup.border", Border),
    ("editorGroupHeader.tabsBackground", Side),
    ("editorGroupHeader.tabsBorder", Border),
    ("editorGroupHeader.noTabsBackground", Side),
    ("breadcrumb.background", Background),
    ("breadcrumb.foreground", Muted),
    ("breadcrumb.focusForeground", Blue),
    ("breadcrumb.activeSelectionForeground", Foreground),
    ("breadcrumbPicker.background", Input),
];

// ─── Side Bar & Activity Bar ─────────────────────────────
const SIDE_BAR: &[(&str, Role)] = &[
    ("sideBar.background", Side),
    ("sideBar.foreground", Foreground),
    ("sideBar.border", Border),
    ("sideBarTitle.foreground", Foreground),
    ("sideBarSectionHeader.background", Side),
    ("sideBarSectionHeader.foreground", Foreground),
    ("sideBarSectionHeader.border", Border),
    ("activityBar.background", Side),
    ("activityBar.foreground", Foreground),
    ("activityBar.inactiveForeground", Muted),
    ("activityBar.activeBorder", Blue),
    ("activityBar.activeBackground", Hover),
    ("activityBar.border", Border),
    ("activityBarBadge.background", Blue),
    ("activityBarBadge.foreground", Background),
];

// ─── Status Bar & Title Bar ──────────────────────────────
const STATUS_BAR: &[(&str, Role)] = &[
    ("statusBar.background", Side),
    ("statusBar.foreground", Foreground),
    ("statusBar.border", Border),
    ("statusBar.debuggingBackground", Red),
    ("statusBar.debuggingForeground", Background),
    ("statusBar.noFolderBackground", Side),
    ("statusBar.noFolderForeground", Foreground),
    ("statusBarItem.hoverBackground", Hover),
    ("statusBarItem.prominentBackground", Tab),
    ("statusBarItem.prominentForeground", Foreground),
    ("statusBarItem.remoteBackground", Blue),
    ("statusBarItem.remoteForeground", Background),
    ("statusBarItem.errorBackground", Red),
    ("statusBarItem.errorForeground", Background),
    ("statusBarItem.warningBackground", Yellow),
    ("statusBarItem.warningForeground", Background),
    ("titleBar.activeBackground", Side),
    ("titleBar.activeForeground", Foreground),
    ("titleBar.inactiveBackground", Panel),
    ("titleBar.inactiveForeground", Muted),
    ("titleBar.border", Border),
];

// ─── Tabs ────────────────────────────────────────────────
const TABS: &[(&str, Role)] = &[
    ("tab.activeBackground", Background),
    ("tab.activeForeground", Foreground),
    ("tab.activeBorderTop", Blue),
    ("tab.inactiveBackground", Side),
    ("tab.inactiveForeground", Muted),
    ("tab.border", Border),
    ("tab.hoverBackground", Hover),
    ("tab.hoverForeground", Foreground),
    ("tab.unfocusedActiveBackground", Tab),
    ("tab.unfocusedActiveForeground", Muted),
    ("tab.unfocusedInactiveBackground", Side),
    ("tab.unfocusedInactiveForeground", Muted),
];

// ─── Panel & Terminal chrome ─────────────────────────────
const PANEL: &[(&str, Role)] = &[
    ("panel.background", Panel),
    ("panel.border", Border),
    ("panelTitle.activeForeground", Foreground),
    ("panelTitle.inactiveForeground", Muted),
    ("panelTitle.activeBorder", Blue),
    ("terminal.background", Background),
    ("terminal.foreground", Foreground),
    ("terminal.border", Border),
    ("terminal.selectionBackground", Selection),
    ("terminalCursor.foreground", Cursor),
    ("terminalCursor.background", Background),
];

// ─── Inputs, Dropdowns, Buttons ──────────────────────────
const INPUTS: &[(&str, Role)] = &[
    ("input.background", Input),
    ("input.foreground", Foreground),
    ("input.border", Border),
    ("input.placeholderForeground", Muted),
    ("inputOption.activeBorder", Blue),
    ("inputOption.activeBackground", Hover),
    ("inputValidation.infoBackground", Input),
    ("inputValidation.infoBorder", Blue),
    ("inputValidation.warningBackground", Input),
    ("inputValidation.warningBorder", Yellow),
    ("inputValidation.errorBackground", Input),
    ("inputValidation.errorBorder", Red),
    ("dropdown.background", Input),
    ("dropdown.foreground", Foreground),
    ("dropdown.border", Border),
    ("dropdown.listBackground", Input),
    ("button.background", Blue),
    ("button.foreground", Background),
    ("button.hoverBackground", Cyan),
    ("button.secondaryBackground", Panel),
    ("button.secondaryForeground", Foreground),
    ("button.secondaryHoverBackground", Hover),
    ("badge.background", Blue),
    ("badge.foreground", Background),
    ("progressBar.background", Blue),
];

// ─── Lists & Trees ───────────────────────────────────────
const LISTS: &[(&str, Role)] = &[
    ("list.activeSelectionBackground", List),
    ("list.activeSelectionForeground", Foreground),
    ("list.inactiveSelectionBackground", List),
    ("list.inactiveSelectionForeground", Foreground),
    ("list.focusBackground", List),
    ("list.focusForeground", Foreground),
    ("list.hoverBackground", Hover),
    ("list.hoverForeground", Foreground),
    ("list.highlightForeground", Blue),
    ("list.errorForeground", Red),
    ("list.warningForeground", Yellow),
    ("list.deemphasizedForeground", Muted),
    ("tree.indentGuidesStroke", Border),
    ("gitDecoration.addedResourceForeground", Green),
    ("gitDecoration.modifiedResourceForeground", Yellow),
    ("gitDecoration.deletedResourceForeground", Red),
    ("gitDecoration.untrackedResourceForeground", Cyan),
    ("gitDecoration.ignoredResourceForeground", Muted),
    ("gitDecoration.conflictingResourceForeground", Magenta),
];

// ─── Chat & AI surfaces (Cursor) ─────────────────────────
const CHAT: &[(&str, Role)] = &[
    ("chat.requestBackground", Input),
    ("chat.requestBorder", Border),
    ("chat.slashCommandForeground", Magenta),
    ("ai-prompt-bar.background", Input),
    ("ai-prompt-bar.foreground", Foreground),
    ("ai-prompt-bar.border", Blue),
];

// ─── Misc surfaces ───────────────────────────────────────
const MISC: &[(&str, Role)] = &[
    ("foreground", Foreground),
    ("descriptionForeground", Muted),
    ("disabledForeground", Muted),
    ("errorForeground", Red),
    ("icon.foreground", Foreground),
    ("focusBorder", Blue),
    ("selection.background", Selection),
    ("widget.shadow", Background),
    ("scrollbarSlider.background", Border),
    ("scrollbarSlider.hoverBackground", Hover),
    ("scrollbarSlider.activeBackground", Muted),
    ("menu.background", Input),
    ("menu.foreground", Foreground),
    ("menu.selectionBackground", List),
    ("menu.selectionForeground", Foreground),
    ("menu.separatorBackground", Border),
    ("notifications.background", Input),
    ("notifications.foreground", Foreground),
    ("notifications.border", Border),
    ("notificationsErrorIcon.foreground", Red),
    ("notificationsWarningIcon.foreground", Yellow),
    ("notificationsInfoIcon.foreground", Blue),
    ("problemsErrorIcon.foreground", Red),
    ("problemsWarningIcon.foreground", Yellow),
    ("problemsInfoIcon.foreground", Blue),
    ("quickInput.background", Input),
    ("quickInput.foreground", Foreground),
    ("textLink.foreground", Blue),
    ("textLink.activeForeground", Cyan),
    ("textCodeBlock.background", Panel),
    ("peekView.border", Blue),
    ("peekViewEditor.background", Panel),
    ("peekViewResult.background", Side),
    ("peekViewTitle.background", Side),
    ("diffEditor.insertedTextBackground", Tab),
    ("diffEditor.removedTextBackground", Hover),
    ("minimap.background", Background),
    ("minimapGutter.addedBackground", Green),
    ("minimapGutter.modifiedBackground", Yellow),
    ("minimapGutter.deletedBackground", Red),
    ("debugIcon.startForeground", Green),
    ("debugIcon.pauseForeground", Yellow),
    ("debugIcon.stopForeground", Red),
    ("debugIcon.breakpointForeground", Red),
];

// ─── Symbol Icons ────────────────────────────────────────
const SYMBOL_ICONS: &[(&str, Role)] = &[
    ("symbolIcon.classForeground", Yellow),
    ("symbolIcon.constantForeground", Cyan),
    ("symbolIcon.enumeratorForeground", Yellow),
    ("symbolIcon.fieldForeground", Foreground),
    ("symbolIcon.functionForeground", Blue),
    ("symbolIcon.interfaceForeground", Yellow),
    ("symbolIcon.keywordForeground", Blue),
    ("symbolIcon.methodForeground", Blue),
    ("symbolIcon.moduleForeground", Cyan),
    ("symbolIcon.stringForeground", Green),
    ("symbolIcon.variableForeground", Foreground),
];

/// Every section, in output order
const SECTIONS: &[&[(&str, Role)]] = &[
    EDITOR,
    EDITOR_GROUPS,
    SIDE_BAR,
    STATUS_BAR,
    TABS,
    PANEL,
    INPUTS,
    LISTS,
    CHAT,
    MISC,
    SYMBOL_ICONS,
];

/// Build the workbench color block for a palette.
///
/// Key order is fixed (sections, then the 16 terminal ANSI colors) so the
/// serialized document is stable across runs.
pub fn ui_colors(p: &Palette) -> Map<String, Value> {
    let shades = UiShades::from_palette(p);
    let mut colors = Map::new();

    for section in SECTIONS {
        for (key, role) in section.iter() {
            colors.insert(
                (*key).to_string(),
                Value::String(role.resolve(p, &shades).to_hex()),
            );
        }
    }

    for (index, name) in ANSI_NAMES.iter().enumerate() {
        let title = title_case(name);
        colors.insert(
            format!("terminal.ansi{title}"),
            Value::String(p.normal.to_array()[index].to_hex()),
        );
        colors.insert(
            format!("terminal.ansiBright{title}"),
            Value::String(p.bright.to_array()[index].to_hex()),
        );
    }

    colors
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Palette;

    fn palette(background: &str, foreground: &str) -> Palette {
        let toml = format!(
            "background = \"{background}\"\nforeground = \"{foreground}\"\nred = \"#f7768e\"\nblue = \"#7aa2f7\"\n"
        );
        Palette::from_toml_str("t", &toml).unwrap().palette
    }

    #[test]
    fn test_background_and_foreground_map_directly() {
        let p = palette("#1a1b26", "#c0caf5");
        let colors = ui_colors(&p);
        assert_eq!(colors["editor.background"], "#1a1b26");
        assert_eq!(colors["editor.foreground"], "#c0caf5");
        assert_eq!(colors["editorError.foreground"], "#f7768e");
        assert_eq!(colors["focusBorder"], "#7aa2f7");
    }

    #[test]
    fn test_terminal_ansi_colors_cover_all_sixteen_slots() {
        let p = palette("#1a1b26", "#c0caf5");
        let colors = ui_colors(&p);
        let ansi = colors
            .keys()
            .filter(|k| k.starts_with("terminal.ansi"))
            .count();
        assert_eq!(ansi, 16);
        assert_eq!(colors["terminal.ansiRed"], "#f7768e");
        assert_eq!(colors["terminal.ansiBrightBlack"], p.bright.black.to_hex());
    }

    #[test]
    fn test_dark_theme_chrome_is_lighter_than_background() {
        let p = palette("#1a1b26", "#c0caf5");
        let shades = UiShades::from_palette(&p);
        assert!(shades.side_bg.relative_luminance() > p.background.relative_luminance());
        assert!(shades.border.relative_luminance() > shades.side_bg.relative_luminance());
    }

    #[test]
    fn test_light_theme_chrome_is_darker_than_background() {
        let p = palette("#fdf6e3", "#383a42");
        assert!(p.is_light());
        let shades = UiShades::from_palette(&p);
        assert!(shades.side_bg.relative_luminance() < p.background.relative_luminance());
    }

    #[test]
    fn test_no_duplicate_keys_across_sections() {
        let total: usize = SECTIONS.iter().map(|s| s.len()).sum();
        let p = palette("#1a1b26", "#c0caf5");
        assert_eq!(ui_colors(&p).len(), total + 16);
    }
}
