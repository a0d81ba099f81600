//! Theme system for the TUI.
//!
//! Semantic color roles map to ratatui `Style` values. `ThemeVariant` picks
//! the Dark or Light palette and `StyleMap` resolves role names to styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette
// ============================================================================

/// Every semantic UI role mapped to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Post cards --
    pub card_author: Style,
    pub card_selected: Style,
    pub card_border: Style,
    pub card_meta: Style,
    pub card_caption: Style,
    pub card_media: Style,
    pub card_playing: Style,
    pub follow_button: Style,
    pub following_button: Style,

    // -- Search --
    pub search_bar: Style,
    pub search_active: Style,
    pub search_placeholder: Style,

    // -- Filter modal --
    pub chip: Style,
    pub chip_active: Style,
    pub chip_cursor: Style,
    pub modal_border: Style,
    pub modal_title: Style,

    // -- Empty state --
    pub empty_title: Style,
    pub empty_hint: Style,

    // -- Profile --
    pub profile_label: Style,
    pub profile_value: Style,
    pub profile_editing: Style,

    // -- Chrome --
    pub tab_active: Style,
    pub tab_inactive: Style,
    pub status_bar: Style,
    pub panel_border: Style,
    pub help_key: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            card_author: Style::default().add_modifier(Modifier::BOLD),
            card_selected: Style::default().fg(Color::Cyan),
            card_border: Style::default().fg(Color::DarkGray),
            card_meta: Style::default().fg(Color::Gray),
            card_caption: Style::default(),
            card_media: Style::default().fg(Color::Blue),
            card_playing: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            follow_button: Style::default().fg(Color::Black).bg(Color::Cyan),
            following_button: Style::default().fg(Color::Cyan),

            search_bar: Style::default().fg(Color::DarkGray),
            search_active: Style::default().fg(Color::Yellow),
            search_placeholder: Style::default().fg(Color::DarkGray),

            chip: Style::default().fg(Color::Gray),
            chip_active: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            chip_cursor: Style::default().fg(Color::Yellow),
            modal_border: Style::default().fg(Color::Cyan),
            modal_title: Style::default().add_modifier(Modifier::BOLD),

            empty_title: Style::default().add_modifier(Modifier::BOLD),
            empty_hint: Style::default().fg(Color::DarkGray),

            profile_label: Style::default().fg(Color::Gray),
            profile_value: Style::default(),
            profile_editing: Style::default().fg(Color::Yellow),

            tab_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
            help_key: Style::default().fg(Color::Yellow),
        }
    }

    fn light() -> Self {
        Self {
            card_author: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            card_selected: Style::default().fg(Color::Blue),
            card_border: Style::default().fg(Color::Gray),
            card_meta: Style::default().fg(Color::DarkGray),
            card_caption: Style::default().fg(Color::Black),
            card_media: Style::default().fg(Color::Blue),
            card_playing: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            follow_button: Style::default().fg(Color::White).bg(Color::Blue),
            following_button: Style::default().fg(Color::Blue),

            search_bar: Style::default().fg(Color::Gray),
            search_active: Style::default().fg(Color::Magenta),
            search_placeholder: Style::default().fg(Color::Gray),

            chip: Style::default().fg(Color::DarkGray),
            chip_active: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            chip_cursor: Style::default().fg(Color::Magenta),
            modal_border: Style::default().fg(Color::Blue),
            modal_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            empty_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            empty_hint: Style::default().fg(Color::DarkGray),

            profile_label: Style::default().fg(Color::DarkGray),
            profile_value: Style::default().fg(Color::Black),
            profile_editing: Style::default().fg(Color::Magenta),

            tab_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
            help_key: Style::default().fg(Color::Magenta),
        }
    }
}

// ============================================================================
// Style Map
// ============================================================================

/// String-keyed style lookup built from a `ColorPalette`.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 28] = [
    "card_author",
    "card_selected",
    "card_border",
    "card_meta",
    "card_caption",
    "card_media",
    "card_playing",
    "follow_button",
    "following_button",
    "search_bar",
    "search_active",
    "search_placeholder",
    "chip",
    "chip_active",
    "chip_cursor",
    "modal_border",
    "modal_title",
    "empty_title",
    "empty_hint",
    "profile_label",
    "profile_value",
    "profile_editing",
    "tab_active",
    "tab_inactive",
    "status_bar",
    "panel_border",
    "help_key",
    "error",
];

impl StyleMap {
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 28] = [
            p.card_author,
            p.card_selected,
            p.card_border,
            p.card_meta,
            p.card_caption,
            p.card_media,
            p.card_playing,
            p.follow_button,
            p.following_button,
            p.search_bar,
            p.search_active,
            p.search_placeholder,
            p.chip,
            p.chip_active,
            p.chip_cursor,
            p.modal_border,
            p.modal_title,
            p.empty_title,
            p.empty_hint,
            p.profile_label,
            p.profile_value,
            p.profile_editing,
            p.tab_active,
            p.tab_inactive,
            p.status_bar,
            p.panel_border,
            p.help_key,
            Style::default().fg(Color::Red),
        ];

        let map = ROLE_NAMES.iter().copied().zip(styles).collect();
        Self { map }
    }

    /// Resolve a role name to its `Style`. Unknown roles get `Style::default()`.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================
