//! Keybinding registry: maps keys to actions per context, with config
//! overrides.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NavDown,
    NavUp,
    PageDown,
    PageUp,
    JumpTop,
    JumpBottom,
    NextTab,
    PrevTab,
    GotoFeed,
    GotoDiscover,
    GotoCreate,
    GotoNotifications,
    GotoProfile,
    TogglePlay,
    ToggleFollow,
    OpenMedia,
    EnterSearch,
    OpenFilters,
    ClearFilters,
    ChipPrev,
    ChipNext,
    ApplyFilters,
    EditField,
    CommitInput,
    CancelInput,
    ClearInput,
    CycleTheme,
    ShowHelp,
    Back,
}

impl Action {
    /// Human-readable description for the help screen.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit application",
            Self::NavDown => "Next post / field",
            Self::NavUp => "Previous post / field",
            Self::PageDown => "Page down",
            Self::PageUp => "Page up",
            Self::JumpTop => "Jump to first post",
            Self::JumpBottom => "Jump to last post",
            Self::NextTab => "Next tab",
            Self::PrevTab => "Previous tab",
            Self::GotoFeed => "Feed tab",
            Self::GotoDiscover => "Discover tab",
            Self::GotoCreate => "Create tab",
            Self::GotoNotifications => "Notifications tab",
            Self::GotoProfile => "Profile tab",
            Self::TogglePlay => "Play / pause video",
            Self::ToggleFollow => "Follow / unfollow author",
            Self::OpenMedia => "Open media in browser",
            Self::EnterSearch => "Search posts",
            Self::OpenFilters => "Filter & sort",
            Self::ClearFilters => "Clear all filters",
            Self::ChipPrev => "Previous option",
            Self::ChipNext => "Next option",
            Self::ApplyFilters => "Apply and close",
            Self::EditField => "Edit field",
            Self::CommitInput => "Confirm input",
            Self::CancelInput => "Cancel input",
            Self::ClearInput => "Clear input",
            Self::CycleTheme => "Cycle theme",
            Self::ShowHelp => "Show help",
            Self::Back => "Go back / dismiss",
        }
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context: determines which bindings are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    Feed,
    FilterModal,
    Profile,
    /// Search bar or a profile field edit.
    TextInput,
}

impl Context {
    pub fn name(self) -> &'static str {
        match self {
            Self::Global => "Global",
            Self::Feed => "Feed",
            Self::FilterModal => "Filter & Sort",
            Self::Profile => "Profile",
            Self::TextInput => "Text input",
        }
    }
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ch(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Terminals report `G` as `Shift+G` and Shift+Tab as `BackTab` with
    /// SHIFT. The shift is already in the key code, so drop it.
    fn normalized(self) -> Self {
        match self.code {
            KeyCode::Char(_) | KeyCode::BackTab => {
                Self::new(self.code, self.modifiers.difference(KeyModifiers::SHIFT))
            }
            _ => self,
        }
    }
}

/// Parse a key string from config into a KeySpec.
///
/// Supported formats:
/// - Single char: "q", "j", "/"
/// - Named keys: "Enter", "Esc", "Tab", "BackTab", "Up", "Down", "Space",
///   "PageUp", "PageDown", "Home", "End", "Backspace"
/// - Modifier combos: "Ctrl+d", "Ctrl+u"
/// - Function keys: "F1" through "F12"
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let mut chars = rest.trim().chars();
        let c = chars.next()?;
        return match chars.next() {
            None => Some(KeySpec::ctrl(c)),
            Some(_) => None,
        };
    }

    let named = match s.to_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "backtab" | "shift+tab" => Some(KeyCode::BackTab),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "pageup" => Some(KeyCode::PageUp),
        "pagedown" => Some(KeyCode::PageDown),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        "backspace" => Some(KeyCode::Backspace),
        "space" => Some(KeyCode::Char(' ')),
        _ => None,
    };
    if let Some(code) = named {
        return Some(KeySpec::plain(code));
    }

    if let Some(n) = s.strip_prefix(['F', 'f']) {
        if let Ok(n) = n.parse::<u8>() {
            return (1..=12)
                .contains(&n)
                .then_some(KeySpec::plain(KeyCode::F(n)));
        }
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(KeySpec::ch(c)),
        _ => None,
    }
}

/// Format a KeySpec for the help screen.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Default bindings, in help-screen order.
const DEFAULT_BINDINGS: &[(Context, KeySpec, Action)] = &[
    // === Global ===
    (Context::Global, KeySpec::ch('q'), Action::Quit),
    (Context::Global, KeySpec::ch('j'), Action::NavDown),
    (Context::Global, KeySpec::plain(KeyCode::Down), Action::NavDown),
    (Context::Global, KeySpec::ch('k'), Action::NavUp),
    (Context::Global, KeySpec::plain(KeyCode::Up), Action::NavUp),
    (Context::Global, KeySpec::ctrl('d'), Action::PageDown),
    (Context::Global, KeySpec::plain(KeyCode::PageDown), Action::PageDown),
    (Context::Global, KeySpec::ctrl('u'), Action::PageUp),
    (Context::Global, KeySpec::plain(KeyCode::PageUp), Action::PageUp),
    (Context::Global, KeySpec::ch('g'), Action::JumpTop),
    (Context::Global, KeySpec::ch('G'), Action::JumpBottom),
    (Context::Global, KeySpec::plain(KeyCode::Tab), Action::NextTab),
    (Context::Global, KeySpec::plain(KeyCode::BackTab), Action::PrevTab),
    (Context::Global, KeySpec::ch('1'), Action::GotoFeed),
    (Context::Global, KeySpec::ch('2'), Action::GotoDiscover),
    (Context::Global, KeySpec::ch('3'), Action::GotoCreate),
    (Context::Global, KeySpec::ch('4'), Action::GotoNotifications),
    (Context::Global, KeySpec::ch('5'), Action::GotoProfile),
    (Context::Global, KeySpec::ch('T'), Action::CycleTheme),
    (Context::Global, KeySpec::ch('?'), Action::ShowHelp),
    (Context::Global, KeySpec::plain(KeyCode::Esc), Action::Back),
    // === Feed screen ===
    (Context::Feed, KeySpec::ch(' '), Action::TogglePlay),
    (Context::Feed, KeySpec::plain(KeyCode::Enter), Action::TogglePlay),
    (Context::Feed, KeySpec::ch('f'), Action::ToggleFollow),
    (Context::Feed, KeySpec::ch('o'), Action::OpenMedia),
    (Context::Feed, KeySpec::ch('/'), Action::EnterSearch),
    (Context::Feed, KeySpec::ch('F'), Action::OpenFilters),
    (Context::Feed, KeySpec::ch('c'), Action::ClearFilters),
    // === Filter & Sort modal ===
    (Context::FilterModal, KeySpec::ch('h'), Action::ChipPrev),
    (Context::FilterModal, KeySpec::plain(KeyCode::Left), Action::ChipPrev),
    (Context::FilterModal, KeySpec::ch('l'), Action::ChipNext),
    (Context::FilterModal, KeySpec::plain(KeyCode::Right), Action::ChipNext),
    (Context::FilterModal, KeySpec::ch('c'), Action::ClearFilters),
    (Context::FilterModal, KeySpec::plain(KeyCode::Enter), Action::ApplyFilters),
    (Context::FilterModal, KeySpec::plain(KeyCode::Esc), Action::ApplyFilters),
    // === Profile ===
    (Context::Profile, KeySpec::plain(KeyCode::Enter), Action::EditField),
    (Context::Profile, KeySpec::ch('e'), Action::EditField),
    (Context::Profile, KeySpec::ch('o'), Action::OpenMedia),
    // === Text input ===
    (Context::TextInput, KeySpec::plain(KeyCode::Enter), Action::CommitInput),
    (Context::TextInput, KeySpec::plain(KeyCode::Esc), Action::CancelInput),
    (Context::TextInput, KeySpec::ctrl('u'), Action::ClearInput),
];

/// Registry of keybindings, supporting default bindings and config overrides.
///
/// The same key can map to different actions in different contexts; lookups
/// fall back to `Global`, except in `TextInput` where unbound keys are text.
pub struct KeybindingRegistry {
    lookup: HashMap<(Context, KeySpec), Action>,
    /// All bindings for help screen enumeration
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::with_capacity(DEFAULT_BINDINGS.len()),
        };
        for &(context, key, action) in DEFAULT_BINDINGS {
            registry.bind(context, key, action);
        }
        registry
    }

    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        self.lookup.insert((context, key), action);
        self.bindings.push((context, key, action));
    }

    /// Apply user overrides from the config `keybindings` table.
    ///
    /// Keys are action names ("quit", "toggle_play"), values are key strings
    /// ("q", "Ctrl+d", "F5"). The new key replaces every default key for that
    /// action, in each context the action was bound in.
    ///
    /// Returns warnings for unknown action names and unparseable keys.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        for (action_name, key_str) in overrides {
            let Some(action) = parse_action_name(action_name) else {
                warnings.push(format!("Unknown action '{}', ignoring", action_name));
                continue;
            };
            let Some(key) = parse_key_string(key_str) else {
                warnings.push(format!(
                    "Cannot parse key '{}' for action '{}', ignoring",
                    key_str, action_name
                ));
                continue;
            };

            let mut contexts: Vec<Context> = Vec::new();
            for (ctx, _, a) in &self.bindings {
                if *a == action && !contexts.contains(ctx) {
                    contexts.push(*ctx);
                }
            }

            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, _, a)| *a != action);
            for ctx in contexts {
                self.bind(ctx, key, action);
            }

            tracing::info!(
                action = %action_name,
                key = %key_str,
                "Applied keybinding override"
            );
        }

        warnings
    }

    /// Look up the action for a key in a context.
    ///
    /// Tries the specific context first, then `Global` (not for `TextInput`).
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        let key = KeySpec::new(code, modifiers).normalized();

        if let Some(&action) = self.lookup.get(&(context, key)) {
            return Some(action);
        }
        if matches!(context, Context::Global | Context::TextInput) {
            return None;
        }
        self.lookup.get(&(Context::Global, key)).copied()
    }

    /// Display string of the first key bound to `action`, for hints.
    pub fn key_hint(&self, action: Action) -> Option<String> {
        self.bindings
            .iter()
            .find(|(_, _, a)| *a == action)
            .map(|(_, key, _)| format_key(key))
    }

    /// All bindings for the help screen: (context, key, action, description).
    pub fn all_bindings(&self) -> Vec<(Context, String, Action, &'static str)> {
        self.bindings
            .iter()
            .map(|(ctx, key, action)| (*ctx, format_key(key), *action, action.describe()))
            .collect()
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an action name from config.
fn parse_action_name(name: &str) -> Option<Action> {
    let action = match name.to_lowercase().as_str() {
        "quit" => Action::Quit,
        "nav_down" | "down" => Action::NavDown,
        "nav_up" | "up" => Action::NavUp,
        "page_down" => Action::PageDown,
        "page_up" => Action::PageUp,
        "jump_top" | "top" => Action::JumpTop,
        "jump_bottom" | "bottom" => Action::JumpBottom,
        "next_tab" => Action::NextTab,
        "prev_tab" => Action::PrevTab,
        "goto_feed" | "feed" => Action::GotoFeed,
        "goto_discover" | "discover" => Action::GotoDiscover,
        "goto_create" | "create" => Action::GotoCreate,
        "goto_notifications" | "notifications" => Action::GotoNotifications,
        "goto_profile" | "profile" => Action::GotoProfile,
        "toggle_play" | "play" => Action::TogglePlay,
        "toggle_follow" | "follow" => Action::ToggleFollow,
        "open_media" | "open" => Action::OpenMedia,
        "enter_search" | "search" => Action::EnterSearch,
        "open_filters" | "filters" => Action::OpenFilters,
        "clear_filters" | "clear_all" => Action::ClearFilters,
        "chip_prev" => Action::ChipPrev,
        "chip_next" => Action::ChipNext,
        "apply_filters" | "apply" => Action::ApplyFilters,
        "edit_field" | "edit" => Action::EditField,
        "commit_input" => Action::CommitInput,
        "cancel_input" => Action::CancelInput,
        "clear_input" => Action::ClearInput,
        "cycle_theme" | "theme" => Action::CycleTheme,
        "show_help" | "help" => Action::ShowHelp,
        "back" => Action::Back,
        _ => return None,
    };
    Some(action)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(reg: &KeybindingRegistry, code: KeyCode, ctx: Context) -> Option<Action> {
        reg.action_for_key(code, KeyModifiers::NONE, ctx)
    }

    #[test]
    fn test_default_registry_has_quit() {
        let reg = KeybindingRegistry::new();
        assert_eq!(lookup(&reg, KeyCode::Char('q'), Context::Global), Some(Action::Quit));
    }

    #[test]
    fn test_feed_context_falls_back_to_global() {
        let reg = KeybindingRegistry::new();
        assert_eq!(lookup(&reg, KeyCode::Char('j'), Context::Feed), Some(Action::NavDown));
        assert_eq!(lookup(&reg, KeyCode::Tab, Context::Feed), Some(Action::NextTab));
        assert_eq!(lookup(&reg, KeyCode::Char(' '), Context::Feed), Some(Action::TogglePlay));
        // Feed-only binding is not global
        assert_eq!(lookup(&reg, KeyCode::Char(' '), Context::Global), None);
    }

    #[test]
    fn test_filter_modal_overrides_global_esc() {
        let reg = KeybindingRegistry::new();
        assert_eq!(lookup(&reg, KeyCode::Esc, Context::Global), Some(Action::Back));
        assert_eq!(
            lookup(&reg, KeyCode::Esc, Context::FilterModal),
            Some(Action::ApplyFilters)
        );
        assert_eq!(
            lookup(&reg, KeyCode::Right, Context::FilterModal),
            Some(Action::ChipNext)
        );
    }

    #[test]
    fn test_text_input_does_not_fall_back() {
        let reg = KeybindingRegistry::new();
        // 'q' and 'j' are text while typing
        assert_eq!(lookup(&reg, KeyCode::Char('q'), Context::TextInput), None);
        assert_eq!(lookup(&reg, KeyCode::Char('j'), Context::TextInput), None);
        assert_eq!(
            lookup(&reg, KeyCode::Enter, Context::TextInput),
            Some(Action::CommitInput)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('u'), KeyModifiers::CONTROL, Context::TextInput),
            Some(Action::ClearInput)
        );
    }

    #[test]
    fn test_shifted_keys_match() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::Char('G'), KeyModifiers::SHIFT, Context::Feed),
            Some(Action::JumpBottom)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('F'), KeyModifiers::SHIFT, Context::Feed),
            Some(Action::OpenFilters)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::BackTab, KeyModifiers::SHIFT, Context::Profile),
            Some(Action::PrevTab)
        );
    }

    #[test]
    fn test_ctrl_modifiers() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::Char('d'), KeyModifiers::CONTROL, Context::Feed),
            Some(Action::PageDown)
        );
        // Plain 'd' is unbound
        assert_eq!(lookup(&reg, KeyCode::Char('d'), Context::Feed), None);
    }

    #[test]
    fn test_unknown_key_returns_none() {
        let reg = KeybindingRegistry::new();
        assert_eq!(lookup(&reg, KeyCode::F(12), Context::Global), None);
    }

    #[test]
    fn test_apply_overrides_valid() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("quit".to_string(), "Ctrl+q".to_string());

        let warnings = reg.apply_overrides(&overrides);
        assert!(warnings.is_empty());
        assert_eq!(lookup(&reg, KeyCode::Char('q'), Context::Global), None);
        assert_eq!(
            reg.action_for_key(KeyCode::Char('q'), KeyModifiers::CONTROL, Context::Global),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_override_preserves_contexts() {
        let mut reg = KeybindingRegistry::new();
        // OpenMedia is bound in Feed and Profile
        let mut overrides = HashMap::new();
        overrides.insert("open".to_string(), "x".to_string());
        assert!(reg.apply_overrides(&overrides).is_empty());

        assert_eq!(lookup(&reg, KeyCode::Char('x'), Context::Feed), Some(Action::OpenMedia));
        assert_eq!(lookup(&reg, KeyCode::Char('x'), Context::Profile), Some(Action::OpenMedia));
        assert_eq!(lookup(&reg, KeyCode::Char('o'), Context::Feed), None);
    }

    #[test]
    fn test_override_replaces_every_default_key() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("toggle_play".to_string(), "p".to_string());
        reg.apply_overrides(&overrides);

        assert_eq!(lookup(&reg, KeyCode::Char('p'), Context::Feed), Some(Action::TogglePlay));
        assert_eq!(lookup(&reg, KeyCode::Char(' '), Context::Feed), None);
        assert_eq!(lookup(&reg, KeyCode::Enter, Context::Feed), None);
        let count = reg
            .all_bindings()
            .iter()
            .filter(|(_, _, a, _)| *a == Action::TogglePlay)
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_apply_overrides_warnings() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("nonexistent_action".to_string(), "q".to_string());
        overrides.insert("quit".to_string(), "Ctrl+Alt+Shift+Q".to_string());

        let mut warnings = reg.apply_overrides(&overrides);
        warnings.sort();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("Cannot parse key"));
        assert!(warnings[1].contains("Unknown action"));
    }

    #[test]
    fn test_parse_key_string_formats() {
        assert_eq!(parse_key_string("Enter"), Some(KeySpec::plain(KeyCode::Enter)));
        assert_eq!(parse_key_string("esc"), Some(KeySpec::plain(KeyCode::Esc)));
        assert_eq!(parse_key_string("space"), Some(KeySpec::ch(' ')));
        assert_eq!(parse_key_string("PageDown"), Some(KeySpec::plain(KeyCode::PageDown)));
        assert_eq!(parse_key_string("Shift+Tab"), Some(KeySpec::plain(KeyCode::BackTab)));
        assert_eq!(parse_key_string("F1"), Some(KeySpec::plain(KeyCode::F(1))));
        assert_eq!(parse_key_string("F13"), None);
        assert_eq!(parse_key_string("f"), Some(KeySpec::ch('f')));
        assert_eq!(parse_key_string("Ctrl+d"), Some(KeySpec::ctrl('d')));
        assert_eq!(parse_key_string("/"), Some(KeySpec::ch('/')));
        assert_eq!(parse_key_string("é"), Some(KeySpec::ch('é')));
        assert_eq!(parse_key_string("nope"), None);
    }

    #[test]
    fn test_format_key_display() {
        assert_eq!(format_key(&KeySpec::ch('q')), "q");
        assert_eq!(format_key(&KeySpec::ch(' ')), "Space");
        assert_eq!(format_key(&KeySpec::ctrl('d')), "Ctrl+d");
        assert_eq!(format_key(&KeySpec::plain(KeyCode::BackTab)), "Shift+Tab");
        assert_eq!(format_key(&KeySpec::plain(KeyCode::F(5))), "F5");
    }

    #[test]
    fn test_key_hint() {
        let reg = KeybindingRegistry::new();
        assert_eq!(reg.key_hint(Action::OpenFilters).as_deref(), Some("F"));
        assert_eq!(reg.key_hint(Action::TogglePlay).as_deref(), Some("Space"));
    }

    #[test]
    fn test_every_action_has_a_default_key() {
        let reg = KeybindingRegistry::new();
        let bound: Vec<Action> = reg.all_bindings().iter().map(|(_, _, a, _)| *a).collect();
        for name in [
            "quit", "nav_down", "nav_up", "page_down", "page_up", "jump_top", "jump_bottom",
            "next_tab", "prev_tab", "goto_feed", "goto_discover", "goto_create",
            "goto_notifications", "goto_profile", "toggle_play", "toggle_follow", "open_media",
            "enter_search", "open_filters", "clear_filters", "chip_prev", "chip_next",
            "apply_filters", "edit_field", "commit_input", "cancel_input", "clear_input",
            "cycle_theme", "show_help", "back",
        ] {
            let action = parse_action_name(name).unwrap();
            assert!(bound.contains(&action), "{} has no default key", name);
        }
    }
}
