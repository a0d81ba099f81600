//! Input handling for the TUI.
//!
//! Processes keyboard input and dispatches to the handler for the current
//! overlay, input mode or tab.

use crate::app::{App, Tab};
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crate::util::validate_url_for_open;
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyModifiers};

use super::Action;

/// Main input dispatch function.
///
/// Overlays capture all keys first, then text input modes, then the tab.
pub(super) fn handle_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Result<Action> {
    if app.show_help {
        return Ok(handle_help_input(app, code));
    }

    if app.filter_modal.is_some() {
        return Ok(handle_filter_input(app, code, modifiers));
    }

    if app.search_mode {
        handle_search_input(app, code, modifiers);
        return Ok(Action::Continue);
    }

    if app.profile.is_editing() {
        handle_field_input(app, code, modifiers);
        return Ok(Action::Continue);
    }

    match app.tab {
        Tab::Profile => handle_profile_input(app, code, modifiers),
        _ => handle_feed_input(app, code, modifiers),
    }
}

/// Handle input while the help overlay is visible.
///
/// Captures all keys: j/k/Up/Down scroll, Esc/q/? dismiss.
fn handle_help_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
    Action::Continue
}

/// Actions available on every screen.
fn handle_common(app: &mut App, action: Option<KbAction>) -> Action {
    match action {
        Some(KbAction::Quit) => return Action::Quit,
        Some(KbAction::NavDown) => app.nav_down(),
        Some(KbAction::NavUp) => app.nav_up(),
        Some(KbAction::PageDown) => app.page_down(),
        Some(KbAction::PageUp) => app.page_up(),
        Some(KbAction::JumpTop) => app.jump_top(),
        Some(KbAction::JumpBottom) => app.jump_bottom(),
        Some(KbAction::NextTab) => app.switch_tab(app.tab.next()),
        Some(KbAction::PrevTab) => app.switch_tab(app.tab.prev()),
        Some(KbAction::GotoFeed) => app.switch_tab(Tab::Feed),
        Some(KbAction::GotoDiscover) => app.switch_tab(Tab::Discover),
        Some(KbAction::GotoCreate) => app.switch_tab(Tab::Create),
        Some(KbAction::GotoNotifications) => app.switch_tab(Tab::Notifications),
        Some(KbAction::GotoProfile) => app.switch_tab(Tab::Profile),
        Some(KbAction::Back) => app.switch_tab(Tab::Feed),
        Some(KbAction::CycleTheme) => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        Some(KbAction::ShowHelp) => {
            app.show_help = true;
            app.help_scroll_offset = 0;
        }
        _ => {}
    }
    Action::Continue
}

/// Handle input on a feed tab.
fn handle_feed_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Result<Action> {
    let action = app.keybindings.action_for_key(code, modifiers, KbContext::Feed);

    match action {
        Some(KbAction::TogglePlay) => {
            app.toggle_play_selected();
        }
        Some(KbAction::ToggleFollow) => {
            app.toggle_follow_selected();
        }
        Some(KbAction::OpenMedia) => {
            if let Some(post) = app.selected_post() {
                open_url(app, &post.media_url)?;
            }
        }
        Some(KbAction::EnterSearch) => app.enter_search(),
        Some(KbAction::OpenFilters) => app.open_filters(),
        Some(KbAction::ClearFilters) => app.clear_all_filters(),
        other => return Ok(handle_common(app, other)),
    }
    Ok(Action::Continue)
}

/// Handle input in the filter & sort modal. Chip changes apply immediately.
fn handle_filter_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    let action = app
        .keybindings
        .action_for_key(code, modifiers, KbContext::FilterModal);

    match action {
        Some(KbAction::ChipPrev) => app.shift_chip(-1),
        Some(KbAction::ChipNext) => app.shift_chip(1),
        Some(KbAction::NavDown) => app.filter_row_down(),
        Some(KbAction::NavUp) => app.filter_row_up(),
        Some(KbAction::ClearFilters) => app.clear_all_filters(),
        Some(KbAction::ApplyFilters) => app.apply_filters(),
        Some(KbAction::Quit) => return Action::Quit,
        Some(KbAction::ShowHelp) => app.show_help = true,
        _ => {}
    }
    Action::Continue
}

/// Handle input while typing in the search bar. Results update per keystroke.
fn handle_search_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match app
        .keybindings
        .action_for_key(code, modifiers, KbContext::TextInput)
    {
        Some(KbAction::CommitInput) => app.search_mode = false,
        Some(KbAction::CancelInput) => {
            app.search_mode = false;
            app.set_search_text(String::new());
        }
        Some(KbAction::ClearInput) => app.set_search_text(String::new()),
        _ => match code {
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                app.push_search_char(c);
            }
            KeyCode::Backspace => app.pop_search_char(),
            _ => {}
        },
    }
}

/// Handle input on the profile tab.
fn handle_profile_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Result<Action> {
    let action = app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Profile);

    match action {
        Some(KbAction::EditField) => app.profile.begin_edit(),
        Some(KbAction::OpenMedia) => {
            let url = app.profile.profile().avatar_url.clone();
            open_url(app, &url)?;
        }
        other => return Ok(handle_common(app, other)),
    }
    Ok(Action::Continue)
}

/// Handle input while a profile field is being edited.
fn handle_field_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match app
        .keybindings
        .action_for_key(code, modifiers, KbContext::TextInput)
    {
        Some(KbAction::CommitInput) => match app.profile.commit_edit() {
            Ok(Some(field)) => app.set_status(format!("{} updated", field.label())),
            Ok(None) => {}
            Err(e) => app.set_status(e.to_string()),
        },
        Some(KbAction::CancelInput) => app.profile.cancel_edit(),
        Some(KbAction::ClearInput) => app.profile.clear_buffer(),
        _ => match code {
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                if !app.profile.push_char(c) {
                    let field = app.profile.selected_field();
                    app.set_status(format!(
                        "{} is limited to {} characters",
                        field.label(),
                        field.max_chars()
                    ));
                }
            }
            KeyCode::Backspace => app.profile.pop_char(),
            _ => {}
        },
    }
}

/// Open a URL with the system opener after validation. Invalid URLs only set
/// a status message.
fn open_url(app: &mut App, url: &str) -> Result<()> {
    let url = match validate_url_for_open(url) {
        Ok(url) => url,
        Err(e) => {
            app.set_status(format!("Cannot open media: {}", e));
            return Ok(());
        }
    };
    open::that(url.as_str()).with_context(|| format!("Failed to open {}", url))?;
    app.set_status("Opened in browser");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::feed::{CategoryFilter, MediaType, MediaTypeFilter, PostSet};
    use crate::profile::ProfileField;
    use tokio::sync::mpsc;

    fn test_app() -> App {
        let (tx, _rx) = mpsc::channel(64);
        App::new(PostSet::sample().unwrap(), &Config::default(), tx)
    }

    fn press(app: &mut App, code: KeyCode) -> Action {
        handle_input(app, code, KeyModifiers::NONE).unwrap()
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[tokio::test]
    async fn test_quit() {
        let mut app = test_app();
        assert!(matches!(press(&mut app, KeyCode::Char('q')), Action::Quit));
    }

    #[tokio::test]
    async fn test_search_filters_live_and_q_is_text() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('/'));
        assert!(app.search_mode);

        type_str(&mut app, "noida");
        assert_eq!(app.search_text(), "noida");
        assert_eq!(app.session().unwrap().current_ordered_posts().len(), 1);

        // 'q' while typing is text, not quit
        assert!(matches!(press(&mut app, KeyCode::Char('q')), Action::Continue));
        press(&mut app, KeyCode::Backspace);

        press(&mut app, KeyCode::Enter);
        assert!(!app.search_mode);
        assert_eq!(app.search_text(), "noida");
    }

    #[tokio::test]
    async fn test_search_escape_clears_text() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "zzz");
        assert!(app.session().unwrap().current_ordered_posts().is_empty());

        press(&mut app, KeyCode::Esc);
        assert!(!app.search_mode);
        assert_eq!(app.search_text(), "");
        assert_eq!(app.session().unwrap().current_ordered_posts().len(), 10);
    }

    #[tokio::test]
    async fn test_filter_modal_chips() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('F'));
        assert!(app.filter_modal.is_some());

        press(&mut app, KeyCode::Char('l')); // category: all -> news
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('h')); // media: all -> video (wraps)

        let filter = app.session().unwrap().filter().clone();
        assert_eq!(filter.category, CategoryFilter::CHIPS[1]);
        assert_eq!(filter.media_type, MediaTypeFilter::Only(MediaType::Video));

        press(&mut app, KeyCode::Char('c'));
        assert_eq!(
            app.session().unwrap().filter().category,
            CategoryFilter::All
        );

        press(&mut app, KeyCode::Enter);
        assert!(app.filter_modal.is_none());
    }

    #[tokio::test]
    async fn test_tab_keys() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.tab, Tab::Discover);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.tab, Tab::Create);
        handle_input(&mut app, KeyCode::BackTab, KeyModifiers::SHIFT).unwrap();
        assert_eq!(app.tab, Tab::Discover);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.tab, Tab::Feed);
    }

    #[tokio::test]
    async fn test_help_captures_keys() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        assert!(matches!(press(&mut app, KeyCode::Char('j')), Action::Continue));
        assert_eq!(app.help_scroll_offset, 1);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.show_help);
        assert_eq!(app.tab, Tab::Feed);
    }

    #[tokio::test]
    async fn test_profile_edit_via_keys() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('5'));
        while app.profile.selected_field() != ProfileField::Location {
            press(&mut app, KeyCode::Char('j'));
        }
        press(&mut app, KeyCode::Enter);
        assert!(app.profile.is_editing());

        handle_input(&mut app, KeyCode::Char('u'), KeyModifiers::CONTROL).unwrap();
        type_str(&mut app, "Pune");
        press(&mut app, KeyCode::Enter);

        assert!(!app.profile.is_editing());
        assert_eq!(app.profile.profile().location, "Pune");
        assert_eq!(
            app.status_message.as_ref().map(|(m, _)| m.as_ref()),
            Some("Location updated")
        );
    }

    #[tokio::test]
    async fn test_profile_empty_name_keeps_edit_open() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('5'));
        while app.profile.selected_field() != ProfileField::Name {
            press(&mut app, KeyCode::Char('j'));
        }
        press(&mut app, KeyCode::Char('e'));
        handle_input(&mut app, KeyCode::Char('u'), KeyModifiers::CONTROL).unwrap();
        press(&mut app, KeyCode::Enter);

        assert!(app.profile.is_editing());
        assert_eq!(
            app.status_message.as_ref().map(|(m, _)| m.as_ref()),
            Some("Name cannot be empty")
        );
        press(&mut app, KeyCode::Esc);
        assert!(!app.profile.is_editing());
    }

    #[tokio::test]
    async fn test_open_rejects_private_address() {
        let mut app = test_app();
        open_url(&mut app, "http://192.168.1.10/clip.mp4").unwrap();
        let (msg, _) = app.status_message.as_ref().unwrap();
        assert!(msg.starts_with("Cannot open media"));
    }
}
