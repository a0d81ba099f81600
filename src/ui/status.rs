use crate::app::{App, Tab};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else if app.filter_modal.is_some() {
        Cow::Borrowed("[h/l]change [j/k]row [c]lear all [Enter]apply")
    } else if app.search_mode {
        Cow::Borrowed("Type to search | ESC cancel | ENTER confirm")
    } else if app.profile.is_editing() {
        Cow::Borrowed("Editing | ENTER save | ESC cancel | Ctrl+u clear")
    } else if app.tab == Tab::Profile {
        Cow::Borrowed("[Enter]edit [o]pen photo [Tab]switch [?]help [q]uit")
    } else {
        let hints = "[/]search [F]ilters [Space]play [f]ollow [o]pen [Tab]switch [?]help [q]uit";
        match app.session().map(|s| s.playing_count()) {
            Some(n) if n > 0 => Cow::Owned(format!("▶ {} playing | {}", n, hints)),
            _ => Cow::Borrowed(hints),
        }
    };

    let paragraph = Paragraph::new(text).style(app.style("status_bar"));
    f.render_widget(paragraph, area);
}
